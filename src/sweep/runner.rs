// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Compile one geometry file per variable combination

use super::combinations::Combination;
use super::template::sanitize_filename;
use crate::config::SweepConfig;
use crate::error::TemplateError;
use crate::process::{BatchSummary, FailedJob, Invocation, Job, RunOptions};
use crate::report::Reporter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Printed at the end of every sweep, failed items or not
pub const SWEEP_BANNER: &str = "STL files generated and stored in respective subfolders.";

/// Drives the OpenSCAD compiler across the whole sweep
pub struct SweepRunner<'a> {
    config: &'a SweepConfig,
}

impl<'a> SweepRunner<'a> {
    pub fn new(config: &'a SweepConfig) -> Self {
        Self { config }
    }

    /// Output directory and file for a combination
    pub fn output_paths(
        &self,
        combination: &Combination<'_>,
    ) -> Result<(PathBuf, PathBuf), TemplateError> {
        let subfolder = self.config.subfolder_format.render(combination)?;
        let filename = sanitize_filename(&self.config.filename_format.render(combination)?);
        let dir = if subfolder.is_empty() {
            self.config.base_output_dir.clone()
        } else {
            self.config.base_output_dir.join(subfolder)
        };
        let file = dir.join(filename);
        Ok((dir, file))
    }

    /// `<compiler> -o <output> [extra...] -D name=value ... <scad_file>`
    pub fn command(&self, combination: &Combination<'_>, output: &Path) -> Invocation {
        let mut invocation = Invocation::new(&self.config.compiler_path)
            .arg("-o")
            .arg(output)
            .args(&self.config.extra_args);
        for (name, value) in combination.entries() {
            invocation = invocation
                .arg("-D")
                .arg(format!("{}={}", name, value.to_scad_literal()));
        }
        invocation.arg(&self.config.scad_file)
    }

    /// Build the job for one combination
    pub fn plan(&self, combination: &Combination<'_>) -> Result<(Job, PathBuf), TemplateError> {
        let (dir, file) = self.output_paths(combination)?;
        let invocation = self.command(combination, &file);
        Ok((Job::new(combination.to_string(), invocation, dir), file))
    }

    /// Run every combination in order.
    ///
    /// Tool failures are recorded and the sweep moves on. A template error
    /// aborts, since it would repeat for every combination.
    pub fn run(&self, options: RunOptions) -> Result<BatchSummary, TemplateError> {
        let variables = &self.config.variables;
        let reporter = Reporter::start(
            &format!("Sweeping {}", self.config.scad_file.display()),
            variables.combination_count(),
            options.verbose,
        );
        let started = Instant::now();
        let mut summary = BatchSummary::new();

        for (index, combination) in variables.combinations().enumerate() {
            let (mut job, output) = self.plan(&combination)?;
            reporter.item_started(index, &job.label);
            reporter.command(&job.invocation, options.dry_run);

            if options.dry_run {
                reporter.item_planned();
                summary.record_skipped();
                continue;
            }

            let item_started = Instant::now();
            match job.execute() {
                Ok(run) => {
                    reporter.item_succeeded(&output, &run);
                    summary.record_success(run.duration);
                }
                Err(error) => {
                    let failure = FailedJob::from_job(&job, error);
                    reporter.item_failed(&failure);
                    summary.record_failure(failure, item_started.elapsed());
                }
            }
        }

        summary.elapsed = started.elapsed();
        reporter.finish(&summary, SWEEP_BANNER);
        Ok(summary)
    }
}
