// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Slice every geometry file of a tree into a mirrored output tree

use super::discovery::{discover_geometry, GeometryFile};
use crate::config::SliceConfig;
use crate::process::{BatchSummary, FailedJob, Invocation, Job, RunOptions};
use crate::report::Reporter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Printed at the end of every slicing run, failed items or not
pub const SLICE_BANNER: &str = "G-code generation finished.";

/// Drives the slicer over an input tree
pub struct SliceRunner<'a> {
    config: &'a SliceConfig,
}

impl<'a> SliceRunner<'a> {
    pub fn new(config: &'a SliceConfig) -> Self {
        Self { config }
    }

    /// Mirrored location of `file` under the output root, extension replaced
    pub fn output_path(&self, file: &GeometryFile) -> PathBuf {
        self.config
            .output_dir
            .join(&file.relative)
            .with_extension(&self.config.output_extension)
    }

    /// `<slicer> <input> --load <project> --export-gcode [extra...] --output <output>`
    pub fn command(&self, input: &Path, output: &Path) -> Invocation {
        Invocation::new(&self.config.slicer_path)
            .arg(input)
            .arg("--load")
            .arg(&self.config.base_project_file)
            .arg("--export-gcode")
            .args(&self.config.extra_args)
            .arg("--output")
            .arg(output)
    }

    /// Build the job for one input file. Success requires the output to exist.
    pub fn plan(&self, file: &GeometryFile) -> (Job, PathBuf) {
        let output = self.output_path(file);
        let output_dir = output
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.output_dir.clone());
        let invocation = self.command(&file.path, &output);
        let job = Job::new(file.relative.display().to_string(), invocation, output_dir)
            .expecting(output.clone());
        (job, output)
    }

    /// Slice every discovered file in order; one failure never stops the walk
    pub fn run(&self, options: RunOptions) -> BatchSummary {
        let discovery = discover_geometry(&self.config.input_dir, &self.config.input_extension);
        let reporter = Reporter::start(
            &format!("Slicing {}", self.config.input_dir.display()),
            discovery.files.len(),
            options.verbose,
        );
        for warning in &discovery.warnings {
            reporter.warning(warning);
        }

        let started = Instant::now();
        let mut summary = BatchSummary::new();

        for (index, file) in discovery.files.iter().enumerate() {
            let (mut job, output) = self.plan(file);
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
        reporter.finish(&summary, SLICE_BANNER);
        summary
    }
}
