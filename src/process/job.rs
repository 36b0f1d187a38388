// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch items and their aggregation

use super::invocation::{Invocation, RunOutput};
use crate::error::InvocationError;
use std::path::PathBuf;
use std::time::Duration;

/// Lifecycle of one batch item: `Pending -> Running -> {Succeeded, Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }
}

/// One external tool run together with its filesystem expectations
#[derive(Debug, Clone)]
pub struct Job {
    /// Human-readable identity: a combination or a relative input path
    pub label: String,
    pub invocation: Invocation,
    /// Directory that must exist before the tool runs
    pub output_dir: PathBuf,
    /// File that must exist after a successful run, when the tool is
    /// known to exit zero without producing output
    pub expected_output: Option<PathBuf>,
    state: JobState,
}

impl Job {
    pub fn new(label: impl Into<String>, invocation: Invocation, output_dir: PathBuf) -> Self {
        Self {
            label: label.into(),
            invocation,
            output_dir,
            expected_output: None,
            state: JobState::Pending,
        }
    }

    pub fn expecting(mut self, output: PathBuf) -> Self {
        self.expected_output = Some(output);
        self
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Run the job to a terminal state. A job runs at most once.
    pub fn execute(&mut self) -> Result<RunOutput, InvocationError> {
        debug_assert_eq!(self.state, JobState::Pending, "job `{}` already ran", self.label);
        self.state = JobState::Running;

        let result = self.run_inner();
        self.state = match result {
            Ok(_) => JobState::Succeeded,
            Err(_) => JobState::Failed,
        };
        result
    }

    fn run_inner(&self) -> Result<RunOutput, InvocationError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| InvocationError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let output = self.invocation.run()?;

        if let Some(expected) = &self.expected_output {
            if !expected.exists() {
                return Err(InvocationError::MissingOutput {
                    program: self.invocation.program_name(),
                    path: expected.clone(),
                });
            }
        }

        Ok(output)
    }
}

/// Switches that change how a batch is executed, not what it contains
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print the planned commands without creating or running anything
    pub dry_run: bool,
    /// Echo every command line and the tools' own output
    pub verbose: bool,
}

/// A batch item that ended in failure, with enough context to retry by hand
#[derive(Debug)]
pub struct FailedJob {
    pub label: String,
    pub command: String,
    pub error: InvocationError,
}

impl FailedJob {
    pub fn from_job(job: &Job, error: InvocationError) -> Self {
        Self {
            label: job.label.clone(),
            command: job.invocation.to_string(),
            error,
        }
    }
}

/// Aggregated outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    /// Time spent inside tool runs, failed ones included
    pub tool_time: Duration,
    /// Wall-clock time of the whole batch
    pub elapsed: Duration,
    pub failures: Vec<FailedJob>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, duration: Duration) {
        self.total += 1;
        self.succeeded += 1;
        self.tool_time += duration;
    }

    /// Planned but not executed (dry run)
    pub fn record_skipped(&mut self) {
        self.total += 1;
        self.skipped += 1;
    }

    pub fn record_failure(&mut self, failure: FailedJob, duration: Duration) {
        self.total += 1;
        self.tool_time += duration;
        self.failures.push(failure);
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
