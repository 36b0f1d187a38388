// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadsweep
//!
//! Batch tooling around OpenSCAD and PrusaSlicer: sweep a parametric model
//! across every combination of named variables, then slice the resulting
//! geometry tree into G-code. Both pipelines run strictly sequentially and
//! report to the console.

pub mod config;
pub mod error;
pub mod process;
pub mod report;
pub mod slice;
pub mod sweep;

pub use config::{SliceConfig, SweepConfig};
pub use error::{ConfigError, InvocationError, TemplateError};
pub use process::{BatchSummary, Invocation, Job, JobState, RunOptions};
pub use slice::SliceRunner;
pub use sweep::{Combination, ParamValue, SweepRunner, Template, Variables};

use anyhow::Result;
use std::path::Path;

/// Load a sweep configuration and compile every combination
pub fn run_sweep(config_path: &Path, options: RunOptions) -> Result<BatchSummary> {
    let config = SweepConfig::load(config_path)?;
    let summary = SweepRunner::new(&config).run(options)?;
    Ok(summary)
}

/// Load a slicing configuration and slice every geometry file
pub fn run_slice(config_path: &Path, options: RunOptions) -> Result<BatchSummary> {
    let config = SliceConfig::load(config_path)?;
    Ok(SliceRunner::new(&config).run(options))
}
