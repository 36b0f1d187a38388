// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sequential execution of external tools

pub mod invocation;
pub mod job;

pub use invocation::{Invocation, RunOutput};
pub use job::{BatchSummary, FailedJob, Job, JobState, RunOptions};
