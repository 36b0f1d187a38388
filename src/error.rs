// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for configuration loading, template rendering and
//! external tool invocation.
//!
//! Configuration and template errors are fatal for a run. Invocation errors
//! are scoped to a single batch item and never abort the batch.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file is missing or unreadable
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed JSON/TOML
    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The file parsed but fields are missing, mistyped, or inconsistent
    #[error("Invalid config file {path}:\n  - {}", .issues.join("\n  - "))]
    Invalid { path: PathBuf, issues: Vec<String> },
}

/// Failure to parse or render a name template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template `{template}` references unknown variable `{name}`")]
    UnknownPlaceholder { template: String, name: String },

    #[error("Template `{template}` has an unclosed `{{` at byte {position}")]
    Unclosed { template: String, position: usize },

    #[error("Template `{template}` has an unmatched `}}` at byte {position}")]
    UnmatchedClose { template: String, position: usize },

    #[error("Template `{template}` has an empty placeholder at byte {position}")]
    EmptyPlaceholder { template: String, position: usize },
}

/// Failure of a single compiler or slicer invocation
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("{program} exited successfully but did not create {path}")]
    MissingOutput { program: String, path: PathBuf },
}

impl InvocationError {
    /// Captured standard error of the child, when there is any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            InvocationError::ExitStatus { stderr, .. } if !stderr.trim().is_empty() => {
                Some(stderr.as_str())
            }
            _ => None,
        }
    }
}
