// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! External tool invocation

use crate::error::InvocationError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

/// Output captured from a finished child process
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub duration: Duration,
    pub stdout: String,
    pub stderr: String,
}

/// A fully-resolved command line for one external tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Program name for error messages
    pub fn program_name(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .unwrap_or(&self.program)
            .to_string_lossy()
            .into_owned()
    }

    /// Spawn the tool, wait for it, and fail on a non-zero exit status
    pub fn run(&self) -> Result<RunOutput, InvocationError> {
        let start = Instant::now();

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| InvocationError::Spawn {
                program: self.program_name(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(InvocationError::ExitStatus {
                program: self.program_name(),
                status: output.status,
                stderr,
            });
        }

        Ok(RunOutput {
            duration: start.elapsed(),
            stdout,
            stderr,
        })
    }
}

/// Shell-like rendering, quoting arguments that contain whitespace or quotes
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_word(f, &self.program)?;
        for arg in &self.args {
            f.write_str(" ")?;
            write_word(f, arg)?;
        }
        Ok(())
    }
}

fn write_word(f: &mut fmt::Formatter<'_>, word: &OsStr) -> fmt::Result {
    let word = word.to_string_lossy();
    let needs_quotes = word.is_empty()
        || word
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"');
    if needs_quotes {
        write!(f, "'{}'", word.replace('\'', r"'\''"))
    } else {
        f.write_str(&word)
    }
}
