// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Slice a tree of STL files into a mirrored tree of G-code files

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use scadsweep::RunOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stl-to-gcode")]
#[command(version, about = "Slice every STL under a folder with PrusaSlicer", long_about = None)]
struct Cli {
    /// Slicing settings (JSON, or TOML with a .toml extension)
    #[arg(value_name = "SETTINGS_FILE")]
    settings: PathBuf,

    /// Echo every slicer command and its output
    #[arg(short, long)]
    verbose: bool,

    /// Print the commands that would run without running them
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let options = RunOptions {
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };
    let summary = scadsweep::run_slice(&cli.settings, options)
        .with_context(|| format!("Slicing aborted ({})", cli.settings.display()))?;

    if summary.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
