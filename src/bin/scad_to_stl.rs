// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Generate one STL per variable combination of an OpenSCAD model

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use scadsweep::RunOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scad-to-stl")]
#[command(version, about = "Sweep an OpenSCAD model over every combination of its variables", long_about = None)]
struct Cli {
    /// Sweep configuration (JSON, or TOML with a .toml extension)
    #[arg(value_name = "CONFIG_FILE")]
    config: PathBuf,

    /// Echo every OpenSCAD command and its output
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
    let summary = scadsweep::run_sweep(&cli.config, options)
        .with_context(|| format!("Sweep aborted ({})", cli.config.display()))?;

    if summary.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
