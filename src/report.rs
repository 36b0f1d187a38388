// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Console reporting with colored formatting and a batch progress bar

use crate::process::{BatchSummary, FailedJob, Invocation, RunOutput};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Lines of child stderr shown under a failure
const STDERR_TAIL_LINES: usize = 12;

/// Progress and outcome reporter for one batch run
pub struct Reporter {
    bar: ProgressBar,
    total: usize,
    verbose: bool,
}

impl Reporter {
    /// Print the run header and start tracking `total` items
    pub fn start(title: &str, total: usize, verbose: bool) -> Self {
        println!("{}", "━".repeat(80).bright_black());
        println!("{} {}", title.bold(), Self::timestamp().bright_black());
        println!("{}", "━".repeat(80).bright_black());

        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        Self {
            bar,
            total,
            verbose,
        }
    }

    /// Announce an item as it starts
    pub fn item_started(&self, index: usize, label: &str) {
        let counter = format!("[{}/{}]", index + 1, self.total);
        self.line(format!("{} {} {}", "⏳".bright_blue(), counter.bright_black(), label.cyan()));
    }

    /// Echo the command line. `force` prints it even when not verbose.
    pub fn command(&self, invocation: &Invocation, force: bool) {
        if self.verbose || force {
            self.line(format!("   {} {}", "$".bright_black(), invocation));
        }
    }

    pub fn item_succeeded(&self, output: &Path, run: &RunOutput) {
        self.line(format!(
            "   {} {} {}",
            "✅".green(),
            output.display().to_string().green(),
            format!("({})", Self::format_duration(run.duration)).bright_black()
        ));
        if self.verbose {
            for line in run.stdout.lines().chain(run.stderr.lines()) {
                self.line(format!("     {}", line.bright_black()));
            }
        }
        self.bar.inc(1);
    }

    pub fn item_failed(&self, failure: &FailedJob) {
        self.bar.suspend(|| {
            eprintln!("   {} {} {}", "❌".red(), "Failed:".red().bold(), failure.label);
            eprintln!("      {} {}", "Command:".bright_black(), failure.command);
            eprintln!("      {} {}", "Error:".bright_black(), failure.error);
            if let Some(stderr) = failure.error.stderr() {
                let lines: Vec<&str> = stderr.lines().collect();
                let tail = &lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..];
                for line in tail {
                    eprintln!("      {} {}", "│".bright_black(), line);
                }
            }
        });
        self.bar.inc(1);
    }

    /// A planned item in a dry run
    pub fn item_planned(&self) {
        self.bar.inc(1);
    }

    pub fn warning(&self, message: &str) {
        self.bar
            .suspend(|| eprintln!("{} {}", "⚠️  Warning:".yellow().bold(), message));
    }

    /// Finish the bar and print the summary followed by the completion banner.
    ///
    /// The banner is printed whether or not items failed; the counts above it
    /// carry the outcome.
    pub fn finish(&self, summary: &BatchSummary, banner: &str) {
        self.bar.finish_and_clear();

        println!("\n{}", "═".repeat(80));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(80));
        println!(
            "{} {} | {} {} | {} {} | {} {} {}",
            "Total:".bright_black(),
            summary.total.to_string().cyan(),
            "Succeeded:".bright_black(),
            summary.succeeded.to_string().green(),
            "Failed:".bright_black(),
            if summary.has_failures() {
                summary.failed().to_string().red()
            } else {
                summary.failed().to_string().green()
            },
            "Time:".bright_black(),
            Self::format_duration(summary.elapsed).yellow(),
            format!("(tools {})", Self::format_duration(summary.tool_time)).bright_black()
        );
        if summary.skipped > 0 {
            println!(
                "{} {} (dry run, nothing executed)",
                "Planned:".bright_black(),
                summary.skipped.to_string().yellow()
            );
        }

        if summary.has_failures() {
            println!("\n{}", "Failed items:".red().bold());
            for failure in &summary.failures {
                println!("  {} {}", "❌".red(), failure.label);
            }
        }

        println!("{}", "═".repeat(80));
        if summary.has_failures() {
            println!(
                "{} {}",
                banner.yellow().bold(),
                format!("({} of {} failed)", summary.failed(), summary.total).red()
            );
        } else {
            println!("{}", banner.green().bold());
        }
    }

    fn line(&self, text: String) {
        self.bar.suspend(|| println!("{}", text));
    }

    fn timestamp() -> String {
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
