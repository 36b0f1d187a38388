// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end slicing runs against a stand-in PrusaSlicer

#![cfg(unix)]

mod common;

use common::{calls, install_tool, json_path, tool_lock, touch, FAKE_SLICER};
use scadsweep::error::InvocationError;
use scadsweep::{RunOptions, SliceConfig, SliceRunner};
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    tools: PathBuf,
    slicer: PathBuf,
    project: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let tools = dir.path().join("tools");
        let slicer = install_tool(&tools, "prusa-slicer", FAKE_SLICER);
        let project = touch(dir.path(), "profiles/base.3mf", "profile");
        std::fs::create_dir_all(dir.path().join("stls")).unwrap();
        Self {
            dir,
            tools,
            slicer,
            project,
        }
    }

    fn stls(&self) -> PathBuf {
        self.dir.path().join("stls")
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("gcode")
    }

    fn add_stl(&self, relative: &str) {
        touch(&self.stls(), relative, "solid x\nendsolid x\n");
    }

    fn config(&self, with_slicer: bool) -> PathBuf {
        let slicer = if with_slicer {
            json_path(&self.slicer)
        } else {
            "prusa-slicer-not-used".to_string()
        };
        let path = self.dir.path().join("settings.json");
        std::fs::write(
            &path,
            format!(
                r#"{{
                    "prusaslicer_path": "{}",
                    "base_project_file": "{}",
                    "stl_folder": "{}",
                    "output_folder": "{}"
                }}"#,
                slicer,
                json_path(&self.project),
                json_path(&self.stls()),
                json_path(&self.out())
            ),
        )
        .unwrap();
        path
    }

    fn run(&self) -> scadsweep::BatchSummary {
        let config = SliceConfig::from_file(self.config(true)).unwrap();
        SliceRunner::new(&config).run(RunOptions::default())
    }
}

#[test]
fn test_slices_only_geometry_files_into_mirrored_tree() {
    let _guard = tool_lock();
    let ws = Workspace::new();
    ws.add_stl("a/x.stl");
    ws.add_stl("a/b/y.stl");
    touch(&ws.stls(), "z.txt", "notes");

    let summary = ws.run();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(calls(&ws.tools).len(), 2);

    assert!(ws.out().join("a/x.gcode").is_file());
    assert!(ws.out().join("a/b/y.gcode").is_file());
    assert!(!ws.out().join("z.gcode").exists());

    let gcode = std::fs::read_to_string(ws.out().join("a/b/y.gcode")).unwrap();
    assert!(gcode.contains("sliced from y.stl"));
}

#[test]
fn test_slicer_arguments() {
    let _guard = tool_lock();
    let ws = Workspace::new();
    ws.add_stl("part.stl");

    ws.run();
    let log = calls(&ws.tools);
    assert_eq!(
        log,
        vec![format!(
            "{} --load {} --export-gcode --output {}",
            ws.stls().join("part.stl").display(),
            ws.project.display(),
            ws.out().join("part.gcode").display()
        )]
    );
}

#[test]
fn test_failures_are_isolated() {
    let _guard = tool_lock();
    let ws = Workspace::new();
    ws.add_stl("a_good.stl");
    ws.add_stl("broken.stl");
    ws.add_stl("silent.stl");
    ws.add_stl("z_good.stl");

    let summary = ws.run();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed(), 2);

    let broken = &summary.failures[0];
    assert_eq!(broken.label, "broken.stl");
    assert!(matches!(
        &broken.error,
        InvocationError::ExitStatus { stderr, .. } if stderr.contains("empty layer")
    ));

    let silent = &summary.failures[1];
    assert_eq!(silent.label, "silent.stl");
    assert!(matches!(
        &silent.error,
        InvocationError::MissingOutput { path, .. } if path.ends_with("silent.gcode")
    ));

    assert!(ws.out().join("a_good.gcode").is_file());
    assert!(ws.out().join("z_good.gcode").is_file());
}

#[test]
fn test_empty_tree_runs_nothing() {
    let _guard = tool_lock();
    let ws = Workspace::new();

    let summary = ws.run();
    assert_eq!(summary.total, 0);
    assert!(calls(&ws.tools).is_empty());
}

#[test]
fn test_dry_run_spawns_nothing() {
    let _guard = tool_lock();
    let ws = Workspace::new();
    ws.add_stl("a/x.stl");

    let config = SliceConfig::from_file(ws.config(true)).unwrap();
    let summary = SliceRunner::new(&config).run(RunOptions {
        dry_run: true,
        verbose: false,
    });

    assert_eq!(summary.skipped, 1);
    assert!(calls(&ws.tools).is_empty());
    assert!(!ws.out().exists());
}

#[test]
fn test_binary_honours_slicer_env_override() {
    let _guard = tool_lock();
    let ws = Workspace::new();
    ws.add_stl("a/x.stl");

    let output = Command::new(env!("CARGO_BIN_EXE_stl-to-gcode"))
        .arg(ws.config(false))
        .env("NO_COLOR", "1")
        .env("PRUSASLICER_PATH", &ws.slicer)
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(scadsweep::slice::SLICE_BANNER));
    assert!(ws.out().join("a/x.gcode").is_file());
}

#[test]
fn test_binary_usage_error_exits_with_one() {
    let _guard = tool_lock();
    let output = Command::new(env!("CARGO_BIN_EXE_stl-to-gcode"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
