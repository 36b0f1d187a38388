// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared fixtures: stand-in compiler and slicer scripts

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Writing an executable while another thread forks can make exec fail with
/// ETXTBSY, so tests that create or spawn tools hold this lock.
static TOOL_LOCK: Mutex<()> = Mutex::new(());

pub fn tool_lock() -> MutexGuard<'static, ()> {
    TOOL_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Accepts `-o <out>` and `-D name=value`; fails when a definition contains
/// FAIL, otherwise writes the definitions into the output file.
pub const FAKE_OPENSCAD: &str = r#"#!/bin/sh
echo "$*" >> "$(dirname "$0")/calls.log"
out=""
defs=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    -D)
      case "$2" in
        *FAIL*) echo "ERROR: Parser error for $2" >&2; exit 1 ;;
      esac
      defs="$defs $2"; shift 2 ;;
    *) shift ;;
  esac
done
printf 'solid fake%s\nendsolid fake\n' "$defs" > "$out"
"#;

/// PrusaSlicer stand-in: inputs named `broken*` fail, inputs named `silent*`
/// exit zero without writing anything.
pub const FAKE_SLICER: &str = r#"#!/bin/sh
echo "$*" >> "$(dirname "$0")/calls.log"
input="$1"
shift
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    --output) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
case "$(basename "$input")" in
  broken*) echo "Slicing failed: empty layer" >&2; exit 2 ;;
  silent*) exit 0 ;;
esac
printf '; sliced from %s\nG28\n' "$(basename "$input")" > "$out"
"#;

/// Write an executable script into `dir`
pub fn install_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Command lines the fake tools in `dir` have been called with
pub fn calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn touch(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}

/// JSON string literal contents for a path
pub fn json_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
