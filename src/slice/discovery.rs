// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry file discovery

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A geometry file found under the input root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryFile {
    pub path: PathBuf,
    /// Path relative to the input root, used to mirror the tree
    pub relative: PathBuf,
}

/// Files found plus entries that could not be read
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<GeometryFile>,
    pub warnings: Vec<String>,
}

/// Recursively collect files under `root` whose extension matches
/// `extension` (ASCII case-insensitive), sorted by path
pub fn discover_geometry(root: &Path, extension: &str) -> Discovery {
    let mut discovery = Discovery::default();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                discovery.warnings.push(format!("Skipping unreadable entry: {}", e));
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, extension) {
            continue;
        }

        if let Ok(relative) = path.strip_prefix(root) {
            discovery.files.push(GeometryFile {
                path: path.to_path_buf(),
                relative: relative.to_path_buf(),
            });
        }
    }

    discovery
}

/// Suffix match on the file name, so a bare `.stl` counts as well
fn has_extension(path: &Path, extension: &str) -> bool {
    let suffix = format!(".{}", extension.to_ascii_lowercase());
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_ascii_lowercase().ends_with(&suffix))
}
