// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration for slicing a tree of geometry files

use super::loader::{self, FieldReader};
use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `prusaslicer_path`
pub const SLICER_ENV: &str = "PRUSASLICER_PATH";

pub const DEFAULT_INPUT_EXTENSION: &str = "stl";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "gcode";

/// Validated slicing configuration
#[derive(Debug, Clone)]
pub struct SliceConfig {
    pub slicer_path: PathBuf,
    /// Project or profile loaded with `--load`
    pub base_project_file: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Without the leading dot
    pub input_extension: String,
    pub output_extension: String,
    pub extra_args: Vec<String>,
}

impl SliceConfig {
    /// Load from file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        if let Ok(slicer) = std::env::var(SLICER_ENV) {
            if !slicer.trim().is_empty() {
                config.slicer_path = PathBuf::from(slicer);
            }
        }
        Ok(config)
    }

    /// Load from file without consulting the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let doc = loader::load_document(path)?;
        Self::from_document(&doc, path)
    }

    pub fn from_document(doc: &Map<String, Value>, origin: &Path) -> Result<Self, ConfigError> {
        let mut fields = FieldReader::new(doc);

        let slicer_path = fields.required_path("prusaslicer_path");

        let base_project_file = fields.required_path("base_project_file");
        if let Some(project) = &base_project_file {
            if !project.is_file() {
                fields.issue(format!(
                    "base_project_file `{}` does not exist",
                    project.display()
                ));
            }
        }

        let input_dir = fields.required_path("stl_folder");
        if let Some(input) = &input_dir {
            if !input.is_dir() {
                fields.issue(format!("stl_folder `{}` is not a directory", input.display()));
            }
        }

        let output_dir = fields.required_path("output_folder");
        let input_extension = read_extension(&mut fields, "input_extension", DEFAULT_INPUT_EXTENSION);
        let output_extension =
            read_extension(&mut fields, "output_extension", DEFAULT_OUTPUT_EXTENSION);
        let extra_args = fields.string_list("extra_args");

        fields.finish(origin)?;

        match (slicer_path, base_project_file, input_dir, output_dir) {
            (Some(slicer_path), Some(base_project_file), Some(input_dir), Some(output_dir)) => {
                Ok(Self {
                    slicer_path,
                    base_project_file,
                    input_dir,
                    output_dir,
                    input_extension,
                    output_extension,
                    extra_args,
                })
            }
            _ => Err(ConfigError::Invalid {
                path: origin.to_path_buf(),
                issues: vec!["incomplete configuration".to_string()],
            }),
        }
    }
}

fn read_extension(fields: &mut FieldReader<'_>, key: &str, default: &str) -> String {
    match fields.optional_string(key) {
        Some(ext) => {
            let ext = ext.trim_start_matches('.').to_string();
            if ext.is_empty() || ext.contains(['/', '\\']) {
                fields.issue(format!("field `{}` is not a valid file extension", key));
            }
            ext
        }
        None => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{parse_document, ConfigFormat};
    use tempfile::TempDir;

    fn fixture() -> (TempDir, String, String) {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("base.3mf");
        std::fs::write(&project, b"profile").unwrap();
        let stls = dir.path().join("stls");
        std::fs::create_dir(&stls).unwrap();
        let as_json = |p: &Path| p.display().to_string().replace('\\', "/");
        (dir, as_json(&project), as_json(&stls))
    }

    #[test]
    fn test_valid_config_uses_defaults() {
        let (_dir, project, stls) = fixture();
        let doc = parse_document(
            &format!(
                r#"{{
                    "prusaslicer_path": "prusa-slicer",
                    "base_project_file": "{project}",
                    "stl_folder": "{stls}",
                    "output_folder": "gcode"
                }}"#
            ),
            ConfigFormat::Json,
            Path::new("slice.json"),
        )
        .unwrap();

        let config = SliceConfig::from_document(&doc, Path::new("slice.json")).unwrap();
        assert_eq!(config.slicer_path, PathBuf::from("prusa-slicer"));
        assert_eq!(config.input_extension, "stl");
        assert_eq!(config.output_extension, "gcode");
        assert_eq!(config.output_dir, PathBuf::from("gcode"));
    }

    #[test]
    fn test_custom_extensions() {
        let (_dir, project, stls) = fixture();
        let doc = parse_document(
            &format!(
                r#"{{
                    "prusaslicer_path": "prusa-slicer",
                    "base_project_file": "{project}",
                    "stl_folder": "{stls}",
                    "output_folder": "out",
                    "input_extension": ".3mf",
                    "output_extension": "bgcode",
                    "extra_args": ["--center", "100,100"]
                }}"#
            ),
            ConfigFormat::Json,
            Path::new("slice.json"),
        )
        .unwrap();

        let config = SliceConfig::from_document(&doc, Path::new("slice.json")).unwrap();
        assert_eq!(config.input_extension, "3mf");
        assert_eq!(config.output_extension, "bgcode");
        assert_eq!(config.extra_args, vec!["--center", "100,100"]);
    }

    #[test]
    fn test_reports_every_problem_at_once() {
        let doc = parse_document(
            r#"{
                "prusaslicer_path": 42,
                "base_project_file": "/nonexistent/base.3mf",
                "stl_folder": "/nonexistent/stls"
            }"#,
            ConfigFormat::Json,
            Path::new("slice.json"),
        )
        .unwrap();

        let Err(ConfigError::Invalid { issues, .. }) =
            SliceConfig::from_document(&doc, Path::new("slice.json"))
        else {
            panic!("expected an invalid config");
        };
        assert_eq!(
            issues,
            vec![
                "field `prusaslicer_path` must be a string, found a number",
                "base_project_file `/nonexistent/base.3mf` does not exist",
                "stl_folder `/nonexistent/stls` is not a directory",
                "missing field `output_folder`",
            ]
        );
    }
}
