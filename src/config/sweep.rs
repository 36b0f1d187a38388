// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration for sweeping an OpenSCAD model over variable combinations

use super::loader::{self, type_name, FieldReader};
use crate::error::ConfigError;
use crate::sweep::{ParamValue, Template, Variables};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Compiler used when neither the config nor the environment names one
pub const DEFAULT_COMPILER: &str = "openscad";

/// Environment variable that overrides `compiler_path`
pub const COMPILER_ENV: &str = "OPENSCAD_PATH";

/// Validated sweep configuration
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Parametric model source
    pub scad_file: PathBuf,
    /// Sweep domain, in declaration order
    pub variables: Variables,
    /// Directory name per combination (not sanitized)
    pub subfolder_format: Template,
    /// File name per combination (sanitized after rendering)
    pub filename_format: Template,
    /// Root of the generated tree
    pub base_output_dir: PathBuf,
    /// OpenSCAD executable
    pub compiler_path: PathBuf,
    /// Passed to the compiler ahead of the `-D` definitions
    pub extra_args: Vec<String>,
}

impl SweepConfig {
    /// Load from file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        if let Ok(compiler) = std::env::var(COMPILER_ENV) {
            if !compiler.trim().is_empty() {
                config.compiler_path = PathBuf::from(compiler);
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

    /// Validate a parsed document, reporting every problem at once
    pub fn from_document(doc: &Map<String, Value>, origin: &Path) -> Result<Self, ConfigError> {
        let mut fields = FieldReader::new(doc);

        let scad_file = fields.required_path("scad_file");
        if let Some(scad_file) = &scad_file {
            if !scad_file.is_file() {
                fields.issue(format!(
                    "scad_file `{}` does not exist",
                    scad_file.display()
                ));
            }
        }

        let variables = fields
            .required("variables")
            .and_then(|value| read_variables(value, &mut fields));

        // An empty subfolder writes straight into `base_output_dir`
        let subfolder_format = read_template(&mut fields, "subfolder_format", true);
        let filename_format = read_template(&mut fields, "filename_format", false);

        if let Some(variables) = &variables {
            for template in [&subfolder_format, &filename_format].into_iter().flatten() {
                if let Err(e) = template.check_against(variables) {
                    fields.issue(e.to_string());
                }
            }
        }

        let base_output_dir = fields.required_path("base_output_dir");
        let compiler_path = fields
            .optional_string("compiler_path")
            .unwrap_or_else(|| DEFAULT_COMPILER.to_string());
        let extra_args = fields.string_list("extra_args");

        fields.finish(origin)?;

        // Every required field was recorded as an issue if absent
        match (
            scad_file,
            variables,
            subfolder_format,
            filename_format,
            base_output_dir,
        ) {
            (
                Some(scad_file),
                Some(variables),
                Some(subfolder_format),
                Some(filename_format),
                Some(base_output_dir),
            ) => Ok(Self {
                scad_file,
                variables,
                subfolder_format,
                filename_format,
                base_output_dir,
                compiler_path: PathBuf::from(compiler_path),
                extra_args,
            }),
            _ => Err(ConfigError::Invalid {
                path: origin.to_path_buf(),
                issues: vec!["incomplete configuration".to_string()],
            }),
        }
    }
}

fn read_template(fields: &mut FieldReader<'_>, key: &str, allow_empty: bool) -> Option<Template> {
    let source = if allow_empty {
        fields.required_text(key)?
    } else {
        fields.required_string(key)?
    };
    match Template::parse(&source) {
        Ok(template) => Some(template),
        Err(e) => {
            fields.issue(format!("field `{}`: {}", key, e));
            None
        }
    }
}

fn read_variables(value: &Value, fields: &mut FieldReader<'_>) -> Option<Variables> {
    let Some(map) = value.as_object() else {
        fields.issue(format!(
            "field `variables` must be an object of lists, found {}",
            type_name(value)
        ));
        return None;
    };

    let mut variables = Variables::new();
    let mut valid = true;

    for (name, candidates) in map {
        if name.trim().is_empty() {
            fields.issue("variable names must not be empty");
            valid = false;
            continue;
        }

        let Some(candidates) = candidates.as_array() else {
            fields.issue(format!(
                "variable `{}` must be a list of values, found {}",
                name,
                type_name(candidates)
            ));
            valid = false;
            continue;
        };

        if candidates.is_empty() {
            fields.issue(format!("variable `{}` has no values", name));
            valid = false;
            continue;
        }

        let mut values = Vec::with_capacity(candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            match ParamValue::from_json(candidate) {
                Some(v) => values.push(v),
                None => {
                    fields.issue(format!(
                        "variable `{}[{}]` must be a string, number or boolean, found {}",
                        name,
                        i,
                        type_name(candidate)
                    ));
                    valid = false;
                }
            }
        }
        variables.push(name.clone(), values);
    }

    valid.then_some(variables)
}
