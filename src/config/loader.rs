// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reading configuration documents and collecting field problems

use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// On-disk configuration syntax, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Read and parse a configuration file into its top-level table
pub fn load_document(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content, ConfigFormat::from_path(path), path)
}

/// Parse configuration text. `origin` is only used in error messages.
pub fn parse_document(
    source: &str,
    format: ConfigFormat,
    origin: &Path,
) -> Result<Map<String, Value>, ConfigError> {
    let value: Value = match format {
        ConfigFormat::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(source).map_err(|e| e.to_string()),
    }
    .map_err(|message| ConfigError::Parse {
        path: origin.to_path_buf(),
        message,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::Invalid {
            path: origin.to_path_buf(),
            issues: vec![format!(
                "top level must be an object, found {}",
                type_name(&other)
            )],
        }),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Typed access to a configuration table that records every problem
/// instead of stopping at the first one
pub(crate) struct FieldReader<'a> {
    doc: &'a Map<String, Value>,
    issues: Vec<String>,
}

impl<'a> FieldReader<'a> {
    pub fn new(doc: &'a Map<String, Value>) -> Self {
        Self {
            doc,
            issues: Vec::new(),
        }
    }

    pub fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(message.into());
    }

    pub fn required(&mut self, key: &str) -> Option<&'a Value> {
        let value = self.doc.get(key);
        if value.is_none() {
            self.issue(format!("missing field `{}`", key));
        }
        value
    }

    pub fn required_string(&mut self, key: &str) -> Option<String> {
        let value = self.required(key)?;
        self.expect_string(key, value)
    }

    /// Like `required_string`, but an empty string is a valid value
    pub fn required_text(&mut self, key: &str) -> Option<String> {
        let value = self.required(key)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.wrong_type(key, value);
                None
            }
        }
    }

    pub fn optional_string(&mut self, key: &str) -> Option<String> {
        let value = self.doc.get(key)?;
        self.expect_string(key, value)
    }

    pub fn required_path(&mut self, key: &str) -> Option<PathBuf> {
        self.required_string(key).map(PathBuf::from)
    }

    /// Optional list of strings, empty when absent
    pub fn string_list(&mut self, key: &str) -> Vec<String> {
        let Some(value) = self.doc.get(key) else {
            return Vec::new();
        };
        let Some(items) = value.as_array() else {
            self.issue(format!(
                "field `{}` must be a list of strings, found {}",
                key,
                type_name(value)
            ));
            return Vec::new();
        };

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => self.issue(format!(
                    "field `{}[{}]` must be a string, found {}",
                    key,
                    i,
                    type_name(item)
                )),
            }
        }
        out
    }

    fn expect_string(&mut self, key: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) if s.trim().is_empty() => {
                self.issue(format!("field `{}` must not be empty", key));
                None
            }
            Some(s) => Some(s.to_string()),
            None => {
                self.wrong_type(key, value);
                None
            }
        }
    }

    fn wrong_type(&mut self, key: &str, value: &Value) {
        self.issue(format!(
            "field `{}` must be a string, found {}",
            key,
            type_name(value)
        ));
    }

    /// Fail with every recorded issue, if there are any
    pub fn finish(self, origin: &Path) -> Result<(), ConfigError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                path: origin.to_path_buf(),
                issues: self.issues,
            })
        }
    }
}
