// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sweep variables and their candidate values

use serde::Deserialize;
use std::fmt;

/// A single candidate value of a sweep variable
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl ParamValue {
    /// Convert a JSON scalar, rejecting arrays, objects and null
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Render as an OpenSCAD literal for a `-D name=value` definition.
    ///
    /// Text is quoted with `"` and `\` escaped; numbers and booleans are bare.
    pub fn to_scad_literal(&self) -> String {
        match self {
            ParamValue::Text(s) => {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('"');
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push('"');
                out
            }
            other => other.to_string(),
        }
    }
}

/// Natural string form, used when rendering name templates
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Number(n.into())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// A named variable with its ordered candidate values
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub values: Vec<ParamValue>,
}

/// Sweep variables in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables(Vec<Variable>);

impl Variables {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a variable. Declaration order is enumeration order.
    pub fn push(&mut self, name: impl Into<String>, values: Vec<ParamValue>) {
        self.0.push(Variable {
            name: name.into(),
            values,
        });
    }

    pub fn with(mut self, name: impl Into<String>, values: Vec<ParamValue>) -> Self {
        self.push(name, values);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|v| v.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|v| v.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of combinations in the full product, saturating on overflow
    pub fn combination_count(&self) -> usize {
        self.0
            .iter()
            .fold(1usize, |acc, v| acc.saturating_mul(v.values.len()))
    }
}
