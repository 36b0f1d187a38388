// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Name templates for output folders and files.
//!
//! A template is literal text with `{name}` placeholders. `{{` and `}}`
//! produce literal braces.

use super::combinations::Combination;
use super::variables::Variables;
use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed name template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed {
                            template: source.to_string(),
                            position: pos,
                        });
                    }
                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder {
                            template: source.to_string(),
                            position: pos,
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                '}' => {
                    return Err(TemplateError::UnmatchedClose {
                        template: source.to_string(),
                        position: pos,
                    });
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Placeholder names in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Check that every placeholder names a declared variable
    pub fn check_against(&self, variables: &Variables) -> Result<(), TemplateError> {
        match self.placeholders().find(|name| !variables.contains(name)) {
            Some(name) => Err(self.unknown(name)),
            None => Ok(()),
        }
    }

    /// Substitute every placeholder with the combination's value
    pub fn render(&self, combination: &Combination<'_>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = combination.get(name).ok_or_else(|| self.unknown(name))?;
                    out.push_str(&value.to_string());
                }
            }
        }
        Ok(out)
    }

    fn unknown(&self, name: &str) -> TemplateError {
        TemplateError::UnknownPlaceholder {
            template: self.source.clone(),
            name: name.to_string(),
        }
    }
}

/// Make a rendered file name safe to create.
///
/// Double quotes are dropped, spaces become `_`, and characters rejected by
/// common filesystems (`<>:|?*`, control characters) are dropped.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '"' | '<' | '>' | ':' | '|' | '?' | '*' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
