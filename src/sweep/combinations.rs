// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lazy Cartesian product over sweep variables

use super::variables::{ParamValue, Variables};
use std::fmt;

/// One point of the sweep: each variable bound to a single value,
/// in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Combination<'a> {
    entries: Vec<(&'a str, &'a ParamValue)>,
}

impl<'a> Combination<'a> {
    pub fn get(&self, name: &str) -> Option<&'a ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn entries(&self) -> &[(&'a str, &'a ParamValue)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a ParamValue)> for Combination<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a ParamValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// `A=1, B=x` style label used in progress and failure lines
impl fmt::Display for Combination<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("(no variables)");
        }
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// Iterator over every combination, first variable varying slowest.
///
/// Works like an odometer: the last index is bumped first and carries
/// leftwards. An empty variable set yields a single empty combination; a
/// variable with no values yields nothing.
pub struct Combinations<'a> {
    variables: &'a Variables,
    indices: Vec<usize>,
    remaining: usize,
}

impl<'a> Combinations<'a> {
    pub fn new(variables: &'a Variables) -> Self {
        Self {
            variables,
            indices: vec![0; variables.len()],
            remaining: variables.combination_count(),
        }
    }

    fn advance(&mut self) {
        for (slot, variable) in self.indices.iter_mut().zip(self.variables.iter()).rev() {
            *slot += 1;
            if *slot < variable.values.len() {
                return;
            }
            *slot = 0;
        }
    }
}

impl<'a> Iterator for Combinations<'a> {
    type Item = Combination<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let combination = self
            .variables
            .iter()
            .zip(&self.indices)
            .map(|(variable, &i)| (variable.name.as_str(), &variable.values[i]))
            .collect();
        self.remaining -= 1;
        self.advance();
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl Variables {
    /// Enumerate the full Cartesian product of the variable values
    pub fn combinations(&self) -> Combinations<'_> {
        Combinations::new(self)
    }
}
