// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Variant sweep: enumerate variable combinations and compile each one

pub mod combinations;
pub mod runner;
pub mod template;
pub mod variables;

pub use combinations::{Combination, Combinations};
pub use runner::{SweepRunner, SWEEP_BANNER};
pub use template::{sanitize_filename, Template};
pub use variables::{ParamValue, Variable, Variables};
