// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration files for both pipelines.
//!
//! JSON by default, TOML for `.toml` files. Fields are validated up front and
//! all problems are reported together.

pub mod loader;
pub mod slice;
pub mod sweep;

pub use loader::{load_document, parse_document, ConfigFormat};
pub use slice::SliceConfig;
pub use sweep::SweepConfig;
