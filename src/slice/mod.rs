// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry-to-G-code conversion over a directory tree

pub mod discovery;
pub mod runner;

pub use discovery::{discover_geometry, Discovery, GeometryFile};
pub use runner::{SliceRunner, SLICE_BANNER};
