// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # vehicles-observability
//!
//! Logging setup shared by every vehicles binary, with per-crate debug flag
//! support (`--debug-vehicles-neural`, `--debug-all`, `VEHICLES_DEBUG=...`).

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "vehicles",
    "vehicles-config",
    "vehicles-hal",
    "vehicles-neural",
    "vehicles-sensorimotor",
];
