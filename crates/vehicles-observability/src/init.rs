// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;

/// Install a console `tracing` subscriber.
///
/// `RUST_LOG`, when set, takes precedence over the debug flags.
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags
/// * `default_level` - Level for everything not flagged (e.g. `"info"`)
pub fn init_logging(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<()> {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid RUST_LOG filter: {}", directives))?,
        Err(_) => {
            let filter = debug_flags.to_filter_string(&default_level.to_lowercase());
            EnvFilter::try_new(&filter)
                .with_context(|| format!("Invalid log filter: {}", filter))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(debug_flags.any_enabled())
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
