// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-vehicles-neural`, `--debug-vehicles-sensorimotor`, etc.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Crates with debug logging switched on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`, plus `--debug-all`.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enabled_crates.insert(crate_name.to_string());
            }
        }
        flags
    }

    pub fn enable_all(&mut self) {
        self.enabled_crates
            .extend(KNOWN_CRATES.iter().map(|name| name.to_string()));
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Filter string for `EnvFilter`, e.g. `"vehicles_neural=debug,info"`.
    ///
    /// Crate names are converted to their module-path form (`-` → `_`),
    /// which is what `tracing` targets use.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        self.enabled_crates
            .iter()
            .map(|name| format!("{}=debug", name.replace('-', "_")))
            .chain(std::iter::once(default_level.to_string()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Parse debug flags from process arguments and the `VEHICLES_DEBUG` environment variable
///
/// `VEHICLES_DEBUG` is either `all` or a comma-separated list of crate names.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("VEHICLES_DEBUG") {
        apply_debug_env(&mut flags, &env_var);
    }
    flags
}

fn apply_debug_env(flags: &mut CrateDebugFlags, value: &str) {
    if value == "all" {
        flags.enable_all();
        return;
    }
    for crate_name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        flags.enabled_crates.insert(crate_name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_args_picks_debug_flags() {
        let flags = CrateDebugFlags::from_args(args(&[
            "vehicle_sim",
            "--debug-vehicles-neural",
            "--ticks",
            "10",
        ]));
        assert!(flags.is_enabled("vehicles-neural"));
        assert!(!flags.is_enabled("vehicles-config"));
        assert_eq!(flags.log_level("vehicles-neural"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("vehicles-hal"), tracing::Level::INFO);
    }

    #[test]
    fn test_debug_all_enables_known_crates() {
        let flags = CrateDebugFlags::from_args(args(&["--debug-all"]));
        for name in KNOWN_CRATES {
            assert!(flags.is_enabled(name));
        }
    }

    #[test]
    fn test_filter_string_uses_module_paths() {
        let flags = CrateDebugFlags::from_args(args(&[
            "--debug-vehicles-sensorimotor",
            "--debug-vehicles-neural",
        ]));
        assert_eq!(
            flags.to_filter_string("warn"),
            "vehicles_neural=debug,vehicles_sensorimotor=debug,warn"
        );
        assert_eq!(CrateDebugFlags::default().to_filter_string("info"), "info");
    }

    #[test]
    fn test_env_list_is_trimmed() {
        let mut flags = CrateDebugFlags::default();
        apply_debug_env(&mut flags, " vehicles-hal , ,vehicles-config");
        assert!(flags.is_enabled("vehicles-hal"));
        assert!(flags.is_enabled("vehicles-config"));
        assert_eq!(flags.enabled_crates.len(), 2);
    }
}
