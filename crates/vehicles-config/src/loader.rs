// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! 3-tier loading:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{validate_config, BoardVariant, ChannelConfig, ConfigError, ConfigResult, VehiclesConfig};

pub const CONFIG_FILE_NAME: &str = "vehicles_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `VEHICLES_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("VEHICLES_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by VEHICLES_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet VEHICLES_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file, apply overrides and validate
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<VehiclesConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config = parse_config(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Parse TOML content. Without an explicit `[channels]` table the board
/// variant's default channel map is used.
pub fn parse_config(content: &str) -> ConfigResult<VehiclesConfig> {
    let raw: toml::Table = toml::from_str(content)?;
    let mut config: VehiclesConfig = toml::from_str(content)?;
    if !raw.contains_key("channels") {
        config.channels = ChannelConfig::for_board(config.board.variant);
    }
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `VEHICLES_LOG_LEVEL` -> `logging.level`
/// - `VEHICLES_SETTLE_PAUSE_MS` -> `motors.settle_pause_ms`
/// - `VEHICLES_SMOOTHING_WINDOW` -> `calibration.smoothing_window`
/// - `VEHICLES_BOARD` -> `board.variant` (resets `channels` to that board's map)
pub fn apply_environment_overrides(config: &mut VehiclesConfig) {
    if let Ok(value) = env::var("VEHICLES_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("VEHICLES_SETTLE_PAUSE_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.motors.settle_pause_ms = ms;
        }
    }
    if let Ok(value) = env::var("VEHICLES_SMOOTHING_WINDOW") {
        if let Ok(window) = value.parse::<u32>() {
            config.calibration.smoothing_window = window;
        }
    }
    if let Ok(value) = env::var("VEHICLES_BOARD") {
        if let Ok(variant) = value.parse::<BoardVariant>() {
            set_board(config, variant);
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Key/value pairs, e.g. `{"settle_pause_ms": "250", "board": "r3"}`
pub fn apply_cli_overrides(config: &mut VehiclesConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("settle_pause_ms") {
        if let Ok(ms) = value.parse::<u64>() {
            config.motors.settle_pause_ms = ms;
        }
    }
    if let Some(value) = cli_args.get("smoothing_window") {
        if let Ok(window) = value.parse::<u32>() {
            config.calibration.smoothing_window = window;
        }
    }
    if let Some(value) = cli_args.get("stop_band") {
        if let Ok(band) = value.parse::<f32>() {
            config.motors.stop_band = band;
        }
    }
    if let Some(value) = cli_args.get("tick_ms") {
        if let Ok(ms) = value.parse::<u64>() {
            config.network.tick_ms = ms;
        }
    }
    if let Some(value) = cli_args.get("neurons") {
        config.neuron.enabled = value.to_lowercase() == "true" || value == "1";
    }
    if let Some(value) = cli_args.get("board") {
        if let Ok(variant) = value.parse::<BoardVariant>() {
            set_board(config, variant);
        }
    }
}

fn set_board(config: &mut VehiclesConfig, variant: BoardVariant) {
    config.board.variant = variant;
    config.channels = ChannelConfig::for_board(variant);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MotorsConfig;
    use vehicles_neural::Activation;
    use std::io::Write;

    #[test]
    fn test_parse_full_file() {
        let content = r#"
            [board]
            variant = "standard"

            [channels]
            left = 2
            right = 3
            front = 1
            buttons = 7
            bump = 9

            [calibration]
            smoothing_window = 4

            [motors]
            settle_pause_ms = 250
            stop_band = 0.05

            [neuron]
            enabled = true
            bias = 0.1
            ta = 0.05
            tr = 2.0
            s = 0.2
            b = 1.5
            activation = { type = "sigmoid", slope = 4.0 }

            [network]
            inputs = 4
            outputs = 2
        "#;
        let config = parse_config(content).unwrap();

        assert_eq!(config.channels.left, 2);
        assert_eq!(config.channels.bump, 9);
        assert_eq!(config.calibration.smoothing_window, 4);
        assert_eq!(config.calibration.uncalibrated_default, 0.5);
        assert_eq!(config.motors.settle_pause_ms, 250);
        assert_eq!(config.motors.pwm_full_scale, 255);
        assert!(config.neuron.enabled);
        assert_eq!(config.neuron.activation, Activation::Sigmoid { slope: 4.0 });
        assert_eq!(config.neuron.parameters().b, 1.5);
        assert_eq!(config.network.inputs, 4);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, VehiclesConfig::default());
        assert_eq!(config.motors, MotorsConfig::default());
    }

    #[test]
    fn test_r3_board_remaps_channels_when_not_given() {
        let config = parse_config("[board]\nvariant = \"r3\"\n").unwrap();
        assert_eq!(config.channels.front, 1);
        assert_eq!(config.channels.buttons, 0);
        assert_eq!(config.channels.left, 4);

        let explicit = parse_config("[board]\nvariant = \"r3\"\n[channels]\nfront = 6\n").unwrap();
        assert_eq!(explicit.channels.front, 6);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        assert!(matches!(
            parse_config("[motors\nsettle_pause_ms = 1"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = VehiclesConfig::default();
        let mut args = HashMap::new();
        args.insert("settle_pause_ms".to_string(), "750".to_string());
        args.insert("smoothing_window".to_string(), "3".to_string());
        args.insert("board".to_string(), "R3".to_string());
        args.insert("neurons".to_string(), "true".to_string());
        args.insert("stop_band".to_string(), "not-a-number".to_string());

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.motors.settle_pause_ms, 750);
        assert_eq!(config.calibration.smoothing_window, 3);
        assert_eq!(config.board.variant, BoardVariant::R3);
        assert_eq!(config.channels.front, 1);
        assert!(config.neuron.enabled);
        assert_eq!(config.motors.stop_band, 0.1);
    }

    #[test]
    fn test_load_config_from_file_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[network]\nmutation_min = 1.0\nmutation_max = -1.0").unwrap();

        let result = load_config(Some(file.path()), None);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_config_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("absent.toml")), None);
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
