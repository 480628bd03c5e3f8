// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every problem is collected and reported together.

use crate::{ConfigError, ConfigResult, VehiclesConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &VehiclesConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every validation failure in `config`, empty if it is valid.
pub fn collect_errors(config: &VehiclesConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    let mut invalid = |field: &str, reason: String| {
        errors.push(ConfigValidationError::InvalidValue {
            field: field.to_string(),
            reason,
        })
    };

    if config.calibration.smoothing_window == 0 {
        invalid("calibration.smoothing_window", "must be at least 1".to_string());
    }
    if !(0.0..=1.0).contains(&config.calibration.uncalibrated_default) {
        invalid(
            "calibration.uncalibrated_default",
            format!("{} is outside [0, 1]", config.calibration.uncalibrated_default),
        );
    }
    if !(0.0..1.0).contains(&config.motors.stop_band) {
        invalid(
            "motors.stop_band",
            format!("{} is outside [0, 1)", config.motors.stop_band),
        );
    }
    if config.motors.pwm_full_scale == 0 {
        invalid("motors.pwm_full_scale", "must be positive".to_string());
    }
    if let Err(err) = config.neuron.parameters().validate() {
        invalid("neuron", err.to_string());
    }
    if config.network.inputs < 2 {
        invalid(
            "network.inputs",
            format!("{} is below 2 (bias plus at least one sensor)", config.network.inputs),
        );
    }
    if config.network.outputs < 2 {
        invalid(
            "network.outputs",
            format!("{} is below 2 (one per motor)", config.network.outputs),
        );
    }
    if config.network.mutation_min > config.network.mutation_max {
        invalid(
            "network.mutation_min",
            format!(
                "{} is greater than mutation_max {}",
                config.network.mutation_min, config.network.mutation_max
            ),
        );
    }
    if config.network.tick_ms == 0 {
        invalid("network.tick_ms", "must be positive".to_string());
    }

    errors
}
