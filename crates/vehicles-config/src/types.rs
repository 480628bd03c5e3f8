// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `vehicles_configuration.toml`.

use std::num::NonZeroU32;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vehicles_neural::{Activation, RelaxationParameters};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VehiclesConfig {
    pub board: BoardConfig,
    pub channels: ChannelConfig,
    pub calibration: CalibrationConfig,
    pub motors: MotorsConfig,
    pub neuron: NeuronConfig,
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
}

/// Board revision; decides the default analog channel map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardVariant {
    #[default]
    Standard,
    R3,
}

impl std::str::FromStr for BoardVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(BoardVariant::Standard),
            "r3" => Ok(BoardVariant::R3),
            other => Err(format!("unknown board variant '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
    pub variant: BoardVariant,
}

/// Sensor channel identifiers (ADC inputs and digital pins)
///
/// Read by the platform layer when it opens the sources handed to
/// `build_controller`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub left: u8,
    pub right: u8,
    pub front: u8,
    pub buttons: u8,
    pub bump: u8,
}

impl ChannelConfig {
    /// Default channel map for a board revision.
    pub fn for_board(variant: BoardVariant) -> Self {
        match variant {
            BoardVariant::Standard => Self::default(),
            BoardVariant::R3 => Self {
                front: 1,
                buttons: 0,
                ..Self::default()
            },
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            left: 4,
            right: 5,
            front: 0,
            buttons: 7,
            bump: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Exponential smoothing window for the range sensor (>= 1)
    pub smoothing_window: u32,
    /// Value used for a channel whose range has no width yet
    pub uncalibrated_default: f32,
}

impl CalibrationConfig {
    /// Window as a `NonZeroU32`, or `None` if it is 0.
    pub fn window(&self) -> Option<NonZeroU32> {
        NonZeroU32::new(self.smoothing_window)
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 10,
            uncalibrated_default: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotorsConfig {
    pub settle_pause_ms: u64,
    pub stop_band: f32,
    pub pwm_full_scale: u16,
}

impl MotorsConfig {
    pub fn settle_pause(&self) -> Duration {
        Duration::from_millis(self.settle_pause_ms)
    }
}

impl Default for MotorsConfig {
    fn default() -> Self {
        Self {
            settle_pause_ms: 500,
            stop_band: 0.1,
            pwm_full_scale: 255,
        }
    }
}

/// Relaxation neuron layer between network outputs and motors
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronConfig {
    pub enabled: bool,
    pub bias: f32,
    pub ta: f32,
    pub tr: f32,
    pub s: f32,
    pub b: f32,
    pub activation: Activation,
}

impl NeuronConfig {
    pub fn parameters(&self) -> RelaxationParameters {
        RelaxationParameters::new(self.bias, self.ta, self.tr, self.s, self.b)
    }
}

impl Default for NeuronConfig {
    fn default() -> Self {
        let params = RelaxationParameters::default();
        Self {
            enabled: false,
            bias: params.bias,
            ta: params.ta,
            tr: params.tr,
            s: params.s,
            b: params.b,
            activation: Activation::Identity,
        }
    }
}

/// Feed-forward network shape and mutation bounds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Input units, bias included
    pub inputs: usize,
    pub outputs: usize,
    pub slope: f32,
    pub mutation_min: f32,
    pub mutation_max: f32,
    pub tick_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            inputs: 5,
            outputs: 2,
            slope: 1.0,
            mutation_min: -1.0,
            mutation_max: 1.0,
            tick_ms: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
