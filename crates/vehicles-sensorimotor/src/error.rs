// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the sensorimotor layer

use vehicles_neural::NeuralError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorimotorError {
    /// A reading arrived before the channel's range had any width.
    #[error("Insufficient calibration: observed range [{min}, {max}] has no width yet")]
    InsufficientCalibration { min: i32, max: i32 },

    #[error("Sensor source failed: {0}")]
    Source(String),

    #[error("Motor driver failed: {0}")]
    Driver(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error(transparent)]
    Neural(#[from] NeuralError),
}

pub type Result<T> = core::result::Result<T, SensorimotorError>;
