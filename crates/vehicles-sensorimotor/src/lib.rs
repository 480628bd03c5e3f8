// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Vehicles Sensorimotor System
//!
//! Turns raw analog/digital samples into bounded motor commands.
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`calibration`] | Running min/max normalisation and exponential smoothing |
//! | [`sensors`] | Light, range, bumper and oscillator sensors over HAL sources |
//! | [`motors`] | Stop band and brake-and-settle reversal interlock |
//! | [`controller`] | Single-threaded tick loop wiring sensors, network and motors |

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod calibration;
pub mod controller;
pub mod error;
pub mod motors;
pub mod sensors;

pub use calibration::{smooth, CalibratedChannel, Smoother};
pub use controller::{to_drive, NeuronLayer, SensorimotorController, TickReport, MOTOR_OUTPUTS};
pub use error::{Result, SensorimotorError};
pub use motors::{DriveCommand, InterlockConfig, InterlockState, MotorCommand, MotorInterlock};
pub use sensors::{
    oscillator, Bumper, LightSensor, Oscillator, RangeSensor, Sensor, SensorArray,
};
