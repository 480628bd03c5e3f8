// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Vehicles Hardware Abstraction Layer
//!
//! Platform-agnostic capability traits consumed by the sensorimotor core:
//!
//! | Trait | Capability |
//! | ----- | ---------- |
//! | [`AnalogSource`] | Bounded raw ADC samples |
//! | [`DigitalSource`] | Raw digital pin level |
//! | [`MotorDriver`] | Duty cycle and direction per motor channel |
//! | [`TimeProvider`] | Monotonic time and blocking delay |
//!
//! Platforms implement these against their own pin/ADC/PWM registers; the
//! `std` feature adds a desktop clock for simulation.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod hal;
pub mod platforms;

pub use hal::{
    AnalogSource, DigitalSource, Direction, MotorChannel, MotorDriver, TimeProvider,
};

#[cfg(feature = "std")]
pub use platforms::StdClock;
