// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Analog and digital sample sources.
pub mod input;
/// Motor driver output traits.
pub mod motor;
/// Timekeeping abstractions (monotonic timers, delays).
pub mod time;

pub use input::{AnalogSource, DigitalSource};
pub use motor::{Direction, MotorChannel, MotorDriver};
pub use time::TimeProvider;
