// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Sensors
//!
//! Small value types that compose a HAL source with the numeric treatment it
//! needs. Every sensor yields a normalized `f32` through [`Sensor::read`].
//!
//! - [`LightSensor`] - calibrated analog channel
//! - [`RangeSensor`] - calibrated and exponentially smoothed analog channel
//! - [`Bumper`] - active-low switch mapped to `1.0` when pressed
//! - [`Oscillator`] - clock-driven sine source
//! - [`SensorArray`] - ordered set of sensors feeding a network input vector

mod array;
mod bumper;
mod light;
mod oscillator;
mod range;

pub use array::SensorArray;
pub use bumper::Bumper;
pub use light::LightSensor;
pub use oscillator::{oscillator, Oscillator};
pub use range::RangeSensor;

use crate::error::Result;

/// Anything that can produce one normalized sample per control tick.
pub trait Sensor {
    fn read(&mut self) -> Result<f32>;

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}

impl<T: Sensor + ?Sized> Sensor for Box<T> {
    fn read(&mut self) -> Result<f32> {
        (**self).read()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

pub(crate) fn source_error<E: core::fmt::Debug>(err: E) -> crate::error::SensorimotorError {
    crate::error::SensorimotorError::Source(format!("{:?}", err))
}
