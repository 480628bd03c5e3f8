// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use vehicles_hal::AnalogSource;

use super::{LightSensor, Sensor};
use crate::calibration::{CalibratedChannel, Smoother};
use crate::error::Result;

/// Analog range finder: calibrated like a light sensor, then smoothed.
///
/// Readings that fail calibration do not touch the running average.
pub struct RangeSensor<A> {
    inner: LightSensor<A>,
    smoother: Smoother,
}

impl<A: AnalogSource> RangeSensor<A> {
    pub fn new(source: A, window: NonZeroU32) -> Self {
        Self::with_channel(source, CalibratedChannel::new(), window)
    }

    pub fn with_channel(source: A, channel: CalibratedChannel, window: NonZeroU32) -> Self {
        Self {
            inner: LightSensor::with_channel(source, channel),
            smoother: Smoother::new(window),
        }
    }

    pub fn average(&self) -> f32 {
        self.smoother.average()
    }

    pub fn channel(&self) -> &CalibratedChannel {
        self.inner.channel()
    }
}

impl<A: AnalogSource> Sensor for RangeSensor<A> {
    fn read(&mut self) -> Result<f32> {
        let value = self.inner.read()?;
        Ok(self.smoother.update(value))
    }

    fn name(&self) -> &'static str {
        "range"
    }
}
