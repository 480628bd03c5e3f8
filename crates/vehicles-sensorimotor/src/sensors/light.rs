// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use vehicles_hal::AnalogSource;

use super::{source_error, Sensor};
use crate::calibration::CalibratedChannel;
use crate::error::Result;

/// Analog light sensor normalized against its own observed range.
pub struct LightSensor<A> {
    source: A,
    channel: CalibratedChannel,
}

impl<A: AnalogSource> LightSensor<A> {
    pub fn new(source: A) -> Self {
        Self::with_channel(source, CalibratedChannel::new())
    }

    pub fn with_channel(source: A, channel: CalibratedChannel) -> Self {
        Self { source, channel }
    }

    pub fn channel(&self) -> &CalibratedChannel {
        &self.channel
    }
}

impl<A: AnalogSource> Sensor for LightSensor<A> {
    fn read(&mut self) -> Result<f32> {
        let raw = self.source.read_raw().map_err(source_error)?;
        self.channel.normalize(raw)
    }

    fn name(&self) -> &'static str {
        "light"
    }
}
