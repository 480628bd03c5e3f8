// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use tracing::{trace, warn};

use super::Sensor;
use crate::error::{Result, SensorimotorError};
use vehicles_neural::BIAS_LEVEL;

/// Ordered sensors that fill a network input vector.
///
/// Slot 0 always carries the bias unit; sensor `k` fills slot `k + 1`.
pub struct SensorArray {
    sensors: Vec<Box<dyn Sensor>>,
    uncalibrated_default: f32,
}

impl SensorArray {
    pub fn new(uncalibrated_default: f32) -> Self {
        Self {
            sensors: Vec::new(),
            uncalibrated_default,
        }
    }

    pub fn with_sensor(mut self, sensor: impl Sensor + 'static) -> Self {
        self.push(sensor);
        self
    }

    pub fn push(&mut self, sensor: impl Sensor + 'static) {
        self.sensors.push(Box::new(sensor));
    }

    /// Number of slots written by [`fill_input`](Self::fill_input), bias included.
    pub fn width(&self) -> usize {
        self.sensors.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Write `[bias, sensor_0, sensor_1, ...]` into `data`, stopping at whichever ends first.
    ///
    /// A sensor that is not calibrated yet contributes the configured default.
    /// Slots beyond the last sensor are left untouched.
    pub fn fill_input(&mut self, data: &mut [f32]) -> Result<()> {
        let Some((bias, rest)) = data.split_first_mut() else {
            return Ok(());
        };
        *bias = BIAS_LEVEL;

        for (slot, sensor) in rest.iter_mut().zip(self.sensors.iter_mut()) {
            *slot = match sensor.read() {
                Ok(value) => value,
                Err(SensorimotorError::InsufficientCalibration { min, max }) => {
                    warn!(
                        sensor = sensor.name(),
                        min,
                        max,
                        default = self.uncalibrated_default,
                        "sensor not calibrated yet, using default"
                    );
                    self.uncalibrated_default
                }
                Err(err) => return Err(err),
            };
            trace!(sensor = sensor.name(), value = *slot, "sensor input");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{Bumper, LightSensor};
    use std::collections::VecDeque;
    use vehicles_hal::{AnalogSource, DigitalSource};

    struct Samples(VecDeque<i32>);

    impl AnalogSource for Samples {
        type Error = &'static str;

        fn read_raw(&mut self) -> core::result::Result<i32, Self::Error> {
            self.0.pop_front().ok_or("exhausted")
        }
    }

    struct Pin(bool);

    impl DigitalSource for Pin {
        type Error = ();

        fn read_raw(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_fill_input_uses_default_until_calibrated() {
        let mut array = SensorArray::new(0.5)
            .with_sensor(LightSensor::new(Samples(VecDeque::from([100, 300, 150]))))
            .with_sensor(Bumper::new(Pin(false)));
        let mut data = [0.0; 3];

        array.fill_input(&mut data).unwrap();
        assert_eq!(data, [1.0, 0.5, 1.0]);

        array.fill_input(&mut data).unwrap();
        assert_eq!(data, [1.0, 0.5, 1.0]);

        array.fill_input(&mut data).unwrap();
        assert_eq!(data, [1.0, 0.25, 1.0]);
        assert_eq!(array.width(), 3);
    }

    #[test]
    fn test_fill_input_respects_buffer_length() {
        let mut array = SensorArray::new(0.5).with_sensor(Bumper::new(Pin(true)));
        let mut short = [9.0; 1];
        array.fill_input(&mut short).unwrap();
        assert_eq!(short, [1.0]);

        let mut long = [9.0; 4];
        array.fill_input(&mut long).unwrap();
        assert_eq!(long, [1.0, 0.0, 9.0, 9.0]);

        let mut empty: [f32; 0] = [];
        assert!(array.fill_input(&mut empty).is_ok());
    }

    #[test]
    fn test_source_failure_propagates() {
        let mut array = SensorArray::new(0.5).with_sensor(LightSensor::new(Samples(VecDeque::new())));
        let mut data = [0.0; 2];
        assert!(matches!(
            array.fill_input(&mut data),
            Err(SensorimotorError::Source(_))
        ));
    }
}
