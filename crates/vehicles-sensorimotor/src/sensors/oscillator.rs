// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use core::f32::consts::TAU;

use vehicles_hal::TimeProvider;

use super::Sensor;
use crate::error::{Result, SensorimotorError};

/// `sin(2π · (now mod period) / period)`.
pub fn oscillator(period_ms: u64, now_ms: u64) -> Result<f32> {
    if period_ms == 0 {
        return Err(SensorimotorError::InvalidParameter(
            "oscillator period must be non-zero",
        ));
    }
    let phase = (now_ms % period_ms) as f32 / period_ms as f32;
    Ok((phase * TAU).sin())
}

/// Periodic drive source reading the platform clock.
pub struct Oscillator<T> {
    clock: T,
    period_ms: u64,
}

impl<T: TimeProvider> Oscillator<T> {
    pub fn new(clock: T, period_ms: u64) -> Self {
        Self { clock, period_ms }
    }
}

impl<T: TimeProvider> Sensor for Oscillator<T> {
    fn read(&mut self) -> Result<f32> {
        oscillator(self.period_ms, self.clock.get_time_ms())
    }

    fn name(&self) -> &'static str {
        "oscillator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillator_quarter_points() {
        assert!(oscillator(1000, 0).unwrap().abs() < 1e-6);
        assert!((oscillator(1000, 250).unwrap() - 1.0).abs() < 1e-6);
        assert!(oscillator(1000, 500).unwrap().abs() < 1e-5);
        assert!((oscillator(1000, 750).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_oscillator_is_periodic() {
        let a = oscillator(400, 130).unwrap();
        let b = oscillator(400, 130 + 400 * 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_period_is_rejected() {
        assert!(matches!(
            oscillator(0, 10),
            Err(SensorimotorError::InvalidParameter(_))
        ));
    }
}
