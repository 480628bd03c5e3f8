// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Calibrated Channel
//!
//! Online min/max range tracking for uncalibrated analog sensors, plus
//! exponential smoothing.
//!
//! ```text
//! normalize(raw):
//!     min = min(min, raw), max = max(max, raw)
//!     out = (raw - min) / (max - min)
//!
//! smooth(window, avg, value):
//!     out = ((window - 1) * avg + value) / window
//! ```
//!
//! A reading is only reported against a range that already had width before
//! it arrived; otherwise the range is still widened but the call returns
//! `InsufficientCalibration` so the caller can substitute a default.

use std::num::NonZeroU32;

use crate::error::{Result, SensorimotorError};

/// Running `[min, max]` range of one sensor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibratedChannel {
    min: i32,
    max: i32,
}

impl CalibratedChannel {
    /// Empty range: `min` starts above and `max` below every possible sample.
    pub fn new() -> Self {
        Self {
            min: i32::MAX,
            max: i32::MIN,
        }
    }

    /// Channel seeded with a known range.
    pub fn with_range(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Widen the range to include `raw` and rescale it to `[0, 1]`.
    ///
    /// # Errors
    /// `InsufficientCalibration` while the range (before this sample) has no width.
    pub fn normalize(&mut self, raw: i32) -> Result<f32> {
        let had_width = self.is_calibrated();
        self.min = self.min.min(raw);
        self.max = self.max.max(raw);

        if !had_width {
            return Err(SensorimotorError::InsufficientCalibration {
                min: self.min,
                max: self.max,
            });
        }

        let span = (self.max as i64 - self.min as i64) as f32;
        Ok((raw as i64 - self.min as i64) as f32 / span)
    }

    /// `true` once `max > min`.
    pub fn is_calibrated(&self) -> bool {
        self.max > self.min
    }

    /// Observed `(min, max)`, or `None` before the first sample.
    pub fn range(&self) -> Option<(i32, i32)> {
        if self.max < self.min {
            None
        } else {
            Some((self.min, self.max))
        }
    }
}

impl Default for CalibratedChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Exponential moving average over a window of `window` samples.
///
/// `window = 1` passes `value` straight through.
#[inline]
pub fn smooth(window: NonZeroU32, average: f32, value: f32) -> f32 {
    let window = window.get() as f32;
    ((window - 1.0) * average + value) / window
}

/// Stateful wrapper around [`smooth`] holding the running average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    window: NonZeroU32,
    average: f32,
}

impl Smoother {
    pub fn new(window: NonZeroU32) -> Self {
        Self {
            window,
            average: 0.0,
        }
    }

    pub fn update(&mut self, value: f32) -> f32 {
        self.average = smooth(self.window, self.average, value);
        self.average
    }

    pub fn average(&self) -> f32 {
        self.average
    }

    pub fn window(&self) -> NonZeroU32 {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn window(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_first_sample_is_insufficient() {
        let mut channel = CalibratedChannel::new();
        assert_eq!(channel.range(), None);
        assert_eq!(
            channel.normalize(512),
            Err(SensorimotorError::InsufficientCalibration { min: 512, max: 512 })
        );
        assert_eq!(channel.range(), Some((512, 512)));
    }

    #[test]
    fn test_zero_width_range_surfaces_error() {
        let mut channel = CalibratedChannel::with_range(10, 10);
        assert!(matches!(
            channel.normalize(15),
            Err(SensorimotorError::InsufficientCalibration { min: 10, max: 15 })
        ));
        // the sample still widened the range
        assert_eq!(channel.normalize(15), Ok(1.0));
        assert_eq!(channel.normalize(10), Ok(0.0));
    }

    #[test]
    fn test_normalize_rescales_within_range() {
        let mut channel = CalibratedChannel::with_range(100, 300);
        assert_eq!(channel.normalize(200), Ok(0.5));
        assert_eq!(channel.normalize(100), Ok(0.0));
        assert_eq!(channel.normalize(300), Ok(1.0));
    }

    #[test]
    fn test_out_of_range_sample_widens_range() {
        let mut channel = CalibratedChannel::with_range(100, 200);
        assert_eq!(channel.normalize(400), Ok(1.0));
        assert_eq!(channel.range(), Some((100, 400)));
        assert_eq!(channel.normalize(0), Ok(0.0));
        assert_eq!(channel.range(), Some((0, 400)));
    }

    #[test]
    fn test_output_stays_in_unit_interval_after_calibration() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut channel = CalibratedChannel::new();
        let mut distinct = Vec::new();

        for _ in 0..500 {
            let raw = rng.gen_range(0..1024);
            let result = channel.normalize(raw);
            if distinct.len() >= 2 {
                let value = result.unwrap();
                assert!((0.0..=1.0).contains(&value), "normalized {} from {}", value, raw);
            }
            if !distinct.contains(&raw) {
                distinct.push(raw);
            }
        }
    }

    #[test]
    fn test_normalize_is_monotonic_for_fixed_range() {
        let mut last = f32::MIN;
        for raw in 0..=1023 {
            let mut channel = CalibratedChannel::with_range(0, 1023);
            let value = channel.normalize(raw).unwrap();
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        let mut channel = CalibratedChannel::with_range(i32::MIN, i32::MAX);
        let value = channel.normalize(0).unwrap();
        assert!((value - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_weights_new_value_by_window() {
        assert!((smooth(window(10), 0.0, 1.0) - 0.1).abs() < 1e-7);
        assert!((smooth(window(4), 1.0, 0.0) - 0.75).abs() < 1e-7);
        assert_eq!(smooth(window(1), 0.3, 0.9), 0.9);
    }

    #[test]
    fn test_smoother_converges_to_constant_input() {
        let mut smoother = Smoother::new(window(10));
        for _ in 0..200 {
            smoother.update(0.8);
        }
        assert!((smoother.average() - 0.8).abs() < 1e-4);
    }
}
