// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use core::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

/// Drive side of a differential-drive vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorChannel {
    Left,
    Right,
}

impl MotorChannel {
    pub const ALL: [MotorChannel; 2] = [MotorChannel::Left, MotorChannel::Right];
}

impl fmt::Display for MotorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorChannel::Left => write!(f, "left"),
            MotorChannel::Right => write!(f, "right"),
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// Direction for a signed drive value. Zero counts as forward.
    pub fn of(value: f32) -> Self {
        if value >= 0.0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// Motor driver abstraction (H-bridge with PWM enable + direction pin)
pub trait MotorDriver {
    /// Platform-specific error type
    type Error: Debug;

    /// Set duty cycle and direction for one channel
    ///
    /// # Arguments
    /// * `channel` - Motor to drive
    /// * `duty` - Duty cycle in [0.0, 1.0]
    /// * `direction` - Rotation direction
    fn set_duty_and_direction(
        &mut self,
        channel: MotorChannel,
        duty: f32,
        direction: Direction,
    ) -> Result<(), Self::Error>;
}

impl<T: MotorDriver + ?Sized> MotorDriver for &mut T {
    type Error = T::Error;

    fn set_duty_and_direction(
        &mut self,
        channel: MotorChannel,
        duty: f32,
        direction: Direction,
    ) -> Result<(), Self::Error> {
        (**self).set_duty_and_direction(channel, duty, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_of_sign() {
        assert_eq!(Direction::of(0.3), Direction::Forward);
        assert_eq!(Direction::of(0.0), Direction::Forward);
        assert_eq!(Direction::of(-0.01), Direction::Reverse);
    }
}
