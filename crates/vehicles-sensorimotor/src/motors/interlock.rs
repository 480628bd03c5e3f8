// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Motor Command Interlock.
//!
//! A single battery pack cannot supply the current spike of an instant
//! direction reversal. Whenever either side would change sign, both sides are
//! braked to zero duty and held for a settle pause before the new command is
//! applied.
//!
//! The pause is an explicit state (`Settling`) advanced by the caller's tick,
//! so the same contract serves a blocking loop ([`MotorInterlock::output`])
//! and a non-blocking one ([`MotorInterlock::request`] + [`MotorInterlock::advance`]).

use std::time::Duration;

use tracing::{debug, trace};
use vehicles_hal::{Direction, MotorChannel, MotorDriver, TimeProvider};

use crate::error::{Result, SensorimotorError};

/// Interlock timing and dead-band settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterlockConfig {
    /// Hold time at zero duty before a reversal is applied
    pub settle_pause: Duration,
    /// Both sides below this magnitude are commanded to zero duty
    pub stop_band: f32,
}

impl Default for InterlockConfig {
    fn default() -> Self {
        Self {
            settle_pause: Duration::from_millis(500),
            stop_band: 0.1,
        }
    }
}

/// Normalized drive for both sides, clamped to `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveCommand {
    pub left: f32,
    pub right: f32,
}

impl DriveCommand {
    /// Clamp both sides into `[-1, 1]`. NaN becomes 0.
    pub fn new(left: f32, right: f32) -> Self {
        Self {
            left: clamp_drive(left),
            right: clamp_drive(right),
        }
    }

    /// Either side changes sign relative to `previous`.
    pub fn reverses(&self, previous: &DriveCommand) -> bool {
        self.left * previous.left < 0.0 || self.right * previous.right < 0.0
    }

    pub fn in_stop_band(&self, band: f32) -> bool {
        self.left.abs() < band && self.right.abs() < band
    }

    pub fn side(&self, channel: MotorChannel) -> f32 {
        match channel {
            MotorChannel::Left => self.left,
            MotorChannel::Right => self.right,
        }
    }
}

/// Hardware-level output for one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorCommand {
    /// Duty cycle in [0.0, 1.0]
    pub duty: f32,
    pub direction: Direction,
}

impl MotorCommand {
    pub const BRAKE: MotorCommand = MotorCommand {
        duty: 0.0,
        direction: Direction::Forward,
    };

    /// Duty and direction for a clamped drive value.
    pub fn from_drive(value: f32) -> Self {
        Self {
            duty: value.abs(),
            direction: Direction::of(value),
        }
    }

    /// Duty scaled to PWM counts (e.g. `full_scale = 255` for 8-bit PWM).
    pub fn duty_counts(&self, full_scale: u16) -> u16 {
        (self.duty.clamp(0.0, 1.0) * full_scale as f32) as u16
    }
}

/// Interlock state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterlockState {
    /// Last command applied; accepting new ones immediately.
    Idle,
    /// Braked, waiting `remaining` before applying `pending`.
    Settling {
        remaining: Duration,
        pending: DriveCommand,
    },
}

/// Stop band and reversal interlock in front of a [`MotorDriver`].
pub struct MotorInterlock<M> {
    driver: M,
    config: InterlockConfig,
    previous: DriveCommand,
    state: InterlockState,
}

impl<M: MotorDriver> MotorInterlock<M> {
    pub fn new(driver: M, config: InterlockConfig) -> Self {
        Self {
            driver,
            config,
            previous: DriveCommand::default(),
            state: InterlockState::Idle,
        }
    }

    /// Blocking form: request the command and, if a reversal was detected,
    /// stall for the whole settle pause before applying it.
    pub fn output<T: TimeProvider>(&mut self, left: f32, right: f32, clock: &T) -> Result<()> {
        self.request(left, right)?;
        if let InterlockState::Settling { remaining, .. } = self.state {
            clock.delay_ms(pause_ms(remaining));
            self.advance(remaining)?;
        }
        Ok(())
    }

    /// Non-blocking form: apply the command now, or start (or retarget) a settle pause.
    ///
    /// While settling, a new request replaces the pending command without
    /// restarting the pause.
    pub fn request(&mut self, left: f32, right: f32) -> Result<()> {
        let command = DriveCommand::new(left, right);

        if let InterlockState::Settling { remaining, .. } = self.state {
            self.state = InterlockState::Settling {
                remaining,
                pending: command,
            };
            return Ok(());
        }

        if command.reverses(&self.previous) {
            debug!(
                previous_left = self.previous.left,
                previous_right = self.previous.right,
                left = command.left,
                right = command.right,
                pause_ms = self.config.settle_pause.as_millis() as u64,
                "direction reversal: braking before applying command"
            );
            self.brake()?;
            self.state = InterlockState::Settling {
                remaining: self.config.settle_pause,
                pending: command,
            };
            return Ok(());
        }

        self.apply(command)
    }

    /// Advance the settle pause by `elapsed`; applies the pending command once it runs out.
    pub fn advance(&mut self, elapsed: Duration) -> Result<()> {
        if let InterlockState::Settling { remaining, pending } = self.state {
            let remaining = remaining.saturating_sub(elapsed);
            if remaining.is_zero() {
                debug!("settle pause complete");
                self.apply(pending)?;
            } else {
                self.state = InterlockState::Settling { remaining, pending };
            }
        }
        Ok(())
    }

    pub fn state(&self) -> InterlockState {
        self.state
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.state, InterlockState::Settling { .. })
    }

    /// Last command actually applied to the driver.
    pub fn previous(&self) -> DriveCommand {
        self.previous
    }

    pub fn config(&self) -> &InterlockConfig {
        &self.config
    }

    pub fn driver(&self) -> &M {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut M {
        &mut self.driver
    }

    pub fn into_driver(self) -> M {
        self.driver
    }

    fn apply(&mut self, command: DriveCommand) -> Result<()> {
        let stop = command.in_stop_band(self.config.stop_band);
        for channel in MotorChannel::ALL {
            let value = command.side(channel);
            let output = if stop {
                MotorCommand {
                    duty: 0.0,
                    direction: Direction::of(value),
                }
            } else {
                MotorCommand::from_drive(value)
            };
            self.write(channel, output)?;
        }
        trace!(left = command.left, right = command.right, stop, "drive applied");
        self.previous = command;
        self.state = InterlockState::Idle;
        Ok(())
    }

    fn brake(&mut self) -> Result<()> {
        for channel in MotorChannel::ALL {
            self.write(channel, MotorCommand::BRAKE)?;
        }
        Ok(())
    }

    fn write(&mut self, channel: MotorChannel, output: MotorCommand) -> Result<()> {
        self.driver
            .set_duty_and_direction(channel, output.duty, output.direction)
            .map_err(|e| SensorimotorError::Driver(format!("{:?}", e)))
    }
}

/// Whole milliseconds to block for, saturating at `u32::MAX`.
fn pause_ms(pause: Duration) -> u32 {
    u32::try_from(pause.as_millis()).unwrap_or(u32::MAX)
}

fn clamp_drive(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
