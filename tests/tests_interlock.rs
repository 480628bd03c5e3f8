// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Blocking interlock behavior against a fake clock, configured from a file.

use std::cell::Cell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::io::Write;

use vehicles::config::load_config;
use vehicles::prelude::*;
use vehicles::sensorimotor::{InterlockConfig, MotorCommand};

#[derive(Default)]
struct Recorder {
    writes: Vec<(MotorChannel, f32, Direction)>,
}

impl MotorDriver for Recorder {
    type Error = Infallible;

    fn set_duty_and_direction(
        &mut self,
        channel: MotorChannel,
        duty: f32,
        direction: Direction,
    ) -> Result<(), Self::Error> {
        self.writes.push((channel, duty, direction));
        Ok(())
    }
}

#[derive(Default)]
struct FakeClock {
    now_us: Cell<u64>,
}

impl TimeProvider for FakeClock {
    fn get_time_us(&self) -> u64 {
        self.now_us.get()
    }

    fn delay_us(&self, us: u32) {
        self.now_us.set(self.now_us.get() + us as u64);
    }
}

fn interlock_from_file(toml: &str) -> MotorInterlock<Recorder> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(toml.as_bytes()).unwrap();

    let mut cli = HashMap::new();
    cli.insert("stop_band".to_string(), "0.2".to_string());
    let config = load_config(Some(file.path()), Some(&cli)).unwrap();

    MotorInterlock::new(
        Recorder::default(),
        InterlockConfig {
            settle_pause: config.motors.settle_pause(),
            stop_band: config.motors.stop_band,
        },
    )
}

#[test]
fn test_blocking_output_waits_configured_pause() {
    let mut interlock = interlock_from_file("[motors]\nsettle_pause_ms = 250\n");
    let clock = FakeClock::default();

    interlock.output(0.5, 0.5, &clock).unwrap();
    assert_eq!(clock.get_time_ms(), 0);

    interlock.output(-0.3, 0.5, &clock).unwrap();
    assert_eq!(clock.get_time_ms(), 250);
    assert!(!interlock.is_settling());
    assert_eq!(interlock.previous(), DriveCommand::new(-0.3, 0.5));

    let writes = &interlock.driver().writes;
    assert_eq!(writes.len(), 6);
    assert!(writes[2..4].iter().all(|&(_, duty, _)| duty == 0.0));
    assert_eq!(writes[4], (MotorChannel::Left, 0.3, Direction::Reverse));
    assert_eq!(writes[5], (MotorChannel::Right, 0.5, Direction::Forward));
}

#[test]
fn test_cli_stop_band_zeroes_small_commands() {
    let mut interlock = interlock_from_file("[motors]\nstop_band = 0.05\n");
    let clock = FakeClock::default();

    interlock.output(0.15, -0.15, &clock).unwrap();

    assert_eq!(interlock.config().stop_band, 0.2);
    assert!(interlock
        .driver()
        .writes
        .iter()
        .all(|&(_, duty, _)| duty == 0.0));
    assert_eq!(interlock.previous(), DriveCommand::new(0.15, -0.15));
}

#[test]
fn test_duty_counts_scale_to_pwm_range() {
    let command = MotorCommand::from_drive(-0.5);
    assert_eq!(command.direction, Direction::Reverse);
    assert_eq!(command.duty_counts(255), 127);
    assert_eq!(MotorCommand::from_drive(1.0).duty_counts(255), 255);
}
