// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end controller tests: configuration to assembled controller to
//! motor writes, with scripted hardware.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use vehicles::config::loader::parse_config;
use vehicles::prelude::*;
use vehicles::sensorimotor::InterlockConfig;

/// Replays the scripted samples, then repeats the last one.
struct Script {
    samples: VecDeque<i32>,
    last: i32,
}

impl Script {
    fn new(samples: &[i32]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            last: samples.last().copied().unwrap_or(0),
        }
    }

    fn constant(value: i32) -> Self {
        Self::new(&[value])
    }
}

impl AnalogSource for Script {
    type Error = Infallible;

    fn read_raw(&mut self) -> Result<i32, Self::Error> {
        if let Some(sample) = self.samples.pop_front() {
            self.last = sample;
        }
        Ok(self.last)
    }
}

struct Switch(bool);

impl DigitalSource for Switch {
    type Error = Infallible;

    fn read_raw(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0)
    }
}

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

fn hardware(
    left: Script,
    right: Script,
    bump_released: bool,
) -> VehicleHardware<Script, Script, Script, Switch, Recorder> {
    VehicleHardware {
        left,
        front: Script::constant(400),
        right,
        bump: Switch(bump_released),
        motors: Recorder::default(),
    }
}

#[test]
fn test_uncalibrated_sensors_feed_default_input() {
    let config = VehiclesConfig::default();
    let mut rng = StdRng::seed_from_u64(3);
    let mut controller = build_controller(
        &config,
        hardware(Script::constant(100), Script::constant(900), true),
        &mut rng,
    )
    .unwrap();

    let report = controller.tick(Duration::from_millis(20)).unwrap();
    assert_eq!(report.input, vec![1.0, 0.5, 0.5, 0.5, 0.0]);
    assert_eq!(report.outputs.len(), 2);
}

#[test]
fn test_light_sensor_calibrates_over_ticks() {
    let config = VehiclesConfig::default();
    let mut rng = StdRng::seed_from_u64(3);
    let mut controller = build_controller(
        &config,
        hardware(Script::new(&[100, 200, 125]), Script::constant(900), false),
        &mut rng,
    )
    .unwrap();
    let dt = Duration::from_millis(20);

    // First sample seeds the range, second widens it from zero width
    assert_eq!(controller.tick(dt).unwrap().input[1], 0.5);
    assert_eq!(controller.tick(dt).unwrap().input[1], 0.5);

    let report = controller.tick(dt).unwrap();
    assert!((report.input[1] - 0.25).abs() < 1e-6);
    // Pressed bumper (active-low)
    assert_eq!(report.input[4], 1.0);
}

#[test]
fn test_narrow_network_only_wires_leading_sensors() {
    let mut config = VehiclesConfig::default();
    config.network.inputs = 3;
    let mut rng = StdRng::seed_from_u64(9);
    let mut controller = build_controller(
        &config,
        hardware(Script::constant(100), Script::constant(100), true),
        &mut rng,
    )
    .unwrap();

    let report = controller.tick(Duration::from_millis(20)).unwrap();
    assert_eq!(report.input.len(), 3);
    assert_eq!(controller.weights().rows(), 3);
}

#[test]
fn test_reversal_brakes_through_settle_pause() {
    let driver = Recorder::default();
    let interlock = MotorInterlock::new(
        driver,
        InterlockConfig {
            settle_pause: Duration::from_millis(500),
            stop_band: 0.1,
        },
    );
    // Bias-only network: outputs are set directly by the bias weights
    let weights = WeightMatrix::from_vec(1, 2, vec![3.0, 3.0]).unwrap();
    let mut controller =
        SensorimotorController::new(SensorArray::new(0.5), weights, vec![1.0, 1.0], interlock)
            .unwrap();
    let dt = Duration::from_millis(100);

    let report = controller.tick(dt).unwrap();
    assert_eq!(report.command, DriveCommand::new(1.0, 1.0));
    assert!(!report.settling);

    controller.weights_mut().set(0, 0, -3.0).unwrap();
    controller.weights_mut().set(0, 1, -3.0).unwrap();

    let braked_at = controller.interlock().driver().writes.len();
    for _ in 0..5 {
        let report = controller.tick(dt).unwrap();
        assert!(report.command.left < 0.0);
        assert!(report.settling);
    }

    // Only the brake was written during the pause
    let writes = &controller.interlock().driver().writes;
    assert_eq!(writes.len(), braked_at + 2);
    assert!(writes[braked_at..].iter().all(|&(_, duty, _)| duty == 0.0));

    let report = controller.tick(dt).unwrap();
    assert!(!report.settling);
    let (_, duty, direction) = *controller.interlock().driver().writes.last().unwrap();
    assert_eq!(direction, Direction::Reverse);
    assert!(duty > 0.9);
}

#[test]
fn test_mutation_through_controller_keeps_lateral_symmetry() {
    let config = VehiclesConfig::default();
    let mut rng = StdRng::seed_from_u64(17);
    let mut controller = build_controller(
        &config,
        hardware(Script::constant(100), Script::constant(100), true),
        &mut rng,
    )
    .unwrap();

    for _ in 0..20 {
        let m = controller.weights_mut().mutate(-1.0, 1.0, &mut rng).unwrap();
        let weights = controller.weights();
        assert_eq!(weights.get(m.row, m.col), Some(m.value));
        assert_eq!(weights.get(m.mirror_row, m.mirror_col), Some(m.value));
        assert_ne!(m.row, 0);
    }
}

#[test]
fn test_controller_from_toml_with_neurons() {
    let config = parse_config(
        r#"
        [board]
        variant = "r3"

        [motors]
        settle_pause_ms = 200

        [neuron]
        enabled = true
        "#,
    )
    .unwrap();
    vehicles::config::validate_config(&config).unwrap();
    assert_eq!(config.channels.front, 1);
    assert_eq!(config.channels.buttons, 0);

    let mut rng = StdRng::seed_from_u64(5);
    let mut controller = build_controller(
        &config,
        hardware(Script::constant(100), Script::constant(100), true),
        &mut rng,
    )
    .unwrap();

    assert_eq!(
        controller.interlock().config().settle_pause,
        Duration::from_millis(200)
    );
    assert_eq!(controller.neurons().map(|n| n.neurons().len()), Some(2));

    let report = controller.tick(Duration::from_millis(20)).unwrap();
    assert!(report.outputs.iter().all(|o| o.is_finite()));
}
