// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Closed-loop vehicle simulation.
//!
//! Runs the configured controller against a simulated light-seeking vehicle:
//! two light sensors either side of the heading, a noisy range finder, a bump
//! switch and a differential drive whose duty cycles turn the vehicle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use vehicles::prelude::*;
use vehicles::observability::{init_logging, parse_debug_flags};
use vehicles::sensorimotor::MotorCommand;

/// Sensor offset from the heading, radians
const SENSOR_ANGLE: f32 = 0.4;
/// Heading change per unit of duty difference per second
const TURN_RATE: f32 = 1.5;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: vehicle_sim [--config <path>] [--ticks <n>] [--seed <n>] [key=value ...]\n\n\
         Overrides (key=value): settle_pause_ms, smoothing_window, stop_band, tick_ms,\n\
         neurons, board, log_level\n\
         Debug flags: --debug-all, --debug-vehicles-neural, --debug-vehicles-sensorimotor, ...\n"
    );
    process::exit(2);
}

struct Args {
    config: Option<PathBuf>,
    ticks: usize,
    seed: u64,
    overrides: HashMap<String, String>,
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        ticks: 500,
        seed: 1,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config = Some(PathBuf::from(v));
            }
            "--ticks" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.ticks = v.parse().unwrap_or_else(|_| usage_and_exit());
            }
            "--seed" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.seed = v.parse().unwrap_or_else(|_| usage_and_exit());
            }
            "-h" | "--help" => usage_and_exit(),
            other if other.starts_with("--debug-") => {}
            other => match other.split_once('=') {
                Some((key, value)) => {
                    parsed.overrides.insert(key.to_string(), value.to_string());
                }
                None => {
                    eprintln!("Unknown argument: {other}");
                    usage_and_exit();
                }
            },
        }
    }
    parsed
}

/// Shared simulated environment.
struct World {
    heading: f32,
    left_duty: f32,
    right_duty: f32,
    rng: StdRng,
}

impl World {
    fn light(&mut self, offset: f32) -> i32 {
        let noise: f32 = self.rng.gen_range(-20.0..20.0);
        (512.0 + 400.0 * (self.heading + offset).cos() + noise) as i32
    }

    fn step(&mut self, dt: f32) {
        self.heading += (self.right_duty - self.left_duty) * TURN_RATE * dt;
    }
}

type SharedWorld = Rc<RefCell<World>>;

struct SimLight {
    world: SharedWorld,
    offset: f32,
}

impl AnalogSource for SimLight {
    type Error = std::convert::Infallible;

    fn read_raw(&mut self) -> Result<i32, Self::Error> {
        Ok(self.world.borrow_mut().light(self.offset))
    }
}

struct SimRange {
    world: SharedWorld,
}

impl AnalogSource for SimRange {
    type Error = std::convert::Infallible;

    fn read_raw(&mut self) -> Result<i32, Self::Error> {
        Ok(self.world.borrow_mut().rng.gen_range(300..700))
    }
}

struct SimBump;

impl DigitalSource for SimBump {
    type Error = std::convert::Infallible;

    fn read_raw(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

struct SimMotors {
    world: SharedWorld,
    full_scale: u16,
}

impl MotorDriver for SimMotors {
    type Error = std::convert::Infallible;

    fn set_duty_and_direction(
        &mut self,
        channel: MotorChannel,
        duty: f32,
        direction: Direction,
    ) -> Result<(), Self::Error> {
        let signed = match direction {
            Direction::Forward => duty,
            Direction::Reverse => -duty,
        };
        let mut world = self.world.borrow_mut();
        match channel {
            MotorChannel::Left => world.left_duty = signed,
            MotorChannel::Right => world.right_duty = signed,
        }
        tracing::debug!(
            %channel,
            counts = MotorCommand { duty, direction }.duty_counts(self.full_scale),
            ?direction,
            "pwm write"
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = parse_args();

    let config = match &args.config {
        Some(path) => vehicles::config::load_config(Some(path.as_path()), Some(&args.overrides))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let mut config = VehiclesConfig::default();
            vehicles::config::apply_environment_overrides(&mut config);
            vehicles::config::apply_cli_overrides(&mut config, &args.overrides);
            vehicles::config::validate_config(&config)?;
            config
        }
    };

    init_logging(&parse_debug_flags(), &config.logging.level)?;

    let world = Rc::new(RefCell::new(World {
        heading: 1.2,
        left_duty: 0.0,
        right_duty: 0.0,
        rng: StdRng::seed_from_u64(args.seed),
    }));
    let hardware = VehicleHardware {
        left: SimLight {
            world: world.clone(),
            offset: SENSOR_ANGLE,
        },
        front: SimRange {
            world: world.clone(),
        },
        right: SimLight {
            world: world.clone(),
            offset: -SENSOR_ANGLE,
        },
        bump: SimBump,
        motors: SimMotors {
            world: world.clone(),
            full_scale: config.motors.pwm_full_scale,
        },
    };

    let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(1));
    let mut controller = build_controller(&config, hardware, &mut rng)?;
    let dt = Duration::from_millis(config.network.tick_ms);

    for tick in 0..args.ticks {
        let report = controller.tick(dt)?;
        world.borrow_mut().step(dt.as_secs_f32());

        if tick % 50 == 0 {
            info!(
                tick,
                heading = world.borrow().heading,
                left = report.command.left,
                right = report.command.right,
                settling = report.settling,
                "sim"
            );
        }
    }

    info!(heading = world.borrow().heading, ticks = args.ticks, "simulation finished");
    Ok(())
}
