// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Vehicles
//!
//! Numeric and control substrate for a small autonomous ground robot: noisy,
//! uncalibrated sensor samples in, bounded motor commands out.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  vehicles-hal: AnalogSource, DigitalSource, MotorDriver  │
//! └──────────────────────────────────────────────────────────┘
//!                          ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │  vehicles-sensorimotor: calibration, sensors, interlock  │
//! │  vehicles-neural: weights, squash, relaxation neurons    │
//! └──────────────────────────────────────────────────────────┘
//!                          ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │  vehicles-config / vehicles-observability                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use vehicles::prelude::*;
//!
//! let config = vehicles::config::load_config(None, None)?;
//! let hardware = VehicleHardware { left, front, right, bump, motors };
//! let mut controller = build_controller(&config, hardware, &mut rand::thread_rng())?;
//! loop {
//!     controller.tick(Duration::from_millis(config.network.tick_ms))?;
//! }
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use vehicles_config as config;
pub use vehicles_hal as hal;
pub use vehicles_neural as neural;
pub use vehicles_observability as observability;
pub use vehicles_sensorimotor as sensorimotor;

use rand::Rng;
use tracing::{debug, info};
use vehicles_config::VehiclesConfig;
use vehicles_hal::{AnalogSource, DigitalSource, MotorDriver};
use vehicles_neural::WeightMatrix;
use vehicles_sensorimotor::{
    Bumper, InterlockConfig, LightSensor, MotorInterlock, RangeSensor, SensorArray,
    SensorimotorController, SensorimotorError,
};

/// Convenience re-exports
pub mod prelude {
    pub use crate::{build_controller, VehicleHardware};
    pub use vehicles_config::VehiclesConfig;
    pub use vehicles_hal::{
        AnalogSource, DigitalSource, Direction, MotorChannel, MotorDriver, TimeProvider,
    };
    pub use vehicles_neural::{Activation, RelaxationNeuron, RelaxationParameters, WeightMatrix};
    pub use vehicles_sensorimotor::{
        CalibratedChannel, DriveCommand, MotorInterlock, Sensor, SensorArray,
        SensorimotorController, SensorimotorError,
    };
}

/// Hardware capabilities of the standard vehicle.
///
/// The platform layer opens each source on the pin named by
/// `config.channels`; the controller only sees the opened capabilities.
pub struct VehicleHardware<L, F, R, B, M> {
    pub left: L,
    pub front: F,
    pub right: R,
    pub bump: B,
    pub motors: M,
}

/// Assemble a controller from configuration.
///
/// Sensors are wired in the order `[left, front, right, bump]` after the bias
/// unit, as far as `network.inputs` allows. Weights start uniformly random in
/// `[mutation_min, mutation_max]`.
pub fn build_controller<L, F, R, B, M, G>(
    config: &VehiclesConfig,
    hardware: VehicleHardware<L, F, R, B, M>,
    rng: &mut G,
) -> Result<SensorimotorController<M>, SensorimotorError>
where
    L: AnalogSource + 'static,
    F: AnalogSource + 'static,
    R: AnalogSource + 'static,
    B: DigitalSource + 'static,
    M: MotorDriver,
    G: Rng + ?Sized,
{
    let window = config.calibration.window().ok_or(SensorimotorError::InvalidParameter(
        "calibration.smoothing_window must be at least 1",
    ))?;
    let inputs = config.network.inputs;

    let mut sensors = SensorArray::new(config.calibration.uncalibrated_default);
    if sensors.width() < inputs {
        sensors.push(LightSensor::new(hardware.left));
    }
    if sensors.width() < inputs {
        sensors.push(RangeSensor::new(hardware.front, window));
    }
    if sensors.width() < inputs {
        sensors.push(LightSensor::new(hardware.right));
    }
    if sensors.width() < inputs {
        sensors.push(Bumper::new(hardware.bump));
    }

    let weights = WeightMatrix::random(
        inputs,
        config.network.outputs,
        config.network.mutation_min,
        config.network.mutation_max,
        rng,
    )?;
    let slopes = vec![config.network.slope; config.network.outputs];
    let interlock = MotorInterlock::new(
        hardware.motors,
        InterlockConfig {
            settle_pause: config.motors.settle_pause(),
            stop_band: config.motors.stop_band,
        },
    );

    let controller = SensorimotorController::new(sensors, weights, slopes, interlock)?;
    let controller = if config.neuron.enabled {
        controller.with_neurons(config.neuron.parameters(), config.neuron.activation)?
    } else {
        controller
    };

    info!(
        inputs,
        outputs = config.network.outputs,
        neurons = config.neuron.enabled,
        board = ?config.board.variant,
        "controller assembled"
    );
    debug!(
        left = config.channels.left,
        front = config.channels.front,
        right = config.channels.right,
        bump = config.channels.bump,
        "sensor channel map"
    );
    Ok(controller)
}
