// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Sensorimotor Controller
//!
//! One tick of the control loop:
//!
//! ```text
//! sensors ──► input vector ──► weights (propagate + squash)
//!         ──► [relaxation neurons] ──► drive = 2·o − 1 ──► motor interlock
//! ```
//!
//! Output unit 0 drives the left motor, output unit 1 the right motor. Extra
//! output units are computed (and stepped through their neurons) but not wired
//! to a motor.

use std::time::Duration;

use tracing::trace;
use vehicles_hal::MotorDriver;
use vehicles_neural::{
    Activation, NeuralError, RelaxationNeuron, RelaxationParameters, WeightMatrix,
};

use crate::error::Result;
use crate::motors::{DriveCommand, MotorInterlock};
use crate::sensors::SensorArray;

/// Motor outputs needed by a differential-drive vehicle.
pub const MOTOR_OUTPUTS: usize = 2;

/// Relaxation neurons sitting between the network outputs and the motors.
#[derive(Debug, Clone)]
pub struct NeuronLayer {
    params: RelaxationParameters,
    neurons: Vec<RelaxationNeuron>,
}

impl NeuronLayer {
    pub fn new(size: usize, params: RelaxationParameters, activation: Activation) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            neurons: vec![RelaxationNeuron::new(activation); size],
        })
    }

    pub fn neurons(&self) -> &[RelaxationNeuron] {
        &self.neurons
    }

    pub fn params(&self) -> &RelaxationParameters {
        &self.params
    }

    fn update(&mut self, drives: &mut [f32], dt: f32) -> Result<()> {
        for (drive, neuron) in drives.iter_mut().zip(self.neurons.iter_mut()) {
            *drive = neuron.update(&self.params, *drive, dt)?;
        }
        Ok(())
    }
}

/// What one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Network input, bias unit first
    pub input: Vec<f32>,
    /// Output activations after squashing and neuron dynamics
    pub outputs: Vec<f32>,
    /// Drive requested from the interlock
    pub command: DriveCommand,
    /// Interlock is holding the motors braked
    pub settling: bool,
}

/// Tick-driven controller owning sensors, weights, optional neurons and the motor interlock.
pub struct SensorimotorController<M> {
    sensors: SensorArray,
    weights: WeightMatrix,
    slopes: Vec<f32>,
    neurons: Option<NeuronLayer>,
    interlock: MotorInterlock<M>,
    input: Vec<f32>,
}

impl<M: MotorDriver> SensorimotorController<M> {
    /// `weights` must be `inputs x outputs` with `inputs` at least the sensor
    /// array width and `outputs >= 2`; `slopes` holds one slope per output.
    pub fn new(
        sensors: SensorArray,
        weights: WeightMatrix,
        slopes: Vec<f32>,
        interlock: MotorInterlock<M>,
    ) -> Result<Self> {
        if weights.rows() < sensors.width() {
            return Err(NeuralError::DimensionMismatch {
                expected: sensors.width(),
                actual: weights.rows(),
            }
            .into());
        }
        if weights.cols() < MOTOR_OUTPUTS {
            return Err(NeuralError::DimensionMismatch {
                expected: MOTOR_OUTPUTS,
                actual: weights.cols(),
            }
            .into());
        }
        if slopes.len() != weights.cols() {
            return Err(NeuralError::DimensionMismatch {
                expected: weights.cols(),
                actual: slopes.len(),
            }
            .into());
        }

        let input = vec![0.0; weights.rows()];
        Ok(Self {
            sensors,
            weights,
            slopes,
            neurons: None,
            interlock,
            input,
        })
    }

    /// Route every output unit through its own relaxation neuron.
    pub fn with_neurons(
        mut self,
        params: RelaxationParameters,
        activation: Activation,
    ) -> Result<Self> {
        self.neurons = Some(NeuronLayer::new(self.weights.cols(), params, activation)?);
        Ok(self)
    }

    /// Run one control tick of length `dt`.
    pub fn tick(&mut self, dt: Duration) -> Result<TickReport> {
        self.sensors.fill_input(&mut self.input)?;

        let mut outputs = self.weights.propagate(&self.input, &self.slopes)?;
        if let Some(layer) = self.neurons.as_mut() {
            layer.update(&mut outputs, dt.as_secs_f32())?;
        }

        let command = DriveCommand::new(to_drive(outputs[0]), to_drive(outputs[1]));
        trace!(?outputs, left = command.left, right = command.right, "controller tick");

        self.interlock.advance(dt)?;
        self.interlock.request(command.left, command.right)?;

        Ok(TickReport {
            input: self.input.clone(),
            outputs,
            command,
            settling: self.interlock.is_settling(),
        })
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Mutable access for an external evolution loop (e.g. [`WeightMatrix::mutate`]).
    pub fn weights_mut(&mut self) -> &mut WeightMatrix {
        &mut self.weights
    }

    pub fn neurons(&self) -> Option<&NeuronLayer> {
        self.neurons.as_ref()
    }

    pub fn interlock(&self) -> &MotorInterlock<M> {
        &self.interlock
    }

    pub fn interlock_mut(&mut self) -> &mut MotorInterlock<M> {
        &mut self.interlock
    }
}

/// Map a squashed activation in `[0, 1]` to a signed drive in `[-1, 1]`.
#[inline]
pub fn to_drive(activation: f32) -> f32 {
    2.0 * activation - 1.0
}
