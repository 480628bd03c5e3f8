// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Adaptive Relaxation Neuron
//!
//! Two-variable rate-coded neuron: a fast membrane potential `x` that
//! integrates drive, and a slow adaptation variable `v` that feeds back
//! negatively so that sustained stimulus yields a decaying firing rate.
//!
//! ## Model Dynamics
//!
//! ```text
//! Net drive:
//!     net = s + y - bias - b × v
//!
//! Derivatives:
//!     dx = (-x + net) / ta     if net > 0
//!     dx = -x / ta             otherwise (relax toward rest)
//!     dv = (x - v) / tr
//!
//! Forward Euler step:
//!     x += dx × dt
//!     v += dv × dt
//!     output = activation(x)
//!
//!     Where:
//!     - bias = firing threshold
//!     - ta   = activation time constant
//!     - tr   = recovery/adaptation time constant
//!     - s    = tonic drive
//!     - b    = adaptation gain (0 = plain leaky integrator)
//!     - y    = weighted input drive
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::activation::Activation;
use crate::error::{NeuralError, Result};

/// Per-step parameters of the relaxation neuron (everything except the input drive `y`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxationParameters {
    /// Firing threshold subtracted from the net drive
    pub bias: f32,
    /// Activation time constant (> 0)
    pub ta: f32,
    /// Recovery/adaptation time constant (> 0)
    pub tr: f32,
    /// Tonic drive
    pub s: f32,
    /// Adaptation gain
    pub b: f32,
}

impl RelaxationParameters {
    pub fn new(bias: f32, ta: f32, tr: f32, s: f32, b: f32) -> Self {
        Self { bias, ta, tr, s, b }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.ta > 0.0 && self.ta.is_finite()) {
            return Err(NeuralError::InvalidParameter(
                "Relaxation: activation time constant ta must be positive",
            ));
        }
        if !(self.tr > 0.0 && self.tr.is_finite()) {
            return Err(NeuralError::InvalidParameter(
                "Relaxation: adaptation time constant tr must be positive",
            ));
        }
        if !(self.bias.is_finite() && self.s.is_finite() && self.b.is_finite()) {
            return Err(NeuralError::InvalidParameter(
                "Relaxation: bias, s and b must be finite",
            ));
        }
        Ok(())
    }

    /// Net drive for the given adaptation level and input.
    #[inline]
    pub fn net_drive(&self, v: f32, y: f32) -> f32 {
        self.s + y - self.bias - self.b * v
    }
}

impl Default for RelaxationParameters {
    fn default() -> Self {
        Self {
            bias: 0.0,
            ta: 0.1,
            tr: 1.0,
            s: 0.0,
            b: 0.0,
        }
    }
}

/// State of a single adapting relaxation neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationNeuron {
    x: f32,
    v: f32,
    dx: f32,
    dv: f32,
    output: f32,
    activation: Activation,
}

impl RelaxationNeuron {
    /// Neuron at rest (`x = v = 0`) with the given output activation.
    pub fn new(activation: Activation) -> Self {
        Self {
            x: 0.0,
            v: 0.0,
            dx: 0.0,
            dv: 0.0,
            output: activation.apply(0.0),
            activation,
        }
    }

    /// Compute `dx` and `dv` from the current state without advancing it.
    pub fn solve(&mut self, params: &RelaxationParameters, y: f32) -> Result<()> {
        params.validate()?;

        let net = params.net_drive(self.v, y);
        self.dx = if net > 0.0 {
            (-self.x + net) / params.ta
        } else {
            -self.x / params.ta
        };
        self.dv = (self.x - self.v) / params.tr;
        Ok(())
    }

    /// Forward-Euler update using the derivatives from the last [`solve`](Self::solve).
    ///
    /// `dt` is the caller's control-loop tick; no internal clock is kept.
    pub fn step(&mut self, dt: f32) -> f32 {
        self.x += self.dx * dt;
        self.v += self.dv * dt;
        self.output = self.activation.apply(self.x);
        trace!(x = self.x, v = self.v, output = self.output, "relaxation neuron step");
        self.output
    }

    /// `solve` followed by `step`.
    pub fn update(&mut self, params: &RelaxationParameters, y: f32, dt: f32) -> Result<f32> {
        self.solve(params, y)?;
        Ok(self.step(dt))
    }

    /// Return to rest.
    pub fn reset(&mut self) {
        *self = Self::new(self.activation);
    }

    pub fn membrane_potential(&self) -> f32 {
        self.x
    }

    pub fn adaptation(&self) -> f32 {
        self.v
    }

    /// `(dx, dv)` from the most recent solve.
    pub fn derivatives(&self) -> (f32, f32) {
        (self.dx, self.dv)
    }

    pub fn output(&self) -> f32 {
        self.output
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }
}

impl Default for RelaxationNeuron {
    fn default() -> Self {
        Self::new(Activation::default())
    }
}
