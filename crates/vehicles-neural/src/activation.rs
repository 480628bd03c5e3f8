// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Activation Functions
//!
//! Closed set of unary functions applied to scalar neuron states.
//!
//! ```text
//! Identity:               f(x) = x
//! Sigmoid(slope):         f(x) = 1 / (1 + e^(-slope * x))
//! SaturatingLinear(a,b):  f(x) = clamp(x, a, b)
//! ```

use serde::{Deserialize, Serialize};

/// Activation function applied to a neuron's membrane potential.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activation {
    Identity,
    Sigmoid { slope: f32 },
    SaturatingLinear { min: f32, max: f32 },
}

impl Activation {
    /// Apply the function to `x`.
    #[inline]
    pub fn apply(&self, x: f32) -> f32 {
        match *self {
            Activation::Identity => x,
            Activation::Sigmoid { slope } => logistic(slope, x),
            Activation::SaturatingLinear { min, max } => x.max(min).min(max),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Identity => "identity",
            Activation::Sigmoid { .. } => "sigmoid",
            Activation::SaturatingLinear { .. } => "saturating_linear",
        }
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Sigmoid { slope: 1.0 }
    }
}

/// Logistic function `1 / (1 + e^(-slope * x))`.
#[inline]
pub fn logistic(slope: f32, x: f32) -> f32 {
    1.0 / (1.0 + (-slope * x).exp())
}
