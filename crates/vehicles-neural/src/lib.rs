// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Vehicles Neural Primitives
//!
//! Everything an evolvable sensorimotor controller computes with:
//! - **Activation**: closed set of squashing/transfer functions
//! - **Matrix**: weight propagation, symmetric mutation, squashing
//! - **Models**: continuous-time adapting relaxation neuron

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod activation;
pub mod error;
pub mod matrix;
pub mod models;

pub use activation::{logistic, Activation};
pub use error::{NeuralError, Result};
pub use matrix::{multiply, multiply_slices, squash, Mutation, WeightMatrix, BIAS_LEVEL};
pub use models::{RelaxationNeuron, RelaxationParameters};
