// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuron Models
//!
//! Continuous-time neuron models stepped once per control tick.
//!
//! ## Adding a New Neuron Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Give its parameters a `validate()` returning `NeuralError::InvalidParameter`
//! 3. Add tests
//! 4. Export in `mod.rs`

pub mod relaxation;

pub use relaxation::{RelaxationNeuron, RelaxationParameters};
