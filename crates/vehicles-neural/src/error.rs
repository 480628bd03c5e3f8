// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for network primitives

/// Errors raised by matrix operations and neuron models.
///
/// All of these are local and recoverable; the caller decides whether to skip
/// the tick or substitute a default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid matrix size {rows}x{cols}: mutation needs at least 2 rows and 2 columns")]
    InvalidMatrixSize { rows: usize, cols: usize },

    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f32, max: f32 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

pub type Result<T> = core::result::Result<T, NeuralError>;
