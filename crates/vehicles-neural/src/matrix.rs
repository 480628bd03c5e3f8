// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Weight Matrix Operations
//!
//! Dense row-major weight matrices for a feed-forward sensorimotor network,
//! plus the three primitives an evolving controller consumes:
//!
//! - **multiply**: `out[i][j] = Σ_k a[i][k] * b[k][j]`
//! - **mutate**: overwrite one interior cell and its point-reflected mirror
//!   `(rows - i, cols - j)`, keeping left/right structure symmetric
//! - **squash**: logistic compression of every unit below 1; bias units pinned
//!   at exactly 1 pass through untouched
//!
//! `WeightMatrix` carries its dimensions with the data, so shape errors surface
//! as `NeuralError::DimensionMismatch` instead of out-of-bounds writes.

use ndarray::linalg::general_mat_mul;
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut2};
use rand::Rng;
use tracing::trace;

use crate::activation::logistic;
use crate::error::{NeuralError, Result};

/// Activation level of a bias unit. Values at or above this skip squashing.
pub const BIAS_LEVEL: f32 = 1.0;

/// Mutation values are drawn on a grid of this many steps per unit.
const MUTATION_RESOLUTION: f32 = 100.0;

/// Scaled bounds must stay below this to fit the `i32` step range.
const GRID_LIMIT: f32 = i32::MAX as f32;

/// Largest f32 strictly below 1.0 that `squash` will emit.
const SQUASH_CEILING: f32 = 1.0 - f32::EPSILON;

/// Dense weight matrix with logical dimensions `(rows, cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    data: Array2<f32>,
}

/// Cells written by a single [`WeightMatrix::mutate`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutation {
    pub row: usize,
    pub col: usize,
    pub mirror_row: usize,
    pub mirror_col: usize,
    pub value: f32,
}

impl WeightMatrix {
    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self {
            data: Array2::eye(n),
        }
    }

    /// Wrap a row-major buffer. Fails if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let actual = data.len();
        let data = Array2::from_shape_vec((rows, cols), data).map_err(|_| {
            NeuralError::DimensionMismatch {
                expected: rows * cols,
                actual,
            }
        })?;
        Ok(Self { data })
    }

    /// Matrix with every cell drawn uniformly from `[min, max]` at 0.01 resolution.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        min: f32,
        max: f32,
        rng: &mut R,
    ) -> Result<Self> {
        let grid = mutation_grid(min, max)?;
        let data = Array2::from_shape_simple_fn((rows, cols), || draw_on_grid(grid, &mut *rng));
        Ok(Self { data })
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.data.get((row, col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        let len = self.data.len();
        let ncols = self.data.ncols();
        let cell = self
            .data
            .get_mut((row, col))
            .ok_or(NeuralError::DimensionMismatch {
                expected: len,
                actual: row * ncols + col + 1,
            })?;
        *cell = value;
        Ok(())
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// Row-major copy of the weights.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    /// Mutate one interior cell with lateral symmetry.
    ///
    /// Picks `(i, j)` with `1 <= i < rows` and `1 <= j < cols`, draws a value
    /// from `[min, max]` at 0.01 resolution and writes it to both `(i, j)` and
    /// `(rows - i, cols - j)`.
    ///
    /// # Errors
    /// `InvalidMatrixSize` if either dimension is below 2, `InvalidRange` if `min > max`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, min: f32, max: f32, rng: &mut R) -> Result<Mutation> {
        let (rows, cols) = self.data.dim();
        if rows < 2 || cols < 2 {
            return Err(NeuralError::InvalidMatrixSize { rows, cols });
        }
        let grid = mutation_grid(min, max)?;

        let row = rng.gen_range(1..rows);
        let col = rng.gen_range(1..cols);
        let value = draw_on_grid(grid, rng);
        let (mirror_row, mirror_col) = (rows - row, cols - col);

        self.data[[row, col]] = value;
        self.data[[mirror_row, mirror_col]] = value;

        trace!(
            row,
            col,
            mirror_row,
            mirror_col,
            value,
            "mutated weight with lateral symmetry"
        );

        Ok(Mutation {
            row,
            col,
            mirror_row,
            mirror_col,
            value,
        })
    }

    /// Propagate a single input vector through the weights and squash the result.
    ///
    /// `input` is treated as a `1 x rows` matrix; the result has `cols` entries.
    /// `slopes` supplies one logistic slope per output unit.
    pub fn propagate(&self, input: &[f32], slopes: &[f32]) -> Result<Vec<f32>> {
        if input.len() != self.rows() {
            return Err(NeuralError::DimensionMismatch {
                expected: self.rows(),
                actual: input.len(),
            });
        }
        if slopes.len() != self.cols() {
            return Err(NeuralError::DimensionMismatch {
                expected: self.cols(),
                actual: slopes.len(),
            });
        }

        let mut activations = ArrayView1::from(input).dot(&self.data).to_vec();
        squash(&mut activations, slopes)?;
        Ok(activations)
    }
}

/// `out = a * b` for owned matrices. `a` is `l x m`, `b` is `m x n`, `out` is `l x n`.
pub fn multiply(a: &WeightMatrix, b: &WeightMatrix, out: &mut WeightMatrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(NeuralError::DimensionMismatch {
            expected: a.cols(),
            actual: b.rows(),
        });
    }
    if out.data.dim() != (a.rows(), b.cols()) {
        return Err(NeuralError::DimensionMismatch {
            expected: a.rows() * b.cols(),
            actual: out.data.len(),
        });
    }
    general_mat_mul(1.0, &a.data, &b.data, 0.0, &mut out.data);
    Ok(())
}

/// `out = a * b` over flat row-major buffers with caller-supplied dimensions.
///
/// Every buffer length is checked against `(l, m, n)` before anything is written.
pub fn multiply_slices(
    a: &[f32],
    b: &[f32],
    out: &mut [f32],
    l: usize,
    m: usize,
    n: usize,
) -> Result<()> {
    let a = view_of(a, l, m)?;
    let b = view_of(b, m, n)?;
    let actual = out.len();
    check_len(actual, l * n)?;
    let mut out = ArrayViewMut2::from_shape((l, n), out).map_err(|_| {
        NeuralError::DimensionMismatch {
            expected: l * n,
            actual,
        }
    })?;
    general_mat_mul(1.0, &a, &b, 0.0, &mut out);
    Ok(())
}

/// Squash every element below [`BIAS_LEVEL`] through `1 / (1 + e^(-slope * x))`.
///
/// Results are kept strictly inside `(0, 1)` so a squashed unit can never be
/// mistaken for a bias unit on the next layer. A NaN activation is squashed as
/// if it were 0.
pub fn squash(vector: &mut [f32], slopes: &[f32]) -> Result<()> {
    if vector.len() != slopes.len() {
        return Err(NeuralError::DimensionMismatch {
            expected: vector.len(),
            actual: slopes.len(),
        });
    }
    for (value, &slope) in vector.iter_mut().zip(slopes) {
        if value.is_nan() {
            *value = 0.0;
        }
        if *value < BIAS_LEVEL {
            *value = logistic(slope, *value).clamp(f32::MIN_POSITIVE, SQUASH_CEILING);
        }
    }
    Ok(())
}

fn view_of(data: &[f32], rows: usize, cols: usize) -> Result<ArrayView2<'_, f32>> {
    check_len(data.len(), rows * cols)?;
    ArrayView2::from_shape((rows, cols), data).map_err(|_| NeuralError::DimensionMismatch {
        expected: rows * cols,
        actual: data.len(),
    })
}

fn check_len(actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(NeuralError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Inclusive step range `(lo, hi)` of grid points `k / MUTATION_RESOLUTION`
/// lying inside `[min, max]`.
///
/// # Errors
/// `InvalidRange` if the bounds are inverted or non-finite, exceed the `i32`
/// step range, or enclose no grid point.
fn mutation_grid(min: f32, max: f32) -> Result<(i32, i32)> {
    let invalid = NeuralError::InvalidRange { min, max };
    if min > max || !min.is_finite() || !max.is_finite() {
        return Err(invalid);
    }
    let (lo_steps, hi_steps) = (min * MUTATION_RESOLUTION, max * MUTATION_RESOLUTION);
    if lo_steps.abs() >= GRID_LIMIT || hi_steps.abs() >= GRID_LIMIT {
        return Err(invalid);
    }

    let mut lo = lo_steps.round() as i32;
    if (lo as f32 / MUTATION_RESOLUTION) < min {
        lo += 1;
    }
    let mut hi = hi_steps.round() as i32;
    if (hi as f32 / MUTATION_RESOLUTION) > max {
        hi -= 1;
    }
    if lo > hi {
        return Err(invalid);
    }
    Ok((lo, hi))
}

fn draw_on_grid<R: Rng + ?Sized>((lo, hi): (i32, i32), rng: &mut R) -> f32 {
    rng.gen_range(lo..=hi) as f32 / MUTATION_RESOLUTION
}
