// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use vehicles_hal::DigitalSource;

use super::{source_error, Sensor};
use crate::error::Result;

/// Bump switch wired active-low against a pull-up: a low pin means contact.
pub struct Bumper<D> {
    source: D,
}

impl<D: DigitalSource> Bumper<D> {
    pub fn new(source: D) -> Self {
        Self { source }
    }
}

impl<D: DigitalSource> Sensor for Bumper<D> {
    fn read(&mut self) -> Result<f32> {
        let level = self.source.read_raw().map_err(source_error)?;
        Ok(if level { 0.0 } else { 1.0 })
    }

    fn name(&self) -> &'static str {
        "bumper"
    }
}
