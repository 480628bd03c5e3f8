// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Desktop clock for simulation and host-side testing.

use std::thread;
use std::time::{Duration, Instant};

use crate::hal::TimeProvider;

/// `TimeProvider` backed by `std::time::Instant` and `thread::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    start: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for StdClock {
    fn get_time_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    fn delay_us(&self, us: u32) {
        thread::sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}
