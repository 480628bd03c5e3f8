// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Time management abstraction
pub trait TimeProvider {
    /// Monotonic time since platform start, in microseconds
    fn get_time_us(&self) -> u64;

    /// Block for the given number of microseconds
    fn delay_us(&self, us: u32);

    /// Monotonic time in milliseconds
    fn get_time_ms(&self) -> u64 {
        self.get_time_us() / 1000
    }

    /// Block for the given number of milliseconds
    fn delay_ms(&self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}
