// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Platform implementations

#[cfg(feature = "std")]
pub mod std_clock;

#[cfg(feature = "std")]
pub use std_clock::StdClock;
