// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Motor Output
//!
//! - [`interlock`] - stop band and brake-and-settle protection on direction reversal

pub mod interlock;

pub use interlock::{DriveCommand, InterlockConfig, InterlockState, MotorCommand, MotorInterlock};
