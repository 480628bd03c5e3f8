// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use core::fmt::Debug;

/// Analog input (ADC channel)
pub trait AnalogSource {
    /// Platform-specific error type
    type Error: Debug;

    /// Read one raw sample
    ///
    /// # Returns
    /// Raw ADC count in the platform's bounded range (e.g. 0..=1023 on a 10-bit ADC)
    fn read_raw(&mut self) -> Result<i32, Self::Error>;
}

/// Digital input (switch, pin level)
pub trait DigitalSource {
    /// Platform-specific error type
    type Error: Debug;

    /// Read the current pin level
    ///
    /// # Returns
    /// `true` for a high level, `false` for low
    fn read_raw(&mut self) -> Result<bool, Self::Error>;
}

impl<T: AnalogSource + ?Sized> AnalogSource for &mut T {
    type Error = T::Error;

    fn read_raw(&mut self) -> Result<i32, Self::Error> {
        (**self).read_raw()
    }
}

impl<T: DigitalSource + ?Sized> DigitalSource for &mut T {
    type Error = T::Error;

    fn read_raw(&mut self) -> Result<bool, Self::Error> {
        (**self).read_raw()
    }
}
