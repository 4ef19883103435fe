// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Register-level bus access.
//!
//! The driver only ever needs two primitives: read one register and write one
//! register. Anything that can provide them (a Linux I2C character device, a
//! mock register store in tests) implements [`RegisterInterface`].

pub mod delay;
pub mod i2c;
pub mod mock;

pub use i2c::{I2cBusError, I2cDevice};
pub use mock::{Access, MockBusError, MockRegisters};

/// Single-register access to one device on the bus.
///
/// Implementations are bound to the device address and must bound every
/// transaction by a fixed timeout.
pub trait RegisterInterface {
    type BusError: core::fmt::Debug;

    /// Read one byte from `register`
    fn read_register(&mut self, register: u8) -> Result<u8, Self::BusError>;

    /// Write one byte to `register`
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::BusError>;
}

impl<T: RegisterInterface + ?Sized> RegisterInterface for &mut T {
    type BusError = T::BusError;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::BusError> {
        (**self).read_register(register)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::BusError> {
        (**self).write_register(register, value)
    }
}
