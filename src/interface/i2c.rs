// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Linux I2C character device (`/dev/i2c-N`) transport.

use super::RegisterInterface;
use crate::constants::MPU6050_TIMEOUT_MS;
use i2cdev::{
    core::I2CDevice,
    linux::{LinuxI2CDevice, LinuxI2CError},
};
use log::trace;
use std::{
    io::{self, ErrorKind},
    path::Path,
    time::Instant,
};

/// Errors raised by the Linux I2C transport
#[derive(Debug)]
pub enum I2cBusError {
    /// The kernel rejected or failed the transfer
    Device(LinuxI2CError),
    /// The transfer completed later than the fixed transaction timeout
    Timeout { register: u8, elapsed_ms: u128 },
}

/// One device on a Linux I2C bus, addressed by its 7-bit address
pub struct I2cDevice {
    device: LinuxI2CDevice,
    address: u8,
}

impl I2cDevice {
    /// Open `path` (e.g. "/dev/i2c-1") and bind it to `address`
    pub fn new<P: AsRef<Path>>(path: P, address: u8) -> io::Result<I2cDevice> {
        let device = LinuxI2CDevice::new(path, u16::from(address))
            .map_err(|e| io::Error::new(ErrorKind::Other, e.to_string()))?;
        Ok(I2cDevice { device, address })
    }

    /// The 7-bit device address this handle talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    fn check_elapsed(register: u8, start: Instant) -> Result<(), I2cBusError> {
        let elapsed_ms = start.elapsed().as_millis();
        if elapsed_ms > u128::from(MPU6050_TIMEOUT_MS) {
            return Err(I2cBusError::Timeout { register, elapsed_ms });
        }
        Ok(())
    }
}

impl RegisterInterface for I2cDevice {
    type BusError = I2cBusError;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::BusError> {
        let start = Instant::now();
        let value = self
            .device
            .smbus_read_byte_data(register)
            .map_err(I2cBusError::Device)?;
        Self::check_elapsed(register, start)?;
        trace!("0x{:02X}: read 0x{:02X} from 0x{:02X}", self.address, value, register);
        Ok(value)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::BusError> {
        let start = Instant::now();
        self.device
            .smbus_write_byte_data(register, value)
            .map_err(I2cBusError::Device)?;
        Self::check_elapsed(register, start)?;
        trace!("0x{:02X}: wrote 0x{:02X} to 0x{:02X}", self.address, value, register);
        Ok(())
    }
}
