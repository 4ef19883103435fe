// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! MPU-6050 driver implementation.
//!
//! This module contains the driver handle, the init and identity routines and
//! the register helpers shared by the sample, offset and calibration modules.
//! Every operation takes `&mut self`: a device's register set belongs to one
//! in-flight call sequence at a time.

use crate::{
    config::{AccelScale, ConfigRegister, GyroScale, Mpu6050Config},
    constants::{
        RegisterPair, AFS_SEL, FS_SEL, MPU6050_WHO_AM_I_VALUE, POWER_SETTLE_MS, REG_WHO_AM_I,
        TEMP_OFFSET, TEMP_OUT, TEMP_SENSITIVITY,
    },
    interface::{delay::delay_ms, I2cDevice, RegisterInterface},
    offset::OffsetByte,
};
use log::{info, trace, warn};
use std::{fmt::Debug, io};

/// Sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axes in register order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Sensor group within the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    Accel,
    Gyro,
}

/// Driver-level errors
#[derive(Debug, PartialEq)]
pub enum DriverError<E> {
    /// Identity check failed or a bus transaction failed. The bus error is
    /// carried when there is one, but both cases are the same outcome.
    Connection(Option<E>),
    /// The stored configuration byte holds no known full-scale selector
    Config(ConfigRegister),
    /// A configuration register did not read back as written
    ConfigVerify(ConfigRegister),
    /// An offset trim byte did not read back as written
    OffsetVerify {
        sensor: Sensor,
        axis: Axis,
        byte: OffsetByte,
    },
    /// Calibration tolerance or sample/iteration counts out of range
    InvalidParameter,
}

/// MPU-6050 driver
///
/// Owns the register interface and the configuration applied at init.
pub struct Mpu6050<SI> {
    pub(crate) sensor_interface: SI,
    pub(crate) config: Mpu6050Config,
}

impl<SI> Mpu6050<SI> {
    /// Create a new driver over an already bound register interface
    pub fn new_with_interface(sensor_interface: SI, config: Mpu6050Config) -> Self {
        Self {
            sensor_interface,
            config,
        }
    }

    /// Returns previously consumed sensor interface instance.
    pub fn free(self) -> SI {
        self.sensor_interface
    }

    pub fn interface(&self) -> &SI {
        &self.sensor_interface
    }

    pub fn interface_mut(&mut self) -> &mut SI {
        &mut self.sensor_interface
    }

    /// Configuration the driver believes is on the device
    pub fn config(&self) -> &Mpu6050Config {
        &self.config
    }
}

impl Mpu6050<I2cDevice> {
    /// Create a new driver on a Linux I2C bus
    ///
    /// # Arguments
    /// * `i2c_bus` - Path to the I2C character device (e.g., "/dev/i2c-1")
    /// * `config` - Device address and configuration bytes
    pub fn new_i2c(i2c_bus: &str, config: Mpu6050Config) -> io::Result<Mpu6050<I2cDevice>> {
        let device = I2cDevice::new(i2c_bus, config.address)?;
        Ok(Mpu6050::new_with_interface(device, config))
    }
}

impl<SI, SE> Mpu6050<SI>
where
    SI: RegisterInterface<BusError = SE>,
    SE: Debug,
{
    /// Write the six configuration registers, then read each one back.
    ///
    /// Registers are written in the order CONFIG, SMPLRT_DIV, PWR_MGMT_1,
    /// PWR_MGMT_2, ACCEL_CONFIG, GYRO_CONFIG and verified in the same order;
    /// the first mismatch is reported.
    pub fn init(&mut self) -> Result<(), DriverError<SE>> {
        trace!("driver init");
        for register in ConfigRegister::INIT_ORDER {
            self.write(register.address(), self.config.value(register))?;
        }
        delay_ms(POWER_SETTLE_MS);

        for register in ConfigRegister::INIT_ORDER {
            let expected = self.config.value(register);
            let actual = self.read(register.address())?;
            if actual != expected {
                warn!(
                    "{:?} reads back 0x{:02X}, wrote 0x{:02X}",
                    register, actual, expected
                );
                return Err(DriverError::ConfigVerify(register));
            }
        }
        info!("MPU-6050 at 0x{:02X} configured", self.config.address);
        Ok(())
    }

    /// Verify that the device answers WHO_AM_I with the MPU-6050 identity.
    ///
    /// A wrong identity and a failed read are both a connection error.
    pub fn test_connection(&mut self) -> Result<(), DriverError<SE>> {
        let who_am_i = self.read(REG_WHO_AM_I)?;
        if who_am_i != MPU6050_WHO_AM_I_VALUE {
            warn!(
                "WHO_AM_I mismatch: expected 0x{:02X}, got 0x{:02X}",
                MPU6050_WHO_AM_I_VALUE, who_am_i
            );
            return Err(DriverError::Connection(None));
        }
        Ok(())
    }

    /// Change the accelerometer full-scale range on the device
    pub fn set_accel_scale(&mut self, scale: AccelScale) -> Result<(), DriverError<SE>> {
        let value = AFS_SEL.insert(self.config.accel_config, scale as u8);
        self.write_config_register(ConfigRegister::AccelConfig, value)?;
        self.config.accel_config = value;
        Ok(())
    }

    /// Change the gyroscope full-scale range on the device
    pub fn set_gyro_scale(&mut self, scale: GyroScale) -> Result<(), DriverError<SE>> {
        let value = FS_SEL.insert(self.config.gyro_config, scale as u8);
        self.write_config_register(ConfigRegister::GyroConfig, value)?;
        self.config.gyro_config = value;
        Ok(())
    }

    /// Die temperature in °C
    pub fn get_temperature(&mut self) -> Result<f32, DriverError<SE>> {
        self.test_connection()?;
        let raw = self.read_i16(TEMP_OUT)?;
        Ok(f32::from(raw) / TEMP_SENSITIVITY + TEMP_OFFSET)
    }

    fn write_config_register(
        &mut self,
        register: ConfigRegister,
        value: u8,
    ) -> Result<(), DriverError<SE>> {
        if !self.write_verified(register.address(), value)? {
            return Err(DriverError::ConfigVerify(register));
        }
        Ok(())
    }

    pub(crate) fn read(&mut self, register: u8) -> Result<u8, DriverError<SE>> {
        self.sensor_interface
            .read_register(register)
            .map_err(|e| DriverError::Connection(Some(e)))
    }

    pub(crate) fn write(&mut self, register: u8, value: u8) -> Result<(), DriverError<SE>> {
        self.sensor_interface
            .write_register(register, value)
            .map_err(|e| DriverError::Connection(Some(e)))
    }

    /// Write `value`, read it back, and report whether the two agree
    pub(crate) fn write_verified(&mut self, register: u8, value: u8) -> Result<bool, DriverError<SE>> {
        self.write(register, value)?;
        let readback = self.read(register)?;
        if readback != value {
            warn!(
                "register 0x{:02X} reads back 0x{:02X}, wrote 0x{:02X}",
                register, readback, value
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Read a signed 16-bit quantity, low byte first
    pub(crate) fn read_i16(&mut self, pair: RegisterPair) -> Result<i16, DriverError<SE>> {
        let low = self.read(pair.low)?;
        let high = self.read(pair.high)?;
        Ok(i16::from_be_bytes([high, low]))
    }
}
