// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Linux driver for the InvenSense MPU-6050 6-axis accelerometer and
//! gyroscope.
//!
//! ```no_run
//! use mpu6050::{Mpu6050, Mpu6050Config};
//!
//! let mut imu = Mpu6050::new_i2c("/dev/i2c-1", Mpu6050Config::default())?;
//! imu.init().map_err(|e| std::io::Error::other(format!("{:?}", e)))?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod calibration;
pub mod config;
pub mod constants;
pub mod driver;
pub mod interface;
pub mod offset;
pub mod sample;

pub use calibration::CalibrationOutcome;
pub use config::{
    AccelScale, CalibrationParams, ClockSource, ConfigRegister, DlpfConfig, FsyncSource,
    GyroScale, Mpu6050Config, WakeFrequency,
};
pub use driver::{Axis, DriverError, Mpu6050, Sensor};
pub use offset::{AxisOffset, OffsetByte};
pub use sample::AxisSample;
