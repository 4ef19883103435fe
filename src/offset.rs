// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Offset trim register codec.
//!
//! Each axis of each sensor has a signed 16-bit trim value split over a
//! high/low register pair. Writes go X, Y, Z, low byte then high byte, and
//! every byte is read back before moving on. The first byte that does not
//! read back aborts the write; bytes already written stay on the device.

use crate::{
    constants::{RegisterPair, ACCEL_OFFSET, GYRO_OFFSET},
    driver::{Axis, DriverError, Mpu6050, Sensor},
    interface::RegisterInterface,
};
use log::trace;
use std::fmt::Debug;

/// Trim values for the three axes of one sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisOffset {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AxisOffset {
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    pub fn axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut i16 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// Which half of a 16-bit trim value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetByte {
    Low,
    High,
}

/// Split a trim value into its (low, high) register bytes
pub fn split_offset(offset: i16) -> (u8, u8) {
    ((offset & 0xFF) as u8, ((offset >> 8) & 0xFF) as u8)
}

/// Reassemble a trim value from its low and high register bytes
pub fn join_offset(low: u8, high: u8) -> i16 {
    ((u16::from(high) << 8) | u16::from(low)) as i16
}

fn offset_registers(sensor: Sensor) -> &'static [RegisterPair; 3] {
    match sensor {
        Sensor::Accel => &ACCEL_OFFSET,
        Sensor::Gyro => &GYRO_OFFSET,
    }
}

impl<SI, SE> Mpu6050<SI>
where
    SI: RegisterInterface<BusError = SE>,
    SE: Debug,
{
    /// Read the trim values of `sensor`
    pub fn get_offset(&mut self, sensor: Sensor) -> Result<AxisOffset, DriverError<SE>> {
        self.test_connection()?;

        let mut offset = AxisOffset::default();
        for (axis, pair) in Axis::ALL.iter().zip(offset_registers(sensor)) {
            let low = self.read(pair.low)?;
            let high = self.read(pair.high)?;
            *offset.axis_mut(*axis) = join_offset(low, high);
        }
        trace!("{:?} offset {:?}", sensor, offset);
        Ok(offset)
    }

    /// Write the trim values of `sensor`, verifying every byte
    pub fn set_offset(
        &mut self,
        sensor: Sensor,
        offset: &AxisOffset,
    ) -> Result<(), DriverError<SE>> {
        trace!("set {:?} offset {:?}", sensor, offset);
        for (axis, pair) in Axis::ALL.iter().zip(offset_registers(sensor)) {
            let (low, high) = split_offset(offset.axis(*axis));
            self.write_offset_byte(sensor, *axis, OffsetByte::Low, pair.low, low)?;
            self.write_offset_byte(sensor, *axis, OffsetByte::High, pair.high, high)?;
        }
        Ok(())
    }

    fn write_offset_byte(
        &mut self,
        sensor: Sensor,
        axis: Axis,
        byte: OffsetByte,
        register: u8,
        value: u8,
    ) -> Result<(), DriverError<SE>> {
        if !self.write_verified(register, value)? {
            return Err(DriverError::OffsetVerify { sensor, axis, byte });
        }
        Ok(())
    }
}
