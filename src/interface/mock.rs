// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-memory register store for exercising the driver without hardware.
//!
//! By default every write is echoed back by the next read of the same
//! register and WHO_AM_I holds the MPU-6050 identity. Individual registers
//! can be made stuck (reads ignore writes) or failing (every access errors),
//! and every access is logged so tests can assert on exactly what the driver
//! touched.
//!
//! ```
//! use mpu6050::interface::{MockRegisters, RegisterInterface};
//!
//! let mut regs = MockRegisters::new().with_accel_raw([0, 0, 16384]);
//! assert_eq!(regs.read_register(0x3F).unwrap(), 0x40);
//! ```

use super::RegisterInterface;
use crate::constants::{
    RegisterPair, ACCEL_OFFSET, ACCEL_OUT, GYRO_OUT, MPU6050_WHO_AM_I_VALUE, REG_WHO_AM_I,
};
use std::collections::{HashMap, HashSet};

/// One logged register transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(u8),
    Write(u8, u8),
}

/// Error returned for registers configured to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError {
    pub register: u8,
}

/// Accelerometer output that follows the offset trim registers:
/// `raw = bias + gain * offset` per axis
#[derive(Debug, Clone, Copy)]
struct OffsetResponse {
    bias: [i32; 3],
    gain: i32,
}

pub struct MockRegisters {
    registers: [u8; 256],
    stuck: HashMap<u8, u8>,
    failing: HashSet<u8>,
    accel_response: Option<OffsetResponse>,
    accesses: Vec<Access>,
}

impl Default for MockRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRegisters {
    /// Zeroed register file answering WHO_AM_I with the MPU-6050 identity
    pub fn new() -> Self {
        let mut registers = [0u8; 256];
        registers[REG_WHO_AM_I as usize] = MPU6050_WHO_AM_I_VALUE;
        Self {
            registers,
            stuck: HashMap::new(),
            failing: HashSet::new(),
            accel_response: None,
            accesses: Vec::new(),
        }
    }

    /// Answer WHO_AM_I with `value`
    pub fn with_identity(self, value: u8) -> Self {
        self.with_register(REG_WHO_AM_I, value)
    }

    /// Preload one register
    pub fn with_register(mut self, register: u8, value: u8) -> Self {
        self.registers[register as usize] = value;
        self
    }

    /// Preload a signed 16-bit quantity into a low/high register pair
    pub fn with_i16(mut self, pair: RegisterPair, value: i16) -> Self {
        let [high, low] = value.to_be_bytes();
        self.registers[pair.high as usize] = high;
        self.registers[pair.low as usize] = low;
        self
    }

    /// Preload the three accelerometer output registers
    pub fn with_accel_raw(self, raw: [i16; 3]) -> Self {
        Self::with_triple(self, &ACCEL_OUT, raw)
    }

    /// Preload the three gyroscope output registers
    pub fn with_gyro_raw(self, raw: [i16; 3]) -> Self {
        Self::with_triple(self, &GYRO_OUT, raw)
    }

    /// Preload the three accelerometer offset registers
    pub fn with_accel_offset(self, offset: [i16; 3]) -> Self {
        Self::with_triple(self, &ACCEL_OFFSET, offset)
    }

    fn with_triple(mut self, table: &[RegisterPair; 3], values: [i16; 3]) -> Self {
        for (pair, value) in table.iter().zip(values) {
            self = self.with_i16(*pair, value);
        }
        self
    }

    /// Reads of `register` return `value` no matter what was written
    pub fn with_stuck_register(mut self, register: u8, value: u8) -> Self {
        self.stuck.insert(register, value);
        self
    }

    /// Every access to `register` fails
    pub fn with_failing_register(mut self, register: u8) -> Self {
        self.failing.insert(register);
        self
    }

    /// Make the accelerometer output respond to the offset trim registers,
    /// `raw = bias + gain * offset` on each axis, saturated to i16
    pub fn with_accel_offset_response(mut self, bias: [i16; 3], gain: i16) -> Self {
        self.accel_response = Some(OffsetResponse {
            bias: bias.map(i32::from),
            gain: i32::from(gain),
        });
        self
    }

    /// Current content of `register`, without logging an access
    pub fn register(&self, register: u8) -> u8 {
        self.registers[register as usize]
    }

    /// Current content of a low/high pair, without logging an access
    pub fn i16_at(&self, pair: RegisterPair) -> i16 {
        i16::from_be_bytes([self.register(pair.high), self.register(pair.low)])
    }

    /// Every transaction seen so far, in order
    pub fn accesses(&self) -> &[Access] {
        &self.accesses
    }

    pub fn clear_accesses(&mut self) {
        self.accesses.clear();
    }

    /// Number of writes to `register`
    pub fn write_count(&self, register: u8) -> usize {
        self.accesses
            .iter()
            .filter(|a| matches!(a, Access::Write(r, _) if *r == register))
            .count()
    }

    /// Number of reads of `register`
    pub fn read_count(&self, register: u8) -> usize {
        self.accesses
            .iter()
            .filter(|a| matches!(a, Access::Read(r) if *r == register))
            .count()
    }

    fn accel_output(&self, register: u8) -> Option<u8> {
        let response = self.accel_response?;
        let axis = ACCEL_OUT
            .iter()
            .position(|pair| pair.low == register || pair.high == register)?;
        let offset = i32::from(self.i16_at(ACCEL_OFFSET[axis]));
        let raw = (response.bias[axis] + response.gain * offset)
            .clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        let [high, low] = raw.to_be_bytes();
        if register == ACCEL_OUT[axis].high {
            Some(high)
        } else {
            Some(low)
        }
    }
}

impl RegisterInterface for MockRegisters {
    type BusError = MockBusError;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::BusError> {
        self.accesses.push(Access::Read(register));
        if self.failing.contains(&register) {
            return Err(MockBusError { register });
        }
        if let Some(value) = self.stuck.get(&register) {
            return Ok(*value);
        }
        if let Some(value) = self.accel_output(register) {
            return Ok(value);
        }
        Ok(self.registers[register as usize])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::BusError> {
        self.accesses.push(Access::Write(register, value));
        if self.failing.contains(&register) {
            return Err(MockBusError { register });
        }
        self.registers[register as usize] = value;
        Ok(())
    }
}
