// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Register map and bit-field constants for the MPU-6050.
//!
//! Addresses follow the MPU-6000/MPU-6050 Register Map (RM-MPU-6000A-00).
//! Multi-byte quantities are described as [`RegisterPair`] tables indexed by
//! axis, and bit fields as [`Field`] descriptors, so the driver never has to
//! spell out an address or mask inline.

/// Fixed timeout for a single register transaction
pub const MPU6050_TIMEOUT_MS: u64 = 100;

/// I2C address when AD0 is pulled low
pub const MPU6050_ADDRESS_AD0_L: u8 = 0x68;
/// I2C address when AD0 is pulled high
pub const MPU6050_ADDRESS_AD0_H: u8 = 0x69;

/// Expected WHO_AM_I value (independent of the AD0 pin)
pub const MPU6050_WHO_AM_I_VALUE: u8 = 0x68;

// =============================================================================
// Register addresses
// =============================================================================

pub const REG_XA_OFFS_H: u8 = 0x06;
pub const REG_XA_OFFS_L: u8 = 0x07;
pub const REG_YA_OFFS_H: u8 = 0x08;
pub const REG_YA_OFFS_L: u8 = 0x09;
pub const REG_ZA_OFFS_H: u8 = 0x0A;
pub const REG_ZA_OFFS_L: u8 = 0x0B;

pub const REG_SELF_TEST_X: u8 = 0x0D;
pub const REG_SELF_TEST_Y: u8 = 0x0E;
pub const REG_SELF_TEST_Z: u8 = 0x0F;
pub const REG_SELF_TEST_A: u8 = 0x10;

pub const REG_XG_OFFS_H: u8 = 0x13;
pub const REG_XG_OFFS_L: u8 = 0x14;
pub const REG_YG_OFFS_H: u8 = 0x15;
pub const REG_YG_OFFS_L: u8 = 0x16;
pub const REG_ZG_OFFS_H: u8 = 0x17;
pub const REG_ZG_OFFS_L: u8 = 0x18;

/// Sample rate = gyro output rate / (1 + SMPLRT_DIV)
pub const REG_SMPLRT_DIV: u8 = 0x19;
/// DLPF and FSYNC configuration
pub const REG_CONFIG: u8 = 0x1A;
/// Gyroscope self-test and full-scale selector (FS_SEL, bits 4:3)
pub const REG_GYRO_CONFIG: u8 = 0x1B;
/// Accelerometer self-test and full-scale selector (AFS_SEL, bits 4:3)
pub const REG_ACCEL_CONFIG: u8 = 0x1C;
pub const REG_FIFO_EN: u8 = 0x23;

pub const REG_INT_PIN_CFG: u8 = 0x37;
pub const REG_INT_ENABLE: u8 = 0x38;
pub const REG_INT_STATUS: u8 = 0x3A;

pub const REG_ACCEL_XOUT_H: u8 = 0x3B;
pub const REG_ACCEL_XOUT_L: u8 = 0x3C;
pub const REG_ACCEL_YOUT_H: u8 = 0x3D;
pub const REG_ACCEL_YOUT_L: u8 = 0x3E;
pub const REG_ACCEL_ZOUT_H: u8 = 0x3F;
pub const REG_ACCEL_ZOUT_L: u8 = 0x40;
pub const REG_TEMP_OUT_H: u8 = 0x41;
pub const REG_TEMP_OUT_L: u8 = 0x42;
pub const REG_GYRO_XOUT_H: u8 = 0x43;
pub const REG_GYRO_XOUT_L: u8 = 0x44;
pub const REG_GYRO_YOUT_H: u8 = 0x45;
pub const REG_GYRO_YOUT_L: u8 = 0x46;
pub const REG_GYRO_ZOUT_H: u8 = 0x47;
pub const REG_GYRO_ZOUT_L: u8 = 0x48;

pub const REG_SIGNAL_PATH_RESET: u8 = 0x68;
pub const REG_USER_CTRL: u8 = 0x6A;
pub const REG_PWR_MGMT_1: u8 = 0x6B;
pub const REG_PWR_MGMT_2: u8 = 0x6C;
pub const REG_FIFO_COUNTH: u8 = 0x72;
pub const REG_FIFO_COUNTL: u8 = 0x73;
pub const REG_FIFO_R_W: u8 = 0x74;

pub const REG_WHO_AM_I: u8 = 0x75;

// =============================================================================
// Multi-byte register tables
// =============================================================================

/// Low/high byte registers holding one signed 16-bit quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPair {
    pub low: u8,
    pub high: u8,
}

/// Accelerometer output registers, X/Y/Z
pub const ACCEL_OUT: [RegisterPair; 3] = [
    RegisterPair { low: REG_ACCEL_XOUT_L, high: REG_ACCEL_XOUT_H },
    RegisterPair { low: REG_ACCEL_YOUT_L, high: REG_ACCEL_YOUT_H },
    RegisterPair { low: REG_ACCEL_ZOUT_L, high: REG_ACCEL_ZOUT_H },
];

/// Gyroscope output registers, X/Y/Z
pub const GYRO_OUT: [RegisterPair; 3] = [
    RegisterPair { low: REG_GYRO_XOUT_L, high: REG_GYRO_XOUT_H },
    RegisterPair { low: REG_GYRO_YOUT_L, high: REG_GYRO_YOUT_H },
    RegisterPair { low: REG_GYRO_ZOUT_L, high: REG_GYRO_ZOUT_H },
];

/// Accelerometer offset trim registers, X/Y/Z
pub const ACCEL_OFFSET: [RegisterPair; 3] = [
    RegisterPair { low: REG_XA_OFFS_L, high: REG_XA_OFFS_H },
    RegisterPair { low: REG_YA_OFFS_L, high: REG_YA_OFFS_H },
    RegisterPair { low: REG_ZA_OFFS_L, high: REG_ZA_OFFS_H },
];

/// Gyroscope offset trim registers, X/Y/Z
pub const GYRO_OFFSET: [RegisterPair; 3] = [
    RegisterPair { low: REG_XG_OFFS_L, high: REG_XG_OFFS_H },
    RegisterPair { low: REG_YG_OFFS_L, high: REG_YG_OFFS_H },
    RegisterPair { low: REG_ZG_OFFS_L, high: REG_ZG_OFFS_H },
];

pub const TEMP_OUT: RegisterPair = RegisterPair { low: REG_TEMP_OUT_L, high: REG_TEMP_OUT_H };

// =============================================================================
// Bit fields
// =============================================================================

/// A bit field inside a single configuration register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub mask: u8,
    pub shift: u8,
}

impl Field {
    /// Value of the field in `byte`, shifted down to bit 0
    pub const fn extract(self, byte: u8) -> u8 {
        (byte & self.mask) >> self.shift
    }

    /// `byte` with the field replaced by `value`
    pub const fn insert(self, byte: u8, value: u8) -> u8 {
        (byte & !self.mask) | ((value << self.shift) & self.mask)
    }
}

/// CONFIG[2:0], digital low pass filter
pub const DLPF_CFG: Field = Field { mask: 0b0000_0111, shift: 0 };
/// CONFIG[5:3], FSYNC latch location
pub const EXT_SYNC_SET: Field = Field { mask: 0b0011_1000, shift: 3 };

/// PWR_MGMT_1[2:0], clock source
pub const CLKSEL: Field = Field { mask: 0b0000_0111, shift: 0 };
/// PWR_MGMT_1[3]
pub const TEMP_DIS: Field = Field { mask: 0b0000_1000, shift: 3 };
/// PWR_MGMT_1[5]
pub const CYCLE: Field = Field { mask: 0b0010_0000, shift: 5 };
/// PWR_MGMT_1[6]
pub const SLEEP: Field = Field { mask: 0b0100_0000, shift: 6 };

/// PWR_MGMT_2[7:6], wake-up frequency in accelerometer-only low power mode
pub const LP_WAKE_CTRL: Field = Field { mask: 0b1100_0000, shift: 6 };
/// PWR_MGMT_2[5:0], standby bits XA YA ZA XG YG ZG
pub const STBY: Field = Field { mask: 0b0011_1111, shift: 0 };

/// ACCEL_CONFIG[4:3]
pub const AFS_SEL: Field = Field { mask: 0b0001_1000, shift: 3 };
/// GYRO_CONFIG[4:3]
pub const FS_SEL: Field = Field { mask: 0b0001_1000, shift: 3 };
/// ACCEL_CONFIG[7:5] / GYRO_CONFIG[7:5], self-test enable X Y Z
pub const SELF_TEST: Field = Field { mask: 0b1110_0000, shift: 5 };

pub const STBY_XA: u8 = 0b0010_0000;
pub const STBY_YA: u8 = 0b0001_0000;
pub const STBY_ZA: u8 = 0b0000_1000;
pub const STBY_XG: u8 = 0b0000_0100;
pub const STBY_YG: u8 = 0b0000_0010;
pub const STBY_ZG: u8 = 0b0000_0001;

// =============================================================================
// Scaling
// =============================================================================

/// Accelerometer sensitivity (LSB/g), indexed by AFS_SEL
pub const ACCEL_SENSITIVITY: [f32; 4] = [16384.0, 8192.0, 4096.0, 2048.0];

/// Gyroscope sensitivity (LSB/(°/s)), indexed by FS_SEL
pub const GYRO_SENSITIVITY: [f32; 4] = [131.0, 65.5, 32.8, 16.4];

/// Standard gravity (m/s²)
pub const GRAVITY: f32 = 9.80665;

/// Temperature sensitivity (LSB/°C)
pub const TEMP_SENSITIVITY: f32 = 340.0;
/// Temperature at raw 0 (°C)
pub const TEMP_OFFSET: f32 = 36.53;

/// Settling time after the power management registers change
pub const POWER_SETTLE_MS: u32 = 10;
