// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Device configuration.
//!
//! [`Mpu6050Config`] holds the raw bytes for the six configuration registers
//! written at init. The fields are public so any byte the device accepts can
//! be expressed, and the `with_*` builders set individual bit fields from the
//! typed enums below.

use crate::constants::{
    Field, AFS_SEL, CLKSEL, CYCLE, DLPF_CFG, EXT_SYNC_SET, FS_SEL, LP_WAKE_CTRL,
    MPU6050_ADDRESS_AD0_L, REG_ACCEL_CONFIG, REG_CONFIG, REG_GYRO_CONFIG, REG_PWR_MGMT_1,
    REG_PWR_MGMT_2, REG_SMPLRT_DIV, SLEEP, STBY, TEMP_DIS,
};

/// The six registers written and verified at init
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRegister {
    Config,
    SmplrtDiv,
    PwrMgmt1,
    PwrMgmt2,
    AccelConfig,
    GyroConfig,
}

impl ConfigRegister {
    /// Write and verification order used by init
    pub const INIT_ORDER: [ConfigRegister; 6] = [
        ConfigRegister::Config,
        ConfigRegister::SmplrtDiv,
        ConfigRegister::PwrMgmt1,
        ConfigRegister::PwrMgmt2,
        ConfigRegister::AccelConfig,
        ConfigRegister::GyroConfig,
    ];

    pub const fn address(self) -> u8 {
        match self {
            ConfigRegister::Config => REG_CONFIG,
            ConfigRegister::SmplrtDiv => REG_SMPLRT_DIV,
            ConfigRegister::PwrMgmt1 => REG_PWR_MGMT_1,
            ConfigRegister::PwrMgmt2 => REG_PWR_MGMT_2,
            ConfigRegister::AccelConfig => REG_ACCEL_CONFIG,
            ConfigRegister::GyroConfig => REG_GYRO_CONFIG,
        }
    }
}

/// Accelerometer full-scale range (AFS_SEL)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelScale {
    /// ±2 g
    G2 = 0,
    /// ±4 g
    G4 = 1,
    /// ±8 g
    G8 = 2,
    /// ±16 g
    G16 = 3,
}

/// Gyroscope full-scale range (FS_SEL)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroScale {
    /// ±250 °/s
    Dps250 = 0,
    /// ±500 °/s
    Dps500 = 1,
    /// ±1000 °/s
    Dps1000 = 2,
    /// ±2000 °/s
    Dps2000 = 3,
}

/// Digital low pass filter setting, accel/gyro bandwidth in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DlpfConfig {
    /// 260 / 256, gyro output rate 8 kHz
    Bw260 = 0,
    /// 184 / 188
    Bw184 = 1,
    /// 94 / 98
    Bw94 = 2,
    /// 44 / 42
    Bw44 = 3,
    /// 21 / 20
    Bw21 = 4,
    /// 10 / 10
    Bw10 = 5,
    /// 5 / 5
    Bw5 = 6,
}

/// Sample bit that latches the FSYNC input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsyncSource {
    Disabled = 0,
    TempOutL = 1,
    GyroXoutL = 2,
    GyroYoutL = 3,
    GyroZoutL = 4,
    AccelXoutL = 5,
    AccelYoutL = 6,
    AccelZoutL = 7,
}

/// Clock source (CLKSEL)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    Internal8MHz = 0,
    PllGyroX = 1,
    PllGyroY = 2,
    PllGyroZ = 3,
    PllExternal32kHz = 4,
    PllExternal19MHz = 5,
    Stopped = 7,
}

/// Wake-up frequency in accelerometer-only low power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeFrequency {
    Hz1_25 = 0,
    Hz5 = 1,
    Hz20 = 2,
    Hz40 = 3,
}

/// Raw configuration for one MPU-6050
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mpu6050Config {
    /// 7-bit I2C address
    pub address: u8,
    /// CONFIG: DLPF and FSYNC
    pub dlpf_fsync: u8,
    /// SMPLRT_DIV: sample rate = gyro output rate / (1 + div)
    pub smplrt_div: u8,
    pub pwr_mgmt_1: u8,
    pub pwr_mgmt_2: u8,
    /// ACCEL_CONFIG, full-scale selector in bits 4:3. Readings reject any
    /// other bit, self-test included.
    pub accel_config: u8,
    /// GYRO_CONFIG, full-scale selector in bits 4:3, nothing else
    pub gyro_config: u8,
}

impl Default for Mpu6050Config {
    fn default() -> Self {
        Self {
            address: MPU6050_ADDRESS_AD0_L,
            dlpf_fsync: DLPF_CFG.insert(0, DlpfConfig::Bw44 as u8),
            smplrt_div: 7,
            pwr_mgmt_1: CLKSEL.insert(0, ClockSource::PllGyroX as u8),
            pwr_mgmt_2: 0,
            accel_config: AFS_SEL.insert(0, AccelScale::G2 as u8),
            gyro_config: FS_SEL.insert(0, GyroScale::Dps250 as u8),
        }
    }
}

impl Mpu6050Config {
    /// Raw byte stored for `register`
    pub fn value(&self, register: ConfigRegister) -> u8 {
        match register {
            ConfigRegister::Config => self.dlpf_fsync,
            ConfigRegister::SmplrtDiv => self.smplrt_div,
            ConfigRegister::PwrMgmt1 => self.pwr_mgmt_1,
            ConfigRegister::PwrMgmt2 => self.pwr_mgmt_2,
            ConfigRegister::AccelConfig => self.accel_config,
            ConfigRegister::GyroConfig => self.gyro_config,
        }
    }

    fn value_mut(&mut self, register: ConfigRegister) -> &mut u8 {
        match register {
            ConfigRegister::Config => &mut self.dlpf_fsync,
            ConfigRegister::SmplrtDiv => &mut self.smplrt_div,
            ConfigRegister::PwrMgmt1 => &mut self.pwr_mgmt_1,
            ConfigRegister::PwrMgmt2 => &mut self.pwr_mgmt_2,
            ConfigRegister::AccelConfig => &mut self.accel_config,
            ConfigRegister::GyroConfig => &mut self.gyro_config,
        }
    }

    fn with_field(mut self, register: ConfigRegister, field: Field, value: u8) -> Self {
        let byte = self.value_mut(register);
        *byte = field.insert(*byte, value);
        self
    }

    pub fn with_address(self, address: u8) -> Self {
        Self { address, ..self }
    }

    pub fn with_sample_rate_divider(self, smplrt_div: u8) -> Self {
        Self { smplrt_div, ..self }
    }

    pub fn with_dlpf(self, dlpf: DlpfConfig) -> Self {
        self.with_field(ConfigRegister::Config, DLPF_CFG, dlpf as u8)
    }

    pub fn with_fsync(self, source: FsyncSource) -> Self {
        self.with_field(ConfigRegister::Config, EXT_SYNC_SET, source as u8)
    }

    pub fn with_clock_source(self, clock: ClockSource) -> Self {
        self.with_field(ConfigRegister::PwrMgmt1, CLKSEL, clock as u8)
    }

    pub fn with_sleep(self, sleep: bool) -> Self {
        self.with_field(ConfigRegister::PwrMgmt1, SLEEP, sleep as u8)
    }

    pub fn with_cycle(self, cycle: bool) -> Self {
        self.with_field(ConfigRegister::PwrMgmt1, CYCLE, cycle as u8)
    }

    pub fn with_temperature_disabled(self, disabled: bool) -> Self {
        self.with_field(ConfigRegister::PwrMgmt1, TEMP_DIS, disabled as u8)
    }

    pub fn with_wake_frequency(self, frequency: WakeFrequency) -> Self {
        self.with_field(ConfigRegister::PwrMgmt2, LP_WAKE_CTRL, frequency as u8)
    }

    /// Standby mask built from the `STBY_*` constants
    pub fn with_standby(self, mask: u8) -> Self {
        self.with_field(ConfigRegister::PwrMgmt2, STBY, mask)
    }

    pub fn with_accel_scale(self, scale: AccelScale) -> Self {
        self.with_field(ConfigRegister::AccelConfig, AFS_SEL, scale as u8)
    }

    pub fn with_gyro_scale(self, scale: GyroScale) -> Self {
        self.with_field(ConfigRegister::GyroConfig, FS_SEL, scale as u8)
    }
}

/// Parameters of the accelerometer calibration loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationParams {
    /// Samples averaged per iteration
    pub samples: u32,
    /// Iteration budget before giving up
    pub max_iterations: u32,
    /// Pause between two samples
    pub sample_interval_ms: u32,
}

/// Samples averaged per calibration iteration
pub const CALIBRATION_SAMPLES: u32 = 100;
/// Calibration iteration budget
pub const CALIBRATION_MAX_ITERATIONS: u32 = 500;

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            samples: CALIBRATION_SAMPLES,
            max_iterations: CALIBRATION_MAX_ITERATIONS,
            sample_interval_ms: 0,
        }
    }
}

impl CalibrationParams {
    pub fn with_samples(self, samples: u32) -> Self {
        Self { samples, ..self }
    }

    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self { max_iterations, ..self }
    }

    pub fn with_sample_interval_ms(self, sample_interval_ms: u32) -> Self {
        Self { sample_interval_ms, ..self }
    }
}
