// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Accelerometer and gyroscope sample acquisition.

use crate::{
    config::ConfigRegister,
    constants::{
        Field, RegisterPair, ACCEL_OUT, ACCEL_SENSITIVITY, AFS_SEL, FS_SEL, GRAVITY, GYRO_OUT,
        GYRO_SENSITIVITY,
    },
    driver::{DriverError, Mpu6050},
    interface::RegisterInterface,
};
use std::fmt::Debug;

/// One axis reading: raw register value and its physical value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSample {
    pub raw: i16,
    /// m/s² for the accelerometer, °/s for the gyroscope
    pub value: f32,
}

/// Accelerometer LSB/g for an ACCEL_CONFIG byte, `None` if the byte carries
/// anything besides a full-scale selector
pub fn accel_sensitivity(accel_config: u8) -> Option<f32> {
    sensitivity(accel_config, AFS_SEL, &ACCEL_SENSITIVITY)
}

/// Gyroscope LSB/(°/s) for a GYRO_CONFIG byte, `None` if the byte carries
/// anything besides a full-scale selector
pub fn gyro_sensitivity(gyro_config: u8) -> Option<f32> {
    sensitivity(gyro_config, FS_SEL, &GYRO_SENSITIVITY)
}

fn sensitivity(config: u8, selector: Field, table: &[f32; 4]) -> Option<f32> {
    if config & !selector.mask != 0 {
        return None;
    }
    table.get(selector.extract(config) as usize).copied()
}

impl<SI, SE> Mpu6050<SI>
where
    SI: RegisterInterface<BusError = SE>,
    SE: Debug,
{
    /// Read the accelerometer, X/Y/Z in m/s²
    pub fn get_acceleration(&mut self) -> Result<[AxisSample; 3], DriverError<SE>> {
        self.test_connection()?;
        let sensitivity = self.accel_sensitivity()?;
        let raw = self.read_axes(&ACCEL_OUT)?;
        Ok(raw.map(|raw| AxisSample {
            raw,
            value: f32::from(raw) / sensitivity * GRAVITY,
        }))
    }

    /// Read the gyroscope, X/Y/Z in °/s
    pub fn get_rotation(&mut self) -> Result<[AxisSample; 3], DriverError<SE>> {
        self.test_connection()?;
        let sensitivity = self.gyro_sensitivity()?;
        let raw = self.read_axes(&GYRO_OUT)?;
        Ok(raw.map(|raw| AxisSample {
            raw,
            value: f32::from(raw) / sensitivity,
        }))
    }

    /// Accelerometer LSB/g for the stored configuration
    pub fn accel_sensitivity(&self) -> Result<f32, DriverError<SE>> {
        accel_sensitivity(self.config.accel_config)
            .ok_or(DriverError::Config(ConfigRegister::AccelConfig))
    }

    /// Gyroscope LSB/(°/s) for the stored configuration
    pub fn gyro_sensitivity(&self) -> Result<f32, DriverError<SE>> {
        gyro_sensitivity(self.config.gyro_config)
            .ok_or(DriverError::Config(ConfigRegister::GyroConfig))
    }

    fn read_axes(&mut self, table: &[RegisterPair; 3]) -> Result<[i16; 3], DriverError<SE>> {
        let mut raw = [0i16; 3];
        for (value, pair) in raw.iter_mut().zip(table) {
            *value = self.read_i16(*pair)?;
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{AccelScale, ClockSource, DlpfConfig, FsyncSource, GyroScale, Mpu6050Config},
        constants::{REG_ACCEL_XOUT_H, REG_ACCEL_XOUT_L, REG_WHO_AM_I, STBY_ZA},
        interface::{Access, MockRegisters},
    };

    #[test]
    fn test_sensitivity_tables() {
        let accel = [
            (AccelScale::G2, 16384.0),
            (AccelScale::G4, 8192.0),
            (AccelScale::G8, 4096.0),
            (AccelScale::G16, 2048.0),
        ];
        for (scale, expected) in accel {
            let config = Mpu6050Config::default().with_accel_scale(scale);
            assert_eq!(accel_sensitivity(config.accel_config), Some(expected));
        }

        let gyro = [
            (GyroScale::Dps250, 131.0),
            (GyroScale::Dps500, 65.5),
            (GyroScale::Dps1000, 32.8),
            (GyroScale::Dps2000, 16.4),
        ];
        for (scale, expected) in gyro {
            let config = Mpu6050Config::default().with_gyro_scale(scale);
            assert_eq!(gyro_sensitivity(config.gyro_config), Some(expected));
        }
    }

    #[test]
    fn test_unknown_selector() {
        // self-test bit set
        assert_eq!(accel_sensitivity(0b1000_0000), None);
        // reserved low bits
        assert_eq!(accel_sensitivity(0b0001_1001), None);
        assert_eq!(gyro_sensitivity(0b0000_0100), None);
    }

    #[test]
    fn test_acceleration_one_g_on_every_scale() {
        for (scale, lsb) in [
            (AccelScale::G2, 16384),
            (AccelScale::G4, 8192),
            (AccelScale::G8, 4096),
            (AccelScale::G16, 2048),
        ] {
            let config = Mpu6050Config::default().with_accel_scale(scale);
            let regs = MockRegisters::new().with_accel_raw([0, -lsb, lsb]);
            let mut imu = Mpu6050::new_with_interface(regs, config);

            let [x, y, z] = imu.get_acceleration().unwrap();
            assert_eq!((x.raw, y.raw, z.raw), (0, -lsb, lsb));
            assert_eq!(x.value, 0.0);
            assert!((y.value + GRAVITY).abs() < 1e-4, "{:?} y {}", scale, y.value);
            assert!((z.value - GRAVITY).abs() < 1e-4, "{:?} z {}", scale, z.value);
        }
    }

    #[test]
    fn test_rotation_on_every_scale() {
        // 100 °/s expressed in LSB for each range
        for (scale, raw) in [
            (GyroScale::Dps250, 13100),
            (GyroScale::Dps500, 6550),
            (GyroScale::Dps1000, 3280),
            (GyroScale::Dps2000, 1640),
        ] {
            let config = Mpu6050Config::default().with_gyro_scale(scale);
            let regs = MockRegisters::new().with_gyro_raw([raw, 0, -raw]);
            let mut imu = Mpu6050::new_with_interface(regs, config);

            let [x, y, z] = imu.get_rotation().unwrap();
            assert!((x.value - 100.0).abs() < 1e-3, "{:?} x {}", scale, x.value);
            assert_eq!(y.value, 0.0);
            assert!((z.value + 100.0).abs() < 1e-3, "{:?} z {}", scale, z.value);
        }
    }

    #[test]
    fn test_reads_low_byte_first() {
        let regs = MockRegisters::new().with_accel_raw([0x0102, 0, 0]);
        let mut imu = Mpu6050::new_with_interface(regs, Mpu6050Config::default());
        imu.get_acceleration().unwrap();

        let accesses = imu.interface().accesses();
        assert_eq!(accesses[0], Access::Read(REG_WHO_AM_I));
        assert_eq!(accesses[1], Access::Read(REG_ACCEL_XOUT_L));
        assert_eq!(accesses[2], Access::Read(REG_ACCEL_XOUT_H));
        assert_eq!(accesses.len(), 7);
    }

    #[test]
    fn test_every_builder_config_stays_readable() {
        let config = Mpu6050Config::default()
            .with_dlpf(DlpfConfig::Bw5)
            .with_fsync(FsyncSource::GyroZoutL)
            .with_clock_source(ClockSource::PllGyroY)
            .with_temperature_disabled(true)
            .with_standby(STBY_ZA)
            .with_accel_scale(AccelScale::G8)
            .with_gyro_scale(GyroScale::Dps500);
        let regs = MockRegisters::new()
            .with_accel_raw([0, 0, 4096])
            .with_gyro_raw([655, 0, 0]);
        let mut imu = Mpu6050::new_with_interface(regs, config);

        imu.init().unwrap();
        let [_, _, z] = imu.get_acceleration().unwrap();
        assert!((z.value - GRAVITY).abs() < 1e-4, "z {}", z.value);
        let [x, _, _] = imu.get_rotation().unwrap();
        assert!((x.value - 10.0).abs() < 1e-3, "x {}", x.value);
    }

    #[test]
    fn test_unknown_selector_is_config_error() {
        let config = Mpu6050Config {
            accel_config: 0b0001_1001,
            gyro_config: 0b0100_0000,
            ..Default::default()
        };
        let mut imu = Mpu6050::new_with_interface(MockRegisters::new(), config);
        assert_eq!(
            imu.get_acceleration(),
            Err(DriverError::Config(ConfigRegister::AccelConfig))
        );
        assert_eq!(
            imu.get_rotation(),
            Err(DriverError::Config(ConfigRegister::GyroConfig))
        );
    }

    #[test]
    fn test_identity_gate() {
        let regs = MockRegisters::new().with_identity(0x72).with_accel_raw([1, 2, 3]);
        let mut imu = Mpu6050::new_with_interface(regs, Mpu6050Config::default());
        assert_eq!(imu.get_acceleration(), Err(DriverError::Connection(None)));
        assert_eq!(imu.get_rotation(), Err(DriverError::Connection(None)));
        assert_eq!(
            imu.interface().accesses(),
            &[Access::Read(REG_WHO_AM_I), Access::Read(REG_WHO_AM_I)]
        );
    }
}
