// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

use env_logger::Env;
use log::{info, warn};
use mpu6050::{
    interface::delay::delay_ms, CalibrationOutcome, DriverError, Mpu6050, Mpu6050Config,
};

use std::{env, fmt::Debug, io};

const DEFAULT_I2C_BUS: &str = "/dev/i2c-1";
const CALIBRATION_TOLERANCE_G: f32 = 0.02;
const LOOP_INTERVAL_MS: u32 = 100;

fn to_io<E: Debug>(e: DriverError<E>) -> io::Error {
    io::Error::other(format!("{:?}", e))
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let bus = env::args().nth(1).unwrap_or_else(|| DEFAULT_I2C_BUS.to_string());
    let mut imu = Mpu6050::new_i2c(&bus, Mpu6050Config::default())?;
    imu.test_connection().map_err(to_io)?;
    imu.init().map_err(to_io)?;

    info!("keep the sensor flat, Z up, while calibrating");
    match imu.calibrate_accel(CALIBRATION_TOLERANCE_G).map_err(to_io)? {
        CalibrationOutcome::Converged => info!("calibration converged"),
        CalibrationOutcome::TimedOut => warn!("calibration timed out, readings may be biased"),
    }

    loop {
        delay_ms(LOOP_INTERVAL_MS);
        let [ax, ay, az] = imu.get_acceleration().map_err(to_io)?;
        println!("Acceleration: {:.3} {:.3} {:.3}", ax.value, ay.value, az.value);
        let [gx, gy, gz] = imu.get_rotation().map_err(to_io)?;
        println!("Rotation: {:.2} {:.2} {:.2}", gx.value, gy.value, gz.value);
    }
}
