// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Closed-loop accelerometer offset calibration.
//!
//! The sensor has to rest with Z pointing up, so the expected reading is
//! 0 g on X and Y and +1 g on Z. Each iteration averages a batch of raw
//! samples and compares the means against those targets. When every axis is
//! within tolerance the loop stops; otherwise each offset trim moves one LSB
//! against its error and the new offsets are written before the next batch.

use crate::{
    config::CalibrationParams,
    driver::{Axis, DriverError, Mpu6050, Sensor},
    interface::{delay::delay_ms, RegisterInterface},
};
use log::{debug, info, warn};
use std::fmt::Debug;

/// How a calibration run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationOutcome {
    /// All three axes within tolerance at the same time
    Converged,
    /// Iteration budget exhausted; the last written offsets stay on the device
    TimedOut,
}

/// Tolerance in g converted to raw LSB, `None` if it is negative or not finite
pub fn tolerance_to_lsb(tolerance: f32, sensitivity: f32) -> Option<i32> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return None;
    }
    Some((tolerance * sensitivity).round() as i32)
}

/// Mean of `count` samples summing to `sum`, truncated toward zero
pub fn truncated_mean(sum: i64, count: u32) -> i32 {
    (sum / i64::from(count)) as i32
}

/// Offset after one unit step against the error `mean - target`.
///
/// A mean above target lowers the offset, anything else raises it.
/// Saturates at the i16 bounds.
pub fn nudge(offset: i16, mean: i32, target: i32) -> i16 {
    if mean > target {
        offset.saturating_sub(1)
    } else {
        offset.saturating_add(1)
    }
}

impl<SI, SE> Mpu6050<SI>
where
    SI: RegisterInterface<BusError = SE>,
    SE: Debug,
{
    /// Calibrate the accelerometer offsets with the default parameters.
    ///
    /// `tolerance` is the accepted error of the averaged reading, in g.
    pub fn calibrate_accel(&mut self, tolerance: f32) -> Result<CalibrationOutcome, DriverError<SE>> {
        self.calibrate_accel_with(tolerance, &CalibrationParams::default())
    }

    /// Calibrate the accelerometer offsets.
    ///
    /// A bus failure or an offset byte that does not read back aborts the
    /// run with that error; the device keeps whatever was written so far.
    pub fn calibrate_accel_with(
        &mut self,
        tolerance: f32,
        params: &CalibrationParams,
    ) -> Result<CalibrationOutcome, DriverError<SE>> {
        if params.samples == 0 || params.max_iterations == 0 {
            return Err(DriverError::InvalidParameter);
        }

        let mut offset = self.get_offset(Sensor::Accel)?;
        let sensitivity = self.accel_sensitivity()?;
        let max_error =
            tolerance_to_lsb(tolerance, sensitivity).ok_or(DriverError::InvalidParameter)?;
        // gravity along +Z at rest
        let target = [0, 0, sensitivity.round() as i32];
        debug!(
            "calibrating: start offset {:?}, target {:?}, max error {} LSB",
            offset, target, max_error
        );

        for iteration in 1..=params.max_iterations {
            let mean = self.mean_accel_raw(params)?;

            let converged = Axis::ALL
                .iter()
                .all(|axis| (mean[axis.index()] - target[axis.index()]).abs() <= max_error);
            if converged {
                self.set_offset(Sensor::Accel, &offset)?;
                info!(
                    "accelerometer calibrated after {} iterations, offset {:?}",
                    iteration, offset
                );
                return Ok(CalibrationOutcome::Converged);
            }

            for axis in Axis::ALL {
                let i = axis.index();
                *offset.axis_mut(axis) = nudge(offset.axis(axis), mean[i], target[i]);
            }
            debug!("iteration {}: mean {:?}, offset -> {:?}", iteration, mean, offset);
            self.set_offset(Sensor::Accel, &offset)?;
        }

        warn!(
            "accelerometer calibration did not converge in {} iterations, offset left at {:?}",
            params.max_iterations, offset
        );
        Ok(CalibrationOutcome::TimedOut)
    }

    /// Average `params.samples` raw accelerometer readings per axis
    fn mean_accel_raw(&mut self, params: &CalibrationParams) -> Result<[i32; 3], DriverError<SE>> {
        let mut sums = [0i64; 3];
        for _ in 0..params.samples {
            let samples = self.get_acceleration()?;
            for (sum, sample) in sums.iter_mut().zip(samples.iter()) {
                *sum += i64::from(sample.raw);
            }
            delay_ms(params.sample_interval_ms);
        }
        Ok(sums.map(|sum| truncated_mean(sum, params.samples)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{AccelScale, Mpu6050Config},
        constants::{
            REG_ACCEL_XOUT_L, REG_WHO_AM_I, REG_XA_OFFS_H, REG_XA_OFFS_L, REG_YA_OFFS_H,
            REG_YA_OFFS_L, REG_ZA_OFFS_H, REG_ZA_OFFS_L,
        },
        interface::{MockBusError, MockRegisters},
        offset::{AxisOffset, OffsetByte},
    };

    fn driver(regs: MockRegisters) -> Mpu6050<MockRegisters> {
        Mpu6050::new_with_interface(regs, Mpu6050Config::default())
    }

    fn params(samples: u32, max_iterations: u32) -> CalibrationParams {
        CalibrationParams::default()
            .with_samples(samples)
            .with_max_iterations(max_iterations)
    }

    fn accel_offset_writes(regs: &MockRegisters) -> usize {
        [
            REG_XA_OFFS_L,
            REG_XA_OFFS_H,
            REG_YA_OFFS_L,
            REG_YA_OFFS_H,
            REG_ZA_OFFS_L,
            REG_ZA_OFFS_H,
        ]
        .iter()
        .map(|r| regs.write_count(*r))
        .sum()
    }

    #[test]
    fn test_tolerance_to_lsb() {
        assert_eq!(tolerance_to_lsb(0.01, 16384.0), Some(164));
        assert_eq!(tolerance_to_lsb(0.0, 16384.0), Some(0));
        assert_eq!(tolerance_to_lsb(0.5, 2048.0), Some(1024));
        assert_eq!(tolerance_to_lsb(-0.01, 16384.0), None);
        assert_eq!(tolerance_to_lsb(f32::NAN, 16384.0), None);
        assert_eq!(tolerance_to_lsb(f32::INFINITY, 16384.0), None);
    }

    #[test]
    fn test_truncated_mean_rounds_toward_zero() {
        assert_eq!(truncated_mean(199, 100), 1);
        assert_eq!(truncated_mean(-199, 100), -1);
        assert_eq!(truncated_mean(-99, 100), 0);
        assert_eq!(truncated_mean(-100, 100), -1);
        assert_eq!(truncated_mean(i64::from(i16::MIN) * 1000, 1000), -32768);
    }

    #[test]
    fn test_nudge() {
        assert_eq!(nudge(10, 5, 0), 9);
        assert_eq!(nudge(10, -5, 0), 11);
        // equal to target counts as below
        assert_eq!(nudge(10, 16384, 16384), 11);
        assert_eq!(nudge(i16::MIN, 5, 0), i16::MIN);
        assert_eq!(nudge(i16::MAX, -5, 0), i16::MAX);
    }

    #[test]
    fn test_converges_in_one_iteration_when_trimmed() {
        let regs = MockRegisters::new()
            .with_accel_raw([0, 0, 16384])
            .with_accel_offset([-1200, 850, 3]);
        let mut imu = driver(regs);

        let outcome = imu.calibrate_accel_with(0.01, &params(10, 50)).unwrap();
        assert_eq!(outcome, CalibrationOutcome::Converged);

        let regs = imu.interface();
        // one batch of samples, one offset write
        assert_eq!(regs.read_count(REG_ACCEL_XOUT_L), 10);
        assert_eq!(accel_offset_writes(regs), 6);
        assert_eq!(
            imu.get_offset(Sensor::Accel).unwrap(),
            AxisOffset::new(-1200, 850, 3)
        );
    }

    #[test]
    fn test_times_out_after_max_iterations() {
        let regs = MockRegisters::new()
            .with_accel_raw([1000, 1000, 1000])
            .with_accel_offset([10, 20, 30]);
        let mut imu = driver(regs);

        let outcome = imu.calibrate_accel_with(0.01, &params(4, 5)).unwrap();
        assert_eq!(outcome, CalibrationOutcome::TimedOut);

        let regs = imu.interface();
        assert_eq!(regs.write_count(REG_XA_OFFS_L), 5);
        assert_eq!(accel_offset_writes(regs), 5 * 6);
        assert_eq!(regs.read_count(REG_ACCEL_XOUT_L), 5 * 4);
        // identity is checked once for the offsets and once per sample
        assert_eq!(regs.read_count(REG_WHO_AM_I), 1 + 5 * 4);
        // X and Y above target, Z below
        assert_eq!(
            imu.get_offset(Sensor::Accel).unwrap(),
            AxisOffset::new(5, 15, 35)
        );
    }

    #[test]
    fn test_nudge_direction_after_one_iteration() {
        for (x_raw, expected_x) in [(500, 99), (-500, 101)] {
            let regs = MockRegisters::new()
                .with_accel_raw([x_raw, 0, 16384])
                .with_accel_offset([100, 0, 0]);
            let mut imu = driver(regs);

            let outcome = imu.calibrate_accel_with(0.01, &params(3, 1)).unwrap();
            assert_eq!(outcome, CalibrationOutcome::TimedOut);
            assert_eq!(imu.get_offset(Sensor::Accel).unwrap().x, expected_x);
        }
    }

    #[test]
    fn test_converges_against_responsive_sensor() {
        // output moves 8 LSB per offset LSB, as at ±2 g
        let regs = MockRegisters::new().with_accel_offset_response([40, -24, 16384 + 80], 8);
        let mut imu = driver(regs);

        let tolerance = 10.0 / 16384.0;
        let outcome = imu.calibrate_accel_with(tolerance, &params(2, 50)).unwrap();
        assert_eq!(outcome, CalibrationOutcome::Converged);

        // nine nudges, then the converged write
        assert_eq!(imu.interface().write_count(REG_XA_OFFS_L), 10);
        assert_eq!(
            imu.get_offset(Sensor::Accel).unwrap(),
            AxisOffset::new(-5, 3, -9)
        );
    }

    #[test]
    fn test_uses_configured_scale_as_reference() {
        let config = Mpu6050Config::default().with_accel_scale(AccelScale::G16);
        let regs = MockRegisters::new().with_accel_raw([0, 0, 2048]);
        let mut imu = Mpu6050::new_with_interface(regs, config);
        assert_eq!(
            imu.calibrate_accel_with(0.01, &params(1, 1)).unwrap(),
            CalibrationOutcome::Converged
        );
    }

    #[test]
    fn test_write_failure_aborts() {
        let regs = MockRegisters::new()
            .with_accel_raw([1000, 0, 16384])
            .with_stuck_register(REG_YA_OFFS_L, 0x55);
        let mut imu = driver(regs);

        assert_eq!(
            imu.calibrate_accel_with(0.01, &params(2, 10)),
            Err(DriverError::OffsetVerify {
                sensor: Sensor::Accel,
                axis: Axis::Y,
                byte: OffsetByte::Low,
            })
        );
        // no second batch after the failed write
        assert_eq!(imu.interface().read_count(REG_ACCEL_XOUT_L), 2);
    }

    #[test]
    fn test_bus_failure_aborts() {
        let regs = MockRegisters::new().with_failing_register(REG_ACCEL_XOUT_L);
        let mut imu = driver(regs);
        assert_eq!(
            imu.calibrate_accel(0.01),
            Err(DriverError::Connection(Some(MockBusError {
                register: REG_ACCEL_XOUT_L
            })))
        );
    }

    #[test]
    fn test_wrong_identity_aborts_before_sampling() {
        let mut imu = driver(MockRegisters::new().with_identity(0x98));
        assert_eq!(imu.calibrate_accel(0.01), Err(DriverError::Connection(None)));
        assert_eq!(imu.interface().accesses().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let mut imu = driver(MockRegisters::new());
        assert_eq!(
            imu.calibrate_accel(-1.0),
            Err(DriverError::InvalidParameter)
        );
        assert_eq!(
            imu.calibrate_accel_with(0.01, &params(0, 10)),
            Err(DriverError::InvalidParameter)
        );
        assert_eq!(
            imu.calibrate_accel_with(0.01, &params(10, 0)),
            Err(DriverError::InvalidParameter)
        );
    }
}
