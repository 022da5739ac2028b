/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of drive-sim.
 *
 * drive-sim is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * drive-sim is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with drive-sim. If not, see <https://www.gnu.org/licenses/>.
 */

use tracing::{debug, warn};
use utils::numeric::{is_non_negative_finite, is_positive_finite};

use crate::error::{Error, ErrorKind, Result};
use crate::traits::Transmission;
use crate::transmission::{engine_rpm_for_road_speed, road_speed_for_engine_rpm};

/// A manual gearbox feeding a fixed final drive.
///
/// Gears are numbered from 1 in the order the ratios were supplied.
#[derive(Clone, Debug)]
pub struct ManualTransmission {
    gear_ratios: Vec<f64>,
    gear_idx: usize,
    final_drive: f64,
    wheel_radius: f64,
    redline: f64,
    engine_speed: f64
}

impl ManualTransmission {
    /// Build a gearbox and put it in the lowest gear that keeps the engine at or
    /// below `redline` when the car is travelling at `initial_speed` (m/s).
    ///
    /// - `gear_ratios`: ratio for each gear, first gear first
    /// - `final_drive`: final drive ratio applied after the gearbox
    /// - `wheel_radius`: driven wheel radius in meters
    /// - `redline`: maximum engine speed in RPM
    ///
    /// Fails with `ConfigurationError` if even the last gear over-revs the engine.
    pub fn new(gear_ratios: Vec<f64>,
               final_drive: f64,
               wheel_radius: f64,
               redline: f64,
               initial_speed: f64) -> Result<ManualTransmission>
    {
        if gear_ratios.is_empty() {
            return Err(Error::invalid_argument("at least one gear ratio is required"));
        }
        if let Some((idx, ratio)) = gear_ratios.iter().enumerate().find(|(_, r)| !is_positive_finite(**r)) {
            return Err(Error::invalid_argument(format!("gear {} has invalid ratio {}", idx + 1, ratio)));
        }
        if !is_positive_finite(final_drive) {
            return Err(Error::invalid_argument(format!("final drive must be positive, got {}", final_drive)));
        }
        if !is_positive_finite(wheel_radius) {
            return Err(Error::invalid_argument(format!("wheel radius must be positive, got {}", wheel_radius)));
        }
        if !is_positive_finite(redline) {
            return Err(Error::invalid_argument(format!("redline must be positive, got {}", redline)));
        }
        if !is_non_negative_finite(initial_speed) {
            return Err(Error::invalid_argument(format!("initial speed must be >= 0, got {}", initial_speed)));
        }

        let mut transmission = ManualTransmission {
            gear_ratios,
            gear_idx: 0,
            final_drive,
            wheel_radius,
            redline,
            engine_speed: 0.0
        };
        transmission.select_starting_gear(initial_speed)?;
        Ok(transmission)
    }

    fn select_starting_gear(&mut self, road_speed: f64) -> Result<()> {
        self.engine_speed = self.engine_speed_in_gear_idx(road_speed, self.gear_idx);
        while self.engine_speed > self.redline {
            if self.gear_idx + 1 >= self.gear_ratios.len() {
                return Err(Error::new(
                    ErrorKind::ConfigurationError,
                    format!("{:.1} rpm in top gear at {:.2} m/s exceeds redline of {:.1} rpm",
                            self.engine_speed, road_speed, self.redline)
                ));
            }
            self.gear_idx += 1;
            self.engine_speed = self.engine_speed_in_gear_idx(road_speed, self.gear_idx);
        }
        debug!("Starting in gear {} at {:.1} rpm", self.gear_idx + 1, self.engine_speed);
        Ok(())
    }

    fn overall_ratio(&self, gear_idx: usize) -> f64 {
        self.gear_ratios[gear_idx] * self.final_drive
    }

    fn engine_speed_in_gear_idx(&self, road_speed: f64, gear_idx: usize) -> f64 {
        engine_rpm_for_road_speed(road_speed, self.wheel_radius, self.overall_ratio(gear_idx))
    }

    pub fn gear_ratios(&self) -> &[f64] {
        &self.gear_ratios
    }

    /// Ratio of `gear` (numbered from 1), if the gearbox has one
    pub fn gear_ratio(&self, gear: usize) -> Option<f64> {
        gear.checked_sub(1).and_then(|idx| self.gear_ratios.get(idx).copied())
    }

    pub fn final_drive(&self) -> f64 {
        self.final_drive
    }

    pub fn wheel_radius(&self) -> f64 {
        self.wheel_radius
    }

    /// Road speed (m/s) at which the current gear hits redline
    pub fn max_road_speed(&self) -> f64 {
        road_speed_for_engine_rpm(self.redline, self.wheel_radius, self.overall_ratio(self.gear_idx))
    }
}

impl Transmission for ManualTransmission {
    fn engine_speed(&self) -> f64 {
        self.engine_speed
    }

    fn redline(&self) -> f64 {
        self.redline
    }

    fn current_gear(&self) -> usize {
        self.gear_idx + 1
    }

    fn gear_count(&self) -> usize {
        self.gear_ratios.len()
    }

    fn road_speed_from_engine_speed(&self) -> f64 {
        road_speed_for_engine_rpm(self.engine_speed, self.wheel_radius, self.overall_ratio(self.gear_idx))
    }

    fn update_engine_speed(&mut self, road_speed: f64) -> Result<()> {
        if !is_non_negative_finite(road_speed) {
            return Err(Error::invalid_argument(format!("road speed must be >= 0, got {}", road_speed)));
        }
        self.engine_speed = self.engine_speed_in_gear_idx(road_speed, self.gear_idx);
        if self.engine_speed > self.redline {
            let requested = self.engine_speed;
            self.engine_speed = self.redline;
            return Err(Error::new(
                ErrorKind::OverRedline,
                format!("{:.1} rpm in gear {} exceeds redline of {:.1} rpm",
                        requested, self.current_gear(), self.redline)
            ));
        }
        Ok(())
    }

    fn shift_to(&mut self, gear: usize) -> Result<()> {
        if gear == 0 || gear > self.gear_ratios.len() {
            return Err(Error::invalid_argument(
                format!("gear {} doesn't exist. Gearbox has {} gears", gear, self.gear_ratios.len())
            ));
        }
        let from_gear = self.current_gear();
        if gear == from_gear {
            return Ok(());
        }

        let road_speed = self.road_speed_from_engine_speed();
        let previous_engine_speed = self.engine_speed;
        self.gear_idx = gear - 1;
        match self.update_engine_speed(road_speed) {
            Ok(_) => {
                debug!("Shifted {} -> {} at {:.2} m/s. Engine now at {:.1} rpm",
                       from_gear, gear, road_speed, self.engine_speed);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::OverRedline => {
                self.gear_idx = from_gear - 1;
                self.engine_speed = previous_engine_speed;
                warn!("Rejected shift {} -> {} at {:.2} m/s. {}", from_gear, gear, road_speed, e.details());
                Err(Error::new(
                    ErrorKind::InvalidShift,
                    format!("gear {} at {:.2} m/s. {}", gear, road_speed, e.details())
                ))
            }
            Err(e) => Err(e)
        }
    }
}
