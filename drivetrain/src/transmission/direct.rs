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

use utils::numeric::{is_non_negative_finite, is_positive_finite};

use crate::error::{Error, Result};
use crate::traits::Transmission;
use crate::transmission::{engine_rpm_for_road_speed, road_speed_for_engine_rpm};

/// A single fixed reduction with no rev limit. A car fitted with one of these
/// accelerates for as long as power is applied.
#[derive(Clone, Debug)]
pub struct DirectDrive {
    ratio: f64,
    wheel_radius: f64,
    engine_speed: f64
}

impl DirectDrive {
    pub fn new(ratio: f64, wheel_radius: f64) -> Result<DirectDrive> {
        if !is_positive_finite(ratio) {
            return Err(Error::invalid_argument(format!("ratio must be positive, got {}", ratio)));
        }
        if !is_positive_finite(wheel_radius) {
            return Err(Error::invalid_argument(format!("wheel radius must be positive, got {}", wheel_radius)));
        }
        Ok(DirectDrive { ratio, wheel_radius, engine_speed: 0.0 })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Transmission for DirectDrive {
    fn engine_speed(&self) -> f64 {
        self.engine_speed
    }

    fn redline(&self) -> f64 {
        f64::INFINITY
    }

    fn current_gear(&self) -> usize {
        1
    }

    fn gear_count(&self) -> usize {
        1
    }

    fn road_speed_from_engine_speed(&self) -> f64 {
        road_speed_for_engine_rpm(self.engine_speed, self.wheel_radius, self.ratio)
    }

    fn update_engine_speed(&mut self, road_speed: f64) -> Result<()> {
        if !is_non_negative_finite(road_speed) {
            return Err(Error::invalid_argument(format!("road speed must be >= 0, got {}", road_speed)));
        }
        self.engine_speed = engine_rpm_for_road_speed(road_speed, self.wheel_radius, self.ratio);
        Ok(())
    }

    fn shift_to(&mut self, gear: usize) -> Result<()> {
        match gear {
            1 => Ok(()),
            _ => Err(Error::invalid_argument(format!("gear {} doesn't exist. Direct drive only has gear 1", gear)))
        }
    }
}
