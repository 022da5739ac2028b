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

use itertools::Itertools;

use crate::traits::Transmission;
use crate::transmission::{engine_rpm_for_road_speed, road_speed_for_engine_rpm, ManualTransmission};

/// Static analysis of a gearbox: what each gear can reach at redline and
/// where the engine lands after an upshift.
///
/// Gears are numbered from 1.
pub struct GearingCalculator {
    gear_ratios: Vec<f64>,
    final_drive: f64,
    wheel_radius: f64,
    redline: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpshiftPoint {
    pub from_gear: usize,
    pub to_gear: usize,
    /// Road speed (m/s) at which `from_gear` hits redline
    pub road_speed: f64,
    /// Engine speed (RPM) in `to_gear` after shifting at that road speed
    pub engine_speed_after: f64,
}

impl GearingCalculator {
    pub fn from_transmission(transmission: &ManualTransmission) -> GearingCalculator {
        GearingCalculator {
            gear_ratios: transmission.gear_ratios().to_vec(),
            final_drive: transmission.final_drive(),
            wheel_radius: transmission.wheel_radius(),
            redline: transmission.redline()
        }
    }

    pub fn max_gear(&self) -> usize {
        self.gear_ratios.len()
    }

    fn overall_ratio(&self, gear: usize) -> Option<f64> {
        gear.checked_sub(1)
            .and_then(|idx| self.gear_ratios.get(idx))
            .map(|ratio| ratio * self.final_drive)
    }

    /// Road speed (m/s) the provided gear reaches at redline
    pub fn max_speed_for_gear(&self, gear: usize) -> Option<f64> {
        self.overall_ratio(gear)
            .map(|ratio| road_speed_for_engine_rpm(self.redline, self.wheel_radius, ratio))
    }

    /// Highest road speed (m/s) reachable in any gear
    pub fn max_speed(&self) -> f64 {
        (1..=self.max_gear())
            .filter_map(|gear| self.max_speed_for_gear(gear))
            .fold(0.0, f64::max)
    }

    /// Engine speed (RPM) at `road_speed` (m/s) in `gear`, ignoring redline
    pub fn engine_speed_at(&self, road_speed: f64, gear: usize) -> Option<f64> {
        self.overall_ratio(gear)
            .map(|ratio| engine_rpm_for_road_speed(road_speed, self.wheel_radius, ratio))
    }

    /// For each pair of consecutive gears, where the engine ends up when
    /// shifting up at redline
    pub fn upshift_points(&self) -> Vec<UpshiftPoint> {
        (1..=self.max_gear())
            .tuple_windows()
            .filter_map(|(from_gear, to_gear)| {
                let road_speed = self.max_speed_for_gear(from_gear)?;
                let engine_speed_after = self.engine_speed_at(road_speed, to_gear)?;
                Some(UpshiftPoint { from_gear, to_gear, road_speed, engine_speed_after })
            })
            .collect()
    }

    /// (road speed m/s, engine RPM) pairs for `gear` from 0 RPM up to redline
    pub fn calculate_speed_plot_for_gear(&self, gear: usize, rpm_increments: Option<f64>) -> Vec<(f64, f64)> {
        let mut plot_data: Vec<(f64, f64)> = Vec::new();
        let ratio = match self.overall_ratio(gear) {
            Some(r) => r,
            None => return plot_data
        };
        let increment = rpm_increments.filter(|i| *i > 0.0).unwrap_or(100.0);
        let mut engine_rpm = 0.0;
        while engine_rpm <= self.redline {
            plot_data.push((road_speed_for_engine_rpm(engine_rpm, self.wheel_radius, ratio), engine_rpm));
            engine_rpm += increment;
        }
        plot_data
    }

    pub fn calculate_speed_plot(&self, rpm_increments: Option<f64>) -> Vec<Vec<(f64, f64)>> {
        (1..=self.max_gear())
            .map(|gear| self.calculate_speed_plot_for_gear(gear, rpm_increments))
            .collect()
    }
}
