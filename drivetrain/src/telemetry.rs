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

use serde::Serialize;

/// Read-only snapshot of a vehicle and its transmission for display or export
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Telemetry {
    /// Seconds since the vehicle was created
    pub elapsed_time: f64,
    pub speed_mps: f64,
    pub speed_mph: f64,
    pub speed_kmh: f64,
    pub gear: usize,
    /// RPM
    pub engine_speed: f64,
    /// RPM. Infinite for a transmission without a rev limit
    pub redline: f64,
    /// Joules
    pub kinetic_energy: f64
}

impl Telemetry {
    /// Fraction of the rev range in use, for drawing a tachometer
    pub fn redline_fraction(&self) -> f64 {
        if self.redline.is_finite() {
            self.engine_speed / self.redline
        } else {
            0.0
        }
    }
}
