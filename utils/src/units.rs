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

pub const MPS_TO_MPH: f64 = 2.23694;
pub const MPS_TO_KMH: f64 = 3.6;

pub fn mps_to_mph(speed_mps: f64) -> f64 {
    speed_mps * MPS_TO_MPH
}

pub fn mps_to_kmh(speed_mps: f64) -> f64 {
    speed_mps * MPS_TO_KMH
}

/// Convert a rotational speed in revolutions per minute to radians per second
pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 {
    rpm * 2.0 * std::f64::consts::PI / 60.0
}

/// Convert a rotational speed in radians per second to revolutions per minute
pub fn rad_per_sec_to_rpm(rad_per_sec: f64) -> f64 {
    rad_per_sec * 60.0 / (2.0 * std::f64::consts::PI)
}
