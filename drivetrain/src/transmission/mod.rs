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

mod manual;
mod direct;

pub use manual::ManualTransmission;
pub use direct::DirectDrive;

use utils::units::{rad_per_sec_to_rpm, rpm_to_rad_per_sec};

/// Engine speed (RPM) needed to drive the wheels at `road_speed` (m/s) through
/// the given overall ratio (gear ratio multiplied by final drive)
pub fn engine_rpm_for_road_speed(road_speed: f64, wheel_radius: f64, overall_ratio: f64) -> f64 {
    rad_per_sec_to_rpm(road_speed / wheel_radius) * overall_ratio
}

/// Road speed (m/s) produced by an engine turning at `engine_rpm` through the
/// given overall ratio
pub fn road_speed_for_engine_rpm(engine_rpm: f64, wheel_radius: f64, overall_ratio: f64) -> f64 {
    rpm_to_rad_per_sec(engine_rpm) * wheel_radius / overall_ratio
}

#[cfg(test)]
mod tests {
    use crate::transmission::{engine_rpm_for_road_speed, road_speed_for_engine_rpm};

    #[test]
    fn conversions_invert_each_other() {
        let overall = 2.26 * 3.55;
        for rpm in [0.0, 850.0, 3000.0, 6150.0] {
            let speed = road_speed_for_engine_rpm(rpm, 0.2413, overall);
            assert!((engine_rpm_for_road_speed(speed, 0.2413, overall) - rpm).abs() < 1e-9);
        }
    }

    #[test]
    fn one_wheel_revolution_per_second() {
        // 60 wheel rpm through a 1:1 ratio covers one circumference per second
        let radius = 0.3;
        let circumference = 2.0 * std::f64::consts::PI * radius;
        assert!((engine_rpm_for_road_speed(circumference, radius, 1.0) - 60.0).abs() < 1e-9);
    }
}
