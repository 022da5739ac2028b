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

use crate::error::Result;

/// The drivetrain seen from the vehicle: something that turns a road speed
/// into an engine speed and may refuse speeds past its redline.
///
/// Gears are numbered from 1.
pub trait Transmission {
    /// Engine speed (RPM) cached by the last successful update or clamp
    fn engine_speed(&self) -> f64;

    /// Maximum permitted engine speed (RPM)
    fn redline(&self) -> f64;

    fn current_gear(&self) -> usize;

    fn gear_count(&self) -> usize;

    /// Road speed (m/s) implied by the current gear and cached engine speed
    fn road_speed_from_engine_speed(&self) -> f64;

    /// Recompute the engine speed for `road_speed` (m/s) in the current gear.
    ///
    /// A negative or non-finite `road_speed` is `InvalidArgument` and leaves
    /// the transmission untouched. If the result is past redline the engine
    /// speed is clamped to exactly redline and an `OverRedline` error is
    /// returned.
    fn update_engine_speed(&mut self, road_speed: f64) -> Result<()>;

    /// Change gear while holding road speed constant.
    ///
    /// Returns `InvalidShift` if the new gear would over-rev the engine, in
    /// which case the transmission is left exactly as it was.
    fn shift_to(&mut self, gear: usize) -> Result<()>;
}
