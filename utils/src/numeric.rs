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

pub fn is_positive_finite(val: f64) -> bool {
    val.is_finite() && val > 0.0
}

pub fn is_non_negative_finite(val: f64) -> bool {
    val.is_finite() && val >= 0.0
}
