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

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    #[error("io error")]
    IoError(#[from] io::Error),
    #[error("drivetrain error. {0}")]
    Drivetrain(#[from] drivetrain::Error),
    #[error("failed to load settings. {0}")]
    Settings(#[from] config::ConfigError),
    #[error("failed to decode toml. {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("failed to encode toml. {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("failed to encode report. {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to init logging. {0}")]
    Logging(String)
}
