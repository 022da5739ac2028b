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

use std::path::Path;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::error::SimulationError;

pub const LOG_FILENAME: &str = "drive_sim.log";

/// Send all tracing output to `drive_sim.log` in `log_dir`.
///
/// Only one global subscriber can be installed per process. Later calls fail
/// with `SimulationError::Logging` and leave the first one in place.
pub fn init_file_logging(log_dir: &Path) -> Result<(), SimulationError> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILENAME)
        .build(log_dir)
        .map_err(|e| SimulationError::Logging(e.to_string()))?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SimulationError::Logging(e.to_string()))?;
    info!("Logging initialised");
    Ok(())
}
