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

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use drivetrain::{ErrorKind, Telemetry, Transmission, Vehicle};
use crate::error::SimulationError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Accelerate for the given number of seconds
    Advance { seconds: f64 },
    /// Request a gear change
    Shift { gear: usize }
}

/// An ordered script of driver inputs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub actions: Vec<Action>
}

impl Scenario {
    pub fn from_toml_str(toml_data: &str) -> Result<Scenario, SimulationError> {
        Ok(toml::from_str(toml_data)?)
    }

    pub fn load(path: &Path) -> Result<Scenario, SimulationError> {
        Scenario::from_toml_str(&fs::read_to_string(path)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionRecord {
    pub action: Action,
    /// False only for a shift the transmission refused
    pub accepted: bool,
    pub telemetry: Telemetry
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub records: Vec<ActionRecord>,
    pub rejected_shifts: usize,
    pub final_state: Telemetry
}

impl ScenarioReport {
    pub fn to_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Play `scenario` against `vehicle` in order.
///
/// Refused shifts are recorded and the run carries on. Anything else, such as
/// a negative duration or a gear that doesn't exist, stops the run.
pub fn run_scenario<T: Transmission>(vehicle: &mut Vehicle<T>,
                                     scenario: &Scenario) -> Result<ScenarioReport, SimulationError>
{
    let mut records = Vec::with_capacity(scenario.actions.len());
    let mut rejected_shifts = 0;
    for action in &scenario.actions {
        let accepted = match action {
            Action::Advance { seconds } => {
                vehicle.advance_for_duration(*seconds)?;
                true
            }
            Action::Shift { gear } => {
                match vehicle.request_gear_shift(*gear) {
                    Ok(_) => true,
                    Err(e) if e.kind() == ErrorKind::InvalidShift => {
                        warn!("Shift to gear {} refused at t={:.3}s", gear, vehicle.elapsed_time());
                        rejected_shifts += 1;
                        false
                    }
                    Err(e) => return Err(e.into())
                }
            }
        };
        records.push(ActionRecord { action: action.clone(), accepted, telemetry: vehicle.telemetry() });
    }

    let final_state = vehicle.telemetry();
    info!("Scenario finished after {:.3}s at {:.2} m/s ({:.2} mph) in gear {}",
          final_state.elapsed_time, final_state.speed_mps, final_state.speed_mph, final_state.gear);
    Ok(ScenarioReport { records, rejected_shifts, final_state })
}
