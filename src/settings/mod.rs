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
use std::path::{Path, PathBuf};
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

use drivetrain::{ManualTransmission, Vehicle, VehicleParameters};
use crate::error::SimulationError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TransmissionSettings {
    /// First gear first
    pub gear_ratios: Vec<f64>,
    pub final_drive: f64,
    /// Meters
    pub wheel_radius: f64,
    /// RPM
    pub redline: f64
}

/// Everything needed to build a vehicle and its gearbox.
///
/// Values are layered: built-in defaults, then a TOML file, then
/// `DRIVE_SIM_<SECTION>__<KEY>` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimulationSettings {
    pub vehicle: VehicleParameters,
    pub transmission: TransmissionSettings
}

impl SimulationSettings {
    const ENGINE_POWER: &'static str = "vehicle.engine_power";
    const ENGINE_TORQUE: &'static str = "vehicle.engine_torque";
    const BRAKING_POWER: &'static str = "vehicle.braking_power";
    const MASS: &'static str = "vehicle.mass";
    const SIMULATION_TICK: &'static str = "vehicle.simulation_tick";
    const INITIAL_SPEED: &'static str = "vehicle.initial_speed";
    const GEAR_RATIOS: &'static str = "transmission.gear_ratios";
    const FINAL_DRIVE: &'static str = "transmission.final_drive";
    const WHEEL_RADIUS: &'static str = "transmission.wheel_radius";
    const REDLINE: &'static str = "transmission.redline";
    const ENV_PREFIX: &'static str = "DRIVE_SIM";
    pub const CONFIG_FILENAME: &'static str = "drive-sim.toml";

    /// Load from a TOML file on top of the defaults, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self, SimulationError> {
        info!("Loading simulation settings from {}", path.display());
        let settings = SimulationSettings::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(SimulationSettings::environment())
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load from TOML text on top of the defaults
    pub fn from_toml_str(toml_data: &str) -> Result<Self, SimulationError> {
        let settings = SimulationSettings::builder_with_defaults()?
            .add_source(File::from_str(toml_data, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// The built-in defaults with environment overrides applied
    pub fn from_environment() -> Result<Self, SimulationError> {
        let settings = SimulationSettings::builder_with_defaults()?
            .add_source(SimulationSettings::environment())
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    fn environment() -> Environment {
        Environment::with_prefix(SimulationSettings::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = SimulationSettings::default();
        Config::builder()
            .set_default(SimulationSettings::ENGINE_POWER, defaults.vehicle.engine_power)?
            .set_default(SimulationSettings::ENGINE_TORQUE, defaults.vehicle.engine_torque)?
            .set_default(SimulationSettings::BRAKING_POWER, defaults.vehicle.braking_power)?
            .set_default(SimulationSettings::MASS, defaults.vehicle.mass)?
            .set_default(SimulationSettings::SIMULATION_TICK, defaults.vehicle.simulation_tick)?
            .set_default(SimulationSettings::INITIAL_SPEED, defaults.vehicle.initial_speed)?
            .set_default(SimulationSettings::GEAR_RATIOS, defaults.transmission.gear_ratios)?
            .set_default(SimulationSettings::FINAL_DRIVE, defaults.transmission.final_drive)?
            .set_default(SimulationSettings::WHEEL_RADIUS, defaults.transmission.wheel_radius)?
            .set_default(SimulationSettings::REDLINE, defaults.transmission.redline)
    }

    /// Build the gearbox for the configured starting speed and fit it to a new vehicle
    pub fn build_vehicle(&self) -> Result<Vehicle<ManualTransmission>, SimulationError> {
        let transmission = ManualTransmission::new(self.transmission.gear_ratios.clone(),
                                                   self.transmission.final_drive,
                                                   self.transmission.wheel_radius,
                                                   self.transmission.redline,
                                                   self.vehicle.initial_speed)?;
        Ok(Vehicle::new(self.vehicle.clone(), transmission)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), SimulationError> {
        fs::write(path, toml::to_string(&self)?)?;
        Ok(())
    }
}

impl Default for SimulationSettings {
    /// A 485 kW, 1521 kg car with a six speed gearbox
    fn default() -> Self {
        SimulationSettings {
            vehicle: VehicleParameters {
                engine_power: 485000.0,
                engine_torque: 813.0,
                braking_power: 600.0,
                mass: 1521.0,
                simulation_tick: 0.001,
                initial_speed: 0.0
            },
            transmission: TransmissionSettings {
                gear_ratios: vec![2.26, 1.58, 1.19, 1.00, 0.77, 0.63],
                final_drive: 3.55,
                wheel_radius: 0.2413,
                redline: 6150.0
            }
        }
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "zephyrj", "drive-sim")
        .map(|dirs| dirs.config_dir().join(SimulationSettings::CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use drivetrain::{ErrorKind, Transmission};
    use crate::error::SimulationError;
    use crate::settings::{default_settings_path, SimulationSettings};

    #[test]
    fn empty_file_gives_defaults() {
        let settings = SimulationSettings::from_toml_str("").unwrap();
        assert_eq!(settings, SimulationSettings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = SimulationSettings::from_toml_str(r#"
            [vehicle]
            mass = 1200
            initial_speed = 25.0

            [transmission]
            gear_ratios = [3.0, 2.0, 1.0]
            redline = 7000
        "#).unwrap();
        assert_eq!(settings.vehicle.mass, 1200.0);
        assert_eq!(settings.vehicle.engine_power, 485000.0);
        assert_eq!(settings.transmission.gear_ratios, vec![3.0, 2.0, 1.0]);
        assert_eq!(settings.transmission.redline, 7000.0);
        assert_eq!(settings.transmission.final_drive, 3.55);
    }

    #[test]
    fn built_vehicle_starts_in_matching_gear() {
        let mut settings = SimulationSettings::default();
        settings.vehicle.initial_speed = 25.0;
        let vehicle = settings.build_vehicle().unwrap();
        assert_eq!(vehicle.transmission().current_gear(), 2);
        assert!((vehicle.current_speed() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_settings_surface_drivetrain_errors() {
        let mut settings = SimulationSettings::default();
        settings.vehicle.mass = -1.0;
        match settings.build_vehicle() {
            Err(SimulationError::Drivetrain(e)) => assert_eq!(e.kind(), ErrorKind::InvalidArgument),
            other => panic!("unexpected result {:?}", other.map(|v| v.current_speed()))
        }

        let mut settings = SimulationSettings::default();
        settings.vehicle.initial_speed = 200.0;
        match settings.build_vehicle() {
            Err(SimulationError::Drivetrain(e)) => assert_eq!(e.kind(), ErrorKind::ConfigurationError),
            other => panic!("unexpected result {:?}", other.map(|v| v.current_speed()))
        }
    }

    #[test]
    fn written_settings_load_back() {
        let mut settings = SimulationSettings::default();
        settings.vehicle.simulation_tick = 0.01;
        let path = std::env::temp_dir().join(format!("drive-sim-settings-{}.toml", std::process::id()));
        settings.write(&path).unwrap();
        let loaded = SimulationSettings::from_toml_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn environment_overrides_defaults() {
        std::env::set_var("DRIVE_SIM_VEHICLE__MASS", "1600");
        std::env::set_var("DRIVE_SIM_TRANSMISSION__REDLINE", "7200.5");
        let settings = SimulationSettings::from_environment();
        std::env::remove_var("DRIVE_SIM_VEHICLE__MASS");
        std::env::remove_var("DRIVE_SIM_TRANSMISSION__REDLINE");

        let settings = settings.unwrap();
        assert_eq!(settings.vehicle.mass, 1600.0);
        assert_eq!(settings.transmission.redline, 7200.5);
        assert_eq!(settings.vehicle.engine_power, 485000.0);
        assert_eq!(settings.transmission.gear_ratios, SimulationSettings::default().transmission.gear_ratios);
    }

    #[test]
    fn default_path_is_in_config_dir() {
        // No home directory means no path, e.g. in a bare container
        if let Some(path) = default_settings_path() {
            assert!(path.ends_with(SimulationSettings::CONFIG_FILENAME));
            assert!(path.to_string_lossy().contains("drive-sim"));
        }
    }
}
