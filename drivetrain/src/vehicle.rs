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

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use utils::numeric::{is_non_negative_finite, is_positive_finite};
use utils::units::{mps_to_kmh, mps_to_mph};

use crate::error::{Error, ErrorKind, Result};
use crate::telemetry::Telemetry;
use crate::traits::Transmission;
use crate::transmission::ManualTransmission;

/// Construction inputs for a [`Vehicle`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleParameters {
    /// Watts delivered to the road every tick
    pub engine_power: f64,
    /// Carried for a future torque based model. Not used by the integrator
    #[serde(default)]
    pub engine_torque: f64,
    /// Carried for a future braking model. Not used by the integrator
    #[serde(default)]
    pub braking_power: f64,
    /// kg
    pub mass: f64,
    /// Seconds per integration step
    pub simulation_tick: f64,
    /// m/s
    #[serde(default)]
    pub initial_speed: f64
}

/// A car whose motion is tracked as kinetic energy.
///
/// Every tick the engine adds `engine_power * simulation_tick` joules. The
/// transmission then gets a chance to reject the resulting road speed, in
/// which case the car is pulled back to the speed at which the current gear
/// hits redline.
#[derive(Clone, Debug)]
pub struct Vehicle<T: Transmission = ManualTransmission> {
    engine_power: f64,
    engine_torque: f64,
    braking_power: f64,
    mass: f64,
    simulation_tick: f64,
    kinetic_energy: f64,
    elapsed_time: f64,
    tick_count: u64,
    transmission: T
}

impl<T: Transmission> Vehicle<T> {
    /// Create a vehicle travelling at `parameters.initial_speed`.
    ///
    /// The transmission must already have picked a gear for that same speed;
    /// this isn't checked here.
    pub fn new(parameters: VehicleParameters, transmission: T) -> Result<Vehicle<T>> {
        let VehicleParameters {
            engine_power, engine_torque, braking_power, mass, simulation_tick, initial_speed
        } = parameters;
        if !is_positive_finite(mass) {
            return Err(Error::invalid_argument(format!("mass must be positive, got {}", mass)));
        }
        if !is_positive_finite(simulation_tick) {
            return Err(Error::invalid_argument(format!("simulation tick must be positive, got {}", simulation_tick)));
        }
        if !is_non_negative_finite(engine_power) {
            return Err(Error::invalid_argument(format!("engine power must be >= 0, got {}", engine_power)));
        }
        if !is_non_negative_finite(initial_speed) {
            return Err(Error::invalid_argument(format!("initial speed must be >= 0, got {}", initial_speed)));
        }

        Ok(Vehicle {
            engine_power,
            engine_torque,
            braking_power,
            mass,
            simulation_tick,
            kinetic_energy: kinetic_energy_at(mass, initial_speed),
            elapsed_time: 0.0,
            tick_count: 0,
            transmission
        })
    }

    /// Road speed in m/s
    pub fn current_speed(&self) -> f64 {
        (2.0 * self.kinetic_energy / self.mass).sqrt()
    }

    pub fn speed_mph(&self) -> f64 {
        mps_to_mph(self.current_speed())
    }

    /// Advance the simulation by a single tick
    pub fn step(&mut self) {
        self.kinetic_energy += self.engine_power * self.simulation_tick;
        self.elapsed_time += self.simulation_tick;
        self.tick_count += 1;

        let speed = self.current_speed();
        if let Err(e) = self.transmission.update_engine_speed(speed) {
            match e.kind() {
                ErrorKind::OverRedline => {
                    self.kinetic_energy = kinetic_energy_at(self.mass, self.transmission.road_speed_from_engine_speed());
                    trace!("Rev limiter active at tick {}. {}", self.tick_count, e.details());
                }
                _ => {
                    // Speed derived from kinetic energy is always finite and >= 0, so
                    // the only error a well behaved transmission can raise here is OverRedline
                    debug_assert!(false, "unexpected transmission error: {}", e);
                    warn!("Unexpected transmission error at tick {}. {}", self.tick_count, e);
                }
            }
        }
    }

    /// Run `floor(time / simulation_tick)` ticks and return how many were run.
    ///
    /// Any remainder shorter than a tick is dropped.
    pub fn advance_for_duration(&mut self, time: f64) -> Result<u64> {
        if !is_non_negative_finite(time) {
            return Err(Error::invalid_argument(format!("duration must be >= 0, got {}", time)));
        }
        let steps = (time / self.simulation_tick).floor() as u64;
        for _ in 0..steps {
            self.step();
        }
        debug!("Advanced {} ticks to t={:.3}s. {:.2} m/s in gear {} at {:.1} rpm",
               steps, self.elapsed_time, self.current_speed(),
               self.transmission.current_gear(), self.transmission.engine_speed());
        Ok(steps)
    }

    /// Ask the transmission for a different gear.
    ///
    /// A rejected shift (`InvalidShift`) leaves both the gearbox and the
    /// vehicle's speed untouched.
    pub fn request_gear_shift(&mut self, gear: usize) -> Result<()> {
        self.transmission.shift_to(gear)
    }

    pub fn telemetry(&self) -> Telemetry {
        let speed = self.current_speed();
        Telemetry {
            elapsed_time: self.elapsed_time,
            speed_mps: speed,
            speed_mph: mps_to_mph(speed),
            speed_kmh: mps_to_kmh(speed),
            gear: self.transmission.current_gear(),
            engine_speed: self.transmission.engine_speed(),
            redline: self.transmission.redline(),
            kinetic_energy: self.kinetic_energy
        }
    }

    pub fn transmission(&self) -> &T {
        &self.transmission
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.kinetic_energy
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn engine_power(&self) -> f64 {
        self.engine_power
    }

    pub fn engine_torque(&self) -> f64 {
        self.engine_torque
    }

    pub fn braking_power(&self) -> f64 {
        self.braking_power
    }

    pub fn simulation_tick(&self) -> f64 {
        self.simulation_tick
    }
}

fn kinetic_energy_at(mass: f64, speed: f64) -> f64 {
    0.5 * mass * speed * speed
}

#[cfg(test)]
mod tests {
    use crate::error::{Error, ErrorKind};
    use crate::traits::Transmission;
    use crate::transmission::{DirectDrive, ManualTransmission};
    use crate::vehicle::{Vehicle, VehicleParameters};

    const REDLINE: f64 = 6150.0;

    fn params(initial_speed: f64) -> VehicleParameters {
        VehicleParameters {
            engine_power: 485000.0,
            engine_torque: 813.0,
            braking_power: 600.0,
            mass: 1521.0,
            simulation_tick: 0.001,
            initial_speed
        }
    }

    fn viper(initial_speed: f64) -> Vehicle {
        let transmission = ManualTransmission::new(vec![2.26, 1.58, 1.19, 1.00, 0.77, 0.63],
                                                   3.55, 0.2413, REDLINE, initial_speed).unwrap();
        Vehicle::new(params(initial_speed), transmission).unwrap()
    }

    fn direct(parameters: VehicleParameters) -> crate::error::Result<Vehicle<DirectDrive>> {
        Vehicle::new(parameters, DirectDrive::new(3.55, 0.2413).unwrap())
    }

    #[test]
    fn invalid_construction_arguments() {
        let mut p = params(0.0);
        p.mass = -1.0;
        assert_eq!(direct(p).unwrap_err().kind(), ErrorKind::InvalidArgument);

        let mut p = params(0.0);
        p.mass = 0.0;
        assert_eq!(direct(p).unwrap_err().kind(), ErrorKind::InvalidArgument);

        let mut p = params(0.0);
        p.simulation_tick = 0.0;
        assert_eq!(direct(p).unwrap_err().kind(), ErrorKind::InvalidArgument);

        let mut p = params(0.0);
        p.engine_power = -1.0;
        assert_eq!(direct(p).unwrap_err().kind(), ErrorKind::InvalidArgument);

        let p = params(-1.0);
        assert_eq!(direct(p).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn initial_state() {
        let v = viper(10.0);
        assert!((v.current_speed() - 10.0).abs() < 1e-12);
        assert!((v.kinetic_energy() - 0.5 * 1521.0 * 100.0).abs() < 1e-9);
        assert_eq!(v.elapsed_time(), 0.0);
        assert_eq!(v.tick_count(), 0);
        assert_eq!(v.engine_torque(), 813.0);
        assert_eq!(v.braking_power(), 600.0);
    }

    #[test]
    fn one_second_is_one_thousand_ticks() {
        let mut v = viper(0.0);
        assert_eq!(v.advance_for_duration(1.0).unwrap(), 1000);
        assert_eq!(v.tick_count(), 1000);
        assert!((v.elapsed_time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_ticks_are_dropped() {
        let mut v = viper(0.0);
        assert_eq!(v.advance_for_duration(0.0105).unwrap(), 10);
        assert_eq!(v.advance_for_duration(0.0009).unwrap(), 0);
        assert_eq!(v.advance_for_duration(0.0).unwrap(), 0);
        assert_eq!(v.tick_count(), 10);
    }

    #[test]
    fn negative_duration_rejected() {
        let mut v = viper(0.0);
        assert_eq!(v.advance_for_duration(-1.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(v.advance_for_duration(f64::NAN).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(v.tick_count(), 0);
    }

    #[test]
    fn energy_accumulates_below_redline() {
        let mut v = viper(0.0);
        v.advance_for_duration(0.25).unwrap();
        assert!((v.kinetic_energy() - 485000.0 * 0.25).abs() < 1e-6);
        assert!((v.current_speed() - 12.626740771533468).abs() < 1e-9);
        assert_eq!(v.transmission().current_gear(), 1);
        assert!(v.transmission().engine_speed() < REDLINE);
    }

    #[test]
    fn rev_limiter_holds_speed_at_redline() {
        let mut v = viper(0.0);
        v.advance_for_duration(2.0).unwrap();
        let limit = v.transmission().max_road_speed();
        assert_eq!(v.transmission().engine_speed(), REDLINE);
        assert!((v.current_speed() - limit).abs() < 1e-9);

        v.advance_for_duration(0.5).unwrap();
        assert!((v.current_speed() - limit).abs() < 1e-9);
    }

    #[test]
    fn speed_stays_non_negative() {
        let mut v = viper(0.0);
        for _ in 0..3000 {
            v.step();
            assert!(v.current_speed() >= 0.0);
            assert!(v.transmission().engine_speed() <= REDLINE);
        }
    }

    #[test]
    fn no_power_no_motion() {
        let mut p = params(0.0);
        p.engine_power = 0.0;
        let mut v = direct(p).unwrap();
        v.advance_for_duration(5.0).unwrap();
        assert_eq!(v.current_speed(), 0.0);
    }

    #[test]
    fn direct_drive_is_never_limited() {
        let mut v = direct(params(0.0)).unwrap();
        v.advance_for_duration(3.0).unwrap();
        assert!((v.kinetic_energy() - 485000.0 * 3.0).abs() < 1e-3);
        assert_eq!(v.telemetry().gear, 1);
    }

    #[test]
    fn rejected_shift_leaves_vehicle_untouched() {
        let mut v = viper(0.0);
        v.advance_for_duration(0.25).unwrap();
        v.request_gear_shift(2).unwrap();
        v.advance_for_duration(1.0).unwrap();

        let energy = v.kinetic_energy();
        let rpm = v.transmission().engine_speed();
        let err = v.request_gear_shift(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidShift);
        assert_eq!(v.kinetic_energy(), energy);
        assert_eq!(v.transmission().current_gear(), 2);
        assert_eq!(v.transmission().engine_speed(), rpm);
    }

    #[test]
    fn reference_run() {
        let mut v = viper(0.0);
        v.advance_for_duration(0.25).unwrap();
        v.request_gear_shift(2).unwrap();
        v.advance_for_duration(1.0).unwrap();
        assert!((v.current_speed() - 27.706113923836604).abs() < 1e-9);
        v.request_gear_shift(3).unwrap();
        v.advance_for_duration(1.0).unwrap();

        assert!((v.current_speed() - 36.78626890727885).abs() < 1e-9);
        assert!((v.speed_mph() - 82.28867636944837).abs() < 1e-6);
        assert_eq!(v.tick_count(), 2250);
    }

    /// Transmission that fails every update with something other than OverRedline
    #[derive(Clone, Debug)]
    struct JammedGearbox;

    impl Transmission for JammedGearbox {
        fn engine_speed(&self) -> f64 { 0.0 }
        fn redline(&self) -> f64 { REDLINE }
        fn current_gear(&self) -> usize { 1 }
        fn gear_count(&self) -> usize { 1 }
        fn road_speed_from_engine_speed(&self) -> f64 { 0.0 }
        fn update_engine_speed(&mut self, _road_speed: f64) -> crate::error::Result<()> {
            Err(Error::new(ErrorKind::InvalidShift, "jammed".to_string()))
        }
        fn shift_to(&mut self, _gear: usize) -> crate::error::Result<()> {
            Ok(())
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unexpected transmission error")]
    fn unexpected_transmission_error_asserts() {
        let mut v = Vehicle::new(params(0.0), JammedGearbox).unwrap();
        v.step();
    }

    #[test]
    fn telemetry_snapshot() {
        let mut v = viper(0.0);
        v.advance_for_duration(0.1).unwrap();
        let t = v.telemetry();
        assert_eq!(t.gear, 1);
        assert_eq!(t.redline, REDLINE);
        assert!((t.speed_mps - v.current_speed()).abs() < 1e-12);
        assert!((t.speed_kmh - t.speed_mps * 3.6).abs() < 1e-12);
        assert!((t.elapsed_time - 0.1).abs() < 1e-9);
    }
}
