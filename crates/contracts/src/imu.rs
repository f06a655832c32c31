//! Inertial subsystem state held on the bus

use nalgebra::Vector3;
use serde::Serialize;

use crate::{Configuration, UnitConstants};

/// Geodetic position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Geodetic {
    /// Latitude (rad)
    pub latitude: f64,
    /// Longitude (rad)
    pub longitude: f64,
    /// Altitude (m)
    pub altitude: f64,
}

/// Attitude angles (rad)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Attitude {
    pub roll: f64,
    pub pitch: f64,
    /// Heading
    pub yaw: f64,
}

/// Navigation solution
///
/// Produced incrementally by navigation plugins, consumed by output plugins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Solution {
    pub position: Geodetic,
    /// East, north, up (m/s)
    pub velocity: Vector3<f64>,
    pub attitude: Attitude,
}

/// Inertial measurement unit state
///
/// Sensor readings are only visible through [`ImuState::angular_rate`] and
/// [`ImuState::specific_force`] while their validity flag is set, i.e. when
/// they were produced during the current tick.
#[derive(Debug, Clone)]
pub struct ImuState {
    /// Body of the `{imu: ...}` configuration block
    configuration: Configuration,
    /// Angular rate (rad/s)
    angular_rate: Vector3<f64>,
    /// Specific force (m/s²)
    specific_force: Vector3<f64>,
    angular_rate_valid: bool,
    specific_force_valid: bool,
    /// Navigation solution
    pub solution: Solution,
    units: UnitConstants,
}

impl ImuState {
    /// Create state for the given `{imu: ...}` block
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            angular_rate: Vector3::zeros(),
            specific_force: Vector3::zeros(),
            angular_rate_valid: false,
            specific_force_valid: false,
            solution: Solution::default(),
            units: UnitConstants::default(),
        }
    }

    /// Subsystem configuration block
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Shared conversion constants
    pub fn units(&self) -> &UnitConstants {
        &self.units
    }

    /// Clear both validity flags
    pub fn invalidate_sensors(&mut self) {
        self.angular_rate_valid = false;
        self.specific_force_valid = false;
    }

    /// Store a fresh angular rate (rad/s) and mark it valid
    pub fn set_angular_rate(&mut self, value: Vector3<f64>) {
        self.angular_rate = value;
        self.angular_rate_valid = true;
    }

    /// Store a fresh specific force (m/s²) and mark it valid
    pub fn set_specific_force(&mut self, value: Vector3<f64>) {
        self.specific_force = value;
        self.specific_force_valid = true;
    }

    /// Angular rate, if produced this tick
    pub fn angular_rate(&self) -> Option<&Vector3<f64>> {
        self.angular_rate_valid.then_some(&self.angular_rate)
    }

    /// Specific force, if produced this tick
    pub fn specific_force(&self) -> Option<&Vector3<f64>> {
        self.specific_force_valid.then_some(&self.specific_force)
    }

    pub fn angular_rate_valid(&self) -> bool {
        self.angular_rate_valid
    }

    pub fn specific_force_valid(&self) -> bool {
        self.specific_force_valid
    }
}
