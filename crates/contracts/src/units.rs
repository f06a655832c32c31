//! Unit conversion constants shared read-only by all plugins

use std::f64::consts::PI;

/// Conversion constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConstants {
    /// Degrees per radian
    pub rad2deg: f64,
}

impl Default for UnitConstants {
    fn default() -> Self {
        Self { rad2deg: 180.0 / PI }
    }
}

impl UnitConstants {
    /// Degrees to radians
    #[inline]
    pub fn to_radians(&self, degrees: f64) -> f64 {
        degrees / self.rad2deg
    }

    /// Radians to degrees
    #[inline]
    pub fn to_degrees(&self, radians: f64) -> f64 {
        radians * self.rad2deg
    }
}
