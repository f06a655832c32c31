//! InitialSolution plugin - seeds the navigation solution from configuration

use config_loader::keys;
use contracts::{Bus, Configuration, Geodetic, Mode, Plugin, Solution, UnitConstants};
use tracing::{info, warn};

const NAME: &str = "initial_solution";

/// Seeds position from `{imu: lat, lon, alt}` during Init.
///
/// Latitude and longitude are read in degrees and stored in radians.
/// Velocity and attitude start at zero. A coordinate outside its valid range
/// is ignored and left at zero.
#[derive(Debug, Default)]
pub struct InitialSolution {
    seeded: Option<Geodetic>,
}

impl InitialSolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position seeded during the last Init, if any
    pub fn seeded(&self) -> Option<Geodetic> {
        self.seeded
    }
}

fn angle(config: &Configuration, key: &str, limit: f64, units: &UnitConstants) -> f64 {
    match config.number(key) {
        Some(deg) if deg.abs() <= limit => units.to_radians(deg),
        Some(deg) => {
            warn!(plugin = NAME, key, value = deg, limit, "initial coordinate out of range, ignored");
            0.0
        }
        None => 0.0,
    }
}

/// Position described by an `{imu: ...}` block
pub fn initial_position(config: &Configuration, units: &UnitConstants) -> Geodetic {
    Geodetic {
        latitude: angle(config, keys::LAT, 90.0, units),
        longitude: angle(config, keys::LON, 180.0, units),
        altitude: config.number(keys::ALT).unwrap_or(0.0),
    }
}

impl Plugin for InitialSolution {
    fn name(&self) -> &str {
        NAME
    }

    fn invoke(&mut self, bus: &mut Bus) {
        if bus.mode() != Mode::Init {
            return;
        }
        let Some(imu) = bus.imu_mut() else {
            return;
        };

        let position = initial_position(imu.configuration(), imu.units());
        imu.solution = Solution {
            position,
            ..Solution::default()
        };
        info!(
            plugin = NAME,
            lat_deg = imu.units().to_degrees(position.latitude),
            lon_deg = imu.units().to_degrees(position.longitude),
            alt_m = position.altitude,
            "initial solution seeded"
        );
        self.seeded = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(config: &str) -> (InitialSolution, Bus) {
        let mut bus = Bus::with_configuration(Configuration::new(config));
        let mut plugin = InitialSolution::new();
        plugin.invoke(&mut bus);
        (plugin, bus)
    }

    #[test]
    fn test_seed_from_sample_configuration() {
        let (plugin, bus) = seed(keys::SAMPLE_CONFIGURATION);
        let solution = bus.imu().unwrap().solution;
        assert!((solution.position.latitude - 55.0000302831f64.to_radians()).abs() < 1e-12);
        assert!((solution.position.longitude - 37.0000369619f64.to_radians()).abs() < 1e-12);
        assert_eq!(solution.position.altitude, 200.0);
        assert_eq!(solution.velocity, contracts::Vector3::zeros());
        assert_eq!(plugin.seeded(), Some(solution.position));
    }

    #[test]
    fn test_out_of_range_ignored() {
        let (_, bus) = seed("{imu: lat = 95, lon = -200, alt = 10}");
        let position = bus.imu().unwrap().solution.position;
        assert_eq!(position.latitude, 0.0);
        assert_eq!(position.longitude, 0.0);
        assert_eq!(position.altitude, 10.0);
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let (_, bus) = seed("{imu: freq = 400}");
        assert_eq!(bus.imu().unwrap().solution, Solution::default());
    }

    #[test]
    fn test_run_leaves_solution_alone() {
        let mut bus = Bus::with_configuration(Configuration::new("{imu: lat = 10}"));
        bus.enter_run();
        let mut plugin = InitialSolution::new();
        plugin.invoke(&mut bus);
        assert_eq!(bus.imu().unwrap().solution, Solution::default());
        assert!(plugin.seeded().is_none());
    }

    #[test]
    fn test_noop_without_imu() {
        let (plugin, bus) = seed("lat = 10");
        assert!(bus.imu().is_none());
        assert!(plugin.seeded().is_none());
    }
}
