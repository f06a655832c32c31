//! Fixed-step clock

use config_loader::keys;
use contracts::Configuration;

/// Fixed-step navigation clock.
///
/// Time is computed as `step * dt` rather than accumulated, so it does not
/// drift over long runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepClock {
    frequency_hz: f64,
    dt: f64,
    step: u64,
}

impl StepClock {
    /// Clock at `frequency_hz`, falling back to the default outside the
    /// accepted range
    pub fn new(frequency_hz: f64) -> Self {
        let frequency_hz = if keys::FREQ_RANGE_HZ.contains(&frequency_hz) {
            frequency_hz
        } else {
            keys::FREQ_DEFAULT_HZ
        };
        Self {
            frequency_hz,
            dt: 1.0 / frequency_hz,
            step: 0,
        }
    }

    /// Clock from the `freq` key of an `{imu: ...}` block
    pub fn from_configuration(imu: &Configuration) -> Self {
        Self::new(imu.bounded_number(
            keys::FREQ,
            keys::FREQ_RANGE_HZ,
            keys::FREQ_DEFAULT_HZ,
        ))
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    /// Step size (s)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Current time (s)
    pub fn time(&self) -> f64 {
        self.step as f64 * self.dt
    }

    /// Advance one step and return the new time
    pub fn advance(&mut self) -> f64 {
        self.step += 1;
        self.time()
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(keys::FREQ_DEFAULT_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_frequency() {
        for freq in [50.0, 400.0, 1000.0, 3200.0] {
            let clock = StepClock::new(freq);
            assert_eq!(clock.dt(), 1.0 / freq);
        }
    }

    #[test]
    fn test_fallback_frequency() {
        for freq in [0.0, 49.9, 3200.5, -400.0, f64::NAN] {
            let clock = StepClock::new(freq);
            assert_eq!(clock.dt(), 1.0 / 100.0);
        }
    }

    #[test]
    fn test_from_configuration() {
        let imu = Configuration::new("freq = 400");
        assert_eq!(StepClock::from_configuration(&imu).dt(), 0.0025);

        let imu = Configuration::new("freq = fast");
        assert_eq!(StepClock::from_configuration(&imu).dt(), 0.01);

        let imu = Configuration::new("lat = 55");
        assert_eq!(StepClock::from_configuration(&imu).frequency_hz(), 100.0);
    }

    #[test]
    fn test_no_drift() {
        let mut clock = StepClock::new(400.0);
        let mut t = 0.0;
        for _ in 0..1_000_000 {
            t = clock.advance();
        }
        assert_eq!(t, 1_000_000.0 * 0.0025);
        assert_eq!(clock.step(), 1_000_000);
    }
}
