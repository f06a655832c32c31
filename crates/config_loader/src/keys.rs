//! Configuration keys and documented defaults

/// `{imu: freq}` - navigation frequency (Hz)
pub const FREQ: &str = "freq";

/// Accepted navigation frequency range (Hz)
pub const FREQ_RANGE_HZ: std::ops::RangeInclusive<f64> = 50.0..=3200.0;

/// Frequency used when `freq` is missing or out of range (Hz)
pub const FREQ_DEFAULT_HZ: f64 = 100.0;

/// `sensors_in` - sensor input file name (top level)
pub const SENSORS_IN: &str = "sensors_in";

/// `out` - navigation output file name (top level)
pub const OUT: &str = "out";

/// `{imu: lat}` - initial latitude (deg)
pub const LAT: &str = "lat";

/// `{imu: lon}` - initial longitude (deg)
pub const LON: &str = "lon";

/// `{imu: alt}` - initial altitude (m)
pub const ALT: &str = "alt";

/// Configuration used by the sample application when none is given
pub const SAMPLE_CONFIGURATION: &str = "{imu: lat = +55.0000302831, lon = +37.0000369619, \
     alt = +200, alignment = 30, freq = 400, vertical_damping_stdev = 0}, \
     sensors_in = wavesim.txt out = ins.nav";
