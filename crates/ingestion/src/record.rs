//! Sensor record parsing
//!
//! One line holds six whitespace-separated decimals:
//! angular rate x/y/z (deg/s), specific force x/y/z (m/s²).
//! Extra trailing fields are ignored.

use contracts::Vector3;

/// Number of numeric fields required per record
pub const FIELDS_PER_RECORD: usize = 6;

/// Raw sample in source units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Angular rate (deg/s)
    pub angular_rate: Vector3<f64>,
    /// Specific force (m/s²)
    pub specific_force: Vector3<f64>,
}

/// Parse a record.
///
/// On failure returns how many leading fields parsed before the first
/// missing or non-numeric one.
pub fn parse_record(line: &str) -> Result<RawSample, usize> {
    let mut values = [0.0f64; FIELDS_PER_RECORD];
    let mut fields = line.split_whitespace();
    for (parsed, slot) in values.iter_mut().enumerate() {
        *slot = match fields.next().map(str::parse::<f64>) {
            Some(Ok(v)) => v,
            _ => return Err(parsed),
        };
    }
    let [wx, wy, wz, fx, fy, fz] = values;
    Ok(RawSample {
        angular_rate: Vector3::new(wx, wy, wz),
        specific_force: Vector3::new(fx, fy, fz),
    })
}
