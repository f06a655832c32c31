//! Fixed-width navigation record layout
//!
//! Ten columns in four groups: time | lon lat alt | Ve Vn Vu | roll pitch
//! heading. Columns are separated by one space and groups by two, so each
//! value sits right-aligned under its header cell.

use contracts::{Solution, UnitConstants};

/// Header line of the navigation output file
pub const HEADER: &str = "%   time[s]||   lon[deg]  |  lat[deg]  |   alt[m]||   Ve[m/s]|   Vn[m/s]|   Vu[m/s]||    roll[deg]|  pitch[deg]| heading[deg]|";

/// Number of values per output line
pub const COLUMN_COUNT: usize = 10;

/// Output column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    /// Field width, sign included
    pub width: usize,
    /// Digits after the decimal point
    pub precision: usize,
    /// First column of its group
    pub group_start: bool,
}

const fn column(name: &'static str, width: usize, precision: usize, group_start: bool) -> Column {
    Column {
        name,
        width,
        precision,
        group_start,
    }
}

/// Column table in output order
pub const COLUMNS: [Column; COLUMN_COUNT] = [
    column("time", 11, 5, true),
    column("lon", 13, 8, true),
    column("lat", 12, 8, false),
    column("alt", 9, 3, false),
    column("ve", 10, 4, true),
    column("vn", 10, 4, false),
    column("vu", 10, 4, false),
    column("roll", 13, 8, true),
    column("pitch", 12, 8, false),
    column("heading", 13, 8, false),
];

/// Right-justify `value` in `width` with `precision` decimals.
///
/// Non-negative values carry a leading space where the minus sign would go.
pub fn fixed(value: f64, width: usize, precision: usize) -> String {
    let digits = if value.is_sign_negative() {
        format!("{value:.precision$}")
    } else {
        format!(" {value:.precision$}")
    };
    format!("{digits:>width$}")
}

/// Values of one output line in column order, angles in degrees
pub fn record_values(time: f64, solution: &Solution, units: &UnitConstants) -> [f64; COLUMN_COUNT] {
    let position = &solution.position;
    let attitude = &solution.attitude;
    [
        time,
        units.to_degrees(position.longitude),
        units.to_degrees(position.latitude),
        position.altitude,
        solution.velocity.x,
        solution.velocity.y,
        solution.velocity.z,
        units.to_degrees(attitude.roll),
        units.to_degrees(attitude.pitch),
        units.to_degrees(attitude.yaw),
    ]
}

/// Render one output line without its terminator
pub fn format_record(time: f64, solution: &Solution, units: &UnitConstants) -> String {
    let values = record_values(time, solution, units);
    let mut line = String::with_capacity(HEADER.len());
    for (i, (value, col)) in values.iter().zip(COLUMNS.iter()).enumerate() {
        if i > 0 {
            line.push_str(if col.group_start { "  " } else { " " });
        }
        line.push_str(&fixed(*value, col.width, col.precision));
    }
    line
}

/// Split an output line back into its ten values
pub fn parse_record(line: &str) -> Option<[f64; COLUMN_COUNT]> {
    let mut values = [0.0; COLUMN_COUNT];
    let mut fields = line.split_whitespace();
    for slot in values.iter_mut() {
        *slot = fields.next()?.parse().ok()?;
    }
    fields.next().is_none().then_some(values)
}
