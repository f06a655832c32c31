//! # Time Sync
//!
//! Owns the navigation tick clock.
//!
//! Responsibilities:
//! - Resolve the navigation frequency (`{imu: freq}`, 50-3200 Hz, default 100 Hz)
//! - Advance bus time by a fixed step each tick without drift
//! - Reset sensor validity flags at the start of every running tick
//!
//! ## Usage
//!
//! ```ignore
//! use time_sync::TimeSync;
//!
//! executor.register(TimeSync::new());
//! ```

mod clock;
mod plugin;

pub use clock::StepClock;
pub use plugin::TimeSync;
