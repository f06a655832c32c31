//! # Contracts
//!
//! Frozen interface contracts shared by every pipeline crate: the bus, the
//! lifecycle mode, the plugin trait and the configuration blob.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Bus time is the sample timestamp (seconds, f64), owned by the time-sync plugin
//! - `tick` counts running passes and is owned by the executor

mod bus;
mod configuration;
mod error;
mod imu;
mod mode;
mod plugin;
mod termination;
mod units;

pub use bus::{Bus, IMU_SUBSYSTEM};
pub use configuration::{locate_token, matching_brace, Configuration};
pub use error::*;
pub use imu::{Attitude, Geodetic, ImuState, Solution};
pub use mode::Mode;
pub use nalgebra::Vector3;
pub use plugin::{plugin_fn, FnPlugin, Plugin};
pub use termination::Termination;
pub use units::UnitConstants;
