//! # Navigation
//!
//! Navigation solution plugins. The inertial math itself is supplied by
//! external plugins registered through [`contracts::plugin_fn`]; this crate
//! only seeds the solution they integrate.

mod seed;

pub use seed::{initial_position, InitialSolution};
