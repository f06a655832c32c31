//! Plugin trait - the uniform three-phase lifecycle contract
//!
//! Every plugin is invoked once per phase pass, in registration order, with
//! the bus in a known [`Mode`](crate::Mode):
//!
//! - `Init`: parse own configuration, acquire resources. Fatal failures are
//!   reported through [`Bus::fail`].
//! - `Run`: read/validate/produce the bus fields the plugin owns.
//! - `Terminate`: release resources. Must be tolerated even when `Init` never
//!   succeeded for this plugin.
//!
//! Plugins that depend on a subsystem (e.g. the IMU) check that precondition
//! first and no-op in every phase when it is not met.

use crate::Bus;

/// Pipeline plugin
pub trait Plugin: Send {
    /// Plugin name (used for logging/diagnostics)
    fn name(&self) -> &str;

    /// Handle one invocation in the bus's current mode
    fn invoke(&mut self, bus: &mut Bus);
}

impl<P: Plugin + ?Sized> Plugin for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn invoke(&mut self, bus: &mut Bus) {
        (**self).invoke(bus)
    }
}

/// Adapter turning a closure into a named plugin.
///
/// This is the seam for opaque external processing units (navigation math)
/// that obey the same lifecycle contract.
///
/// # Example
///
/// ```
/// use contracts::{Bus, Plugin, plugin_fn};
///
/// let mut damping = plugin_fn("vertical_damping", |bus: &mut Bus| {
///     if let Some(imu) = bus.imu_mut() {
///         imu.solution.velocity.z *= 0.5;
///     }
/// });
/// assert_eq!(damping.name(), "vertical_damping");
/// damping.invoke(&mut Bus::new());
/// ```
pub struct FnPlugin<F> {
    name: String,
    f: F,
}

impl<F> FnPlugin<F>
where
    F: FnMut(&mut Bus) + Send,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

/// Create a [`FnPlugin`]
pub fn plugin_fn<F>(name: impl Into<String>, f: F) -> FnPlugin<F>
where
    F: FnMut(&mut Bus) + Send,
{
    FnPlugin::new(name, f)
}

impl<F> Plugin for FnPlugin<F>
where
    F: FnMut(&mut Bus) + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&mut self, bus: &mut Bus) {
        (self.f)(bus)
    }
}

impl<F> std::fmt::Debug for FnPlugin<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPlugin").field("name", &self.name).finish()
    }
}
