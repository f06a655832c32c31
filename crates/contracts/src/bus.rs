//! Bus - the single shared state structure passed to every plugin
//!
//! The executor owns one instance and threads it through every invocation by
//! `&mut`. Phase transitions (`enter_run`, `begin_tick`, `enter_terminate`)
//! belong to the executor; plugins only request termination.

use crate::{Configuration, ImuState, Mode, Termination};

/// Name of the inertial subsystem block in the configuration
pub const IMU_SUBSYSTEM: &str = "imu";

/// Shared pipeline state
#[derive(Debug, Clone, Default)]
pub struct Bus {
    mode: Mode,
    /// Running tick counter (0 until the first Run pass)
    tick: u64,
    /// Sample time (s)
    time: f64,
    configuration: Configuration,
    configured: bool,
    imu: Option<ImuState>,
    termination: Option<Termination>,
}

impl Bus {
    /// Create a bus in `Init` mode at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus and install `configuration`
    pub fn with_configuration(configuration: Configuration) -> Self {
        let mut bus = Self::new();
        bus.configure(configuration);
        bus
    }

    /// Install the configuration blob.
    ///
    /// Only honored once, while in `Init`. Allocates the inertial subsystem
    /// when the configuration names an `imu` block.
    pub fn configure(&mut self, configuration: Configuration) -> bool {
        if !self.mode.is_init() || self.configured {
            return false;
        }
        if let Some(block) = configuration.subsystem(IMU_SUBSYSTEM) {
            self.imu = Some(ImuState::new(block));
        }
        self.configuration = configuration;
        self.configured = true;
        true
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Signed mode code: `0` init, tick number while running, `-1` terminate
    pub fn mode_code(&self) -> i64 {
        match self.mode {
            Mode::Init => 0,
            Mode::Run => self.tick.max(1) as i64,
            Mode::Terminate => -1,
        }
    }

    pub fn is_terminating(&self) -> bool {
        self.mode.is_terminate()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Set the sample time.
    ///
    /// While running, time must not decrease; a decreasing value is rejected.
    pub fn set_time(&mut self, time: f64) -> bool {
        if self.mode.is_run() && time < self.time {
            return false;
        }
        self.time = time;
        true
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Inertial subsystem, `None` when not configured
    pub fn imu(&self) -> Option<&ImuState> {
        self.imu.as_ref()
    }

    pub fn imu_mut(&mut self) -> Option<&mut ImuState> {
        self.imu.as_mut()
    }

    /// Request termination of the whole pipeline.
    ///
    /// The first reason wins; later requests only keep the mode at
    /// `Terminate`.
    pub fn request_termination(&mut self, reason: Termination) {
        if self.termination.is_none() {
            self.termination = Some(reason);
        }
        self.transition(Mode::Terminate);
    }

    /// Shorthand for a fatal termination request
    pub fn fail(&mut self, plugin: &str, message: impl Into<String>) {
        self.request_termination(Termination::fatal(plugin, message));
    }

    /// Reason of the first termination request
    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    /// Leave `Init` for `Run`.
    ///
    /// Executor only: plugins receive the same `&mut Bus` but must never
    /// drive phase changes themselves.
    #[doc(hidden)]
    pub fn enter_run(&mut self) -> bool {
        self.mode.is_init() && self.transition(Mode::Run)
    }

    /// Start the next running tick. Executor only.
    #[doc(hidden)]
    pub fn begin_tick(&mut self) -> u64 {
        if self.mode.is_run() {
            self.tick += 1;
        }
        self.tick
    }

    /// Force the terminate phase without a plugin request. Executor only.
    #[doc(hidden)]
    pub fn enter_terminate(&mut self) {
        self.transition(Mode::Terminate);
    }

    fn transition(&mut self, next: Mode) -> bool {
        if !self.mode.can_transition_to(next) {
            return false;
        }
        self.mode = next;
        true
    }
}
