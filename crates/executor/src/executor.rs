//! Executor - drives the three-phase lifecycle across all registered plugins

use std::time::Instant;

use contracts::{Bus, Configuration, ContractError, Mode, Plugin, Termination};
use observability::RunningStats;
use tracing::{debug, error, info, instrument, warn};

use crate::report::{ExecutionReport, PluginReport};

/// Maximum number of plugins accepted by [`Executor::new`]
pub const DEFAULT_PLUGIN_CAPACITY: usize = 255;

/// Executor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecutorState {
    /// Accepting registrations, Init not run yet
    Registering,
    /// Init succeeded, ticking
    Running,
    /// Terminate pass done
    Finished,
}

/// Registered plugin plus its bookkeeping
struct Slot {
    plugin: Box<dyn Plugin>,
    init_calls: u64,
    run_calls: u64,
    terminate_calls: u64,
    /// Invocation latency (µs)
    latency: RunningStats,
}

impl Slot {
    fn new(plugin: Box<dyn Plugin>) -> Self {
        Self {
            plugin,
            init_calls: 0,
            run_calls: 0,
            terminate_calls: 0,
            latency: RunningStats::default(),
        }
    }

    fn count(&mut self, phase: Mode) {
        match phase {
            Mode::Init => self.init_calls += 1,
            Mode::Run => self.run_calls += 1,
            Mode::Terminate => self.terminate_calls += 1,
        }
    }
}

/// Pipeline executor
///
/// Owns the bus and an ordered, append-only list of plugins. Every phase
/// pass invokes the plugins in registration order; the executor itself
/// carries no navigation semantics.
///
/// ```
/// use contracts::{plugin_fn, Bus, Termination};
/// use executor::Executor;
///
/// let mut executor = Executor::new();
/// executor.register(plugin_fn("countdown", |bus: &mut Bus| {
///     if bus.mode().is_run() && bus.tick() == 3 {
///         bus.request_termination(Termination::end_of_input("countdown"));
///     }
/// }));
///
/// assert!(executor.initialize("".into()));
/// while executor.tick() {}
/// assert_eq!(executor.report().ticks, 2);
/// ```
pub struct Executor {
    bus: Bus,
    slots: Vec<Slot>,
    capacity: usize,
    state: ExecutorState,
    completed_ticks: u64,
}

impl Executor {
    /// Create an executor with [`DEFAULT_PLUGIN_CAPACITY`]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PLUGIN_CAPACITY)
    }

    /// Create an executor accepting at most `capacity` plugins
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bus: Bus::new(),
            slots: Vec::new(),
            capacity,
            state: ExecutorState::Registering,
            completed_ticks: 0,
        }
    }

    /// Append a plugin to the invocation order
    ///
    /// # Errors
    /// - capacity exceeded
    /// - Init already started
    pub fn try_register<P: Plugin + 'static>(&mut self, plugin: P) -> Result<(), ContractError> {
        if self.state != ExecutorState::Registering {
            return Err(ContractError::RegistrationClosed {
                plugin: plugin.name().to_string(),
            });
        }
        if self.slots.len() >= self.capacity {
            return Err(ContractError::registration_capacity(
                plugin.name(),
                self.capacity,
            ));
        }
        debug!(plugin = plugin.name(), index = self.slots.len(), "plugin registered");
        self.slots.push(Slot::new(Box::new(plugin)));
        Ok(())
    }

    /// Append a plugin; `false` when registration fails
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> bool {
        match self.try_register(plugin) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "plugin registration failed");
                false
            }
        }
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Plugin names in invocation order
    pub fn plugin_names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.plugin.name()).collect()
    }

    /// Shared bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Run the Init pass.
    ///
    /// Returns `false` when a plugin requested termination during Init; in
    /// that case the Terminate pass has already been driven over every
    /// registered plugin and the executor is finished.
    #[instrument(name = "executor_initialize", skip_all, fields(plugins = self.slots.len()))]
    pub fn initialize(&mut self, configuration: Configuration) -> bool {
        if self.state != ExecutorState::Registering {
            warn!("initialize called twice");
            return false;
        }
        self.bus.configure(configuration);
        info!(
            plugins = ?self.plugin_names(),
            imu = self.bus.imu().is_some(),
            "Init phase"
        );

        self.pass(Mode::Init);

        if self.bus.is_terminating() {
            match self.bus.termination() {
                Some(reason) => error!(reason = %reason, "pipeline initialization failed"),
                None => error!("pipeline initialization failed"),
            }
            self.finish();
            return false;
        }

        self.bus.enter_run();
        self.state = ExecutorState::Running;
        true
    }

    /// Run one cycle.
    ///
    /// A Run pass while the pipeline is running; once a plugin has requested
    /// termination, the Terminate pass. Returns `false` after the Terminate
    /// pass and on every later call.
    pub fn tick(&mut self) -> bool {
        match self.state {
            ExecutorState::Registering => {
                warn!("tick called before initialize");
                return false;
            }
            ExecutorState::Finished => return false,
            ExecutorState::Running => {}
        }

        if self.bus.is_terminating() {
            self.finish();
            return false;
        }

        let tick = self.bus.begin_tick();
        self.pass(Mode::Run);
        observability::record_tick(tick, self.bus.time());

        if !self.bus.is_terminating() {
            self.completed_ticks += 1;
        }
        true
    }

    /// Tick until the Terminate pass has run
    pub fn run_to_completion(&mut self) -> ExecutionReport {
        while self.tick() {}
        self.report()
    }

    /// Request termination from outside the plugin list
    pub fn stop(&mut self, reason: impl Into<String>) {
        if self.state == ExecutorState::Running {
            self.bus
                .request_termination(Termination::stopped("executor", reason));
        }
    }

    /// Whether the Terminate pass has run
    pub fn is_finished(&self) -> bool {
        self.state == ExecutorState::Finished
    }

    /// Snapshot of the run so far
    pub fn report(&self) -> ExecutionReport {
        ExecutionReport {
            ticks: self.completed_ticks,
            final_time: self.bus.time(),
            termination: self.bus.termination().cloned(),
            plugins: self
                .slots
                .iter()
                .map(|slot| PluginReport {
                    name: slot.plugin.name().to_string(),
                    init_calls: slot.init_calls,
                    run_calls: slot.run_calls,
                    terminate_calls: slot.terminate_calls,
                    mean_latency_us: slot.latency.mean(),
                    max_latency_us: slot.latency.max(),
                })
                .collect(),
        }
    }

    /// Invoke every plugin once in `phase`.
    ///
    /// Init and Run passes stop at the first termination request: the
    /// remaining plugins get their single invocation in the Terminate pass.
    fn pass(&mut self, phase: Mode) {
        let phase_name = phase.to_string();
        for slot in self.slots.iter_mut() {
            let started = Instant::now();
            slot.plugin.invoke(&mut self.bus);
            let elapsed = started.elapsed();

            slot.count(phase);
            slot.latency.push(elapsed.as_secs_f64() * 1e6);
            observability::record_plugin_invocation(slot.plugin.name(), &phase_name, elapsed);

            if !phase.is_terminate() && self.bus.is_terminating() {
                debug!(
                    plugin = slot.plugin.name(),
                    phase = %phase,
                    tick = self.bus.tick(),
                    "termination requested"
                );
                break;
            }
        }
    }

    /// Drive the Terminate pass
    #[instrument(name = "executor_terminate", skip_all, fields(tick = self.bus.tick()))]
    fn finish(&mut self) {
        self.bus.enter_terminate();
        if let Some(reason) = self.bus.termination() {
            let kind = match reason {
                Termination::EndOfInput { .. } => "end_of_input",
                Termination::Stopped { .. } => "stopped",
                Termination::Fatal { .. } => "fatal",
            };
            observability::record_termination(reason.plugin(), kind);
            info!(reason = %reason, "Terminate phase");
        }
        self.pass(Mode::Terminate);
        self.state = ExecutorState::Finished;

        for slot in &self.slots {
            debug!(
                plugin = slot.plugin.name(),
                latency_us = %slot.latency.summary(),
                "plugin invocation latency"
            );
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}
