//! TimeSync plugin - owns the tick clock

use contracts::{Bus, Mode, Plugin};
use tracing::{debug, info, warn};

use crate::clock::StepClock;

/// Time step of the inertial solution.
///
/// - Init: reads `{imu: freq}`, resets the step counter and bus time
/// - Run: clears both sensor validity flags, advances time by `dt`
/// - Terminate: nothing
///
/// No-op in every phase when the inertial subsystem is not configured.
#[derive(Debug, Default)]
pub struct TimeSync {
    clock: StepClock,
}

impl TimeSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock
    pub fn clock(&self) -> &StepClock {
        &self.clock
    }
}

impl Plugin for TimeSync {
    fn name(&self) -> &str {
        "time_sync"
    }

    fn invoke(&mut self, bus: &mut Bus) {
        let mode = bus.mode();
        let Some(imu) = bus.imu_mut() else {
            return;
        };

        match mode {
            Mode::Init => {
                self.clock = StepClock::from_configuration(imu.configuration());
                info!(
                    frequency_hz = self.clock.frequency_hz(),
                    dt = self.clock.dt(),
                    "navigation clock configured"
                );
                bus.set_time(0.0);
            }
            Mode::Run => {
                imu.invalidate_sensors();
                let time = self.clock.advance();
                if !bus.set_time(time) {
                    warn!(time, bus_time = bus.time(), "bus time ahead of clock");
                }
                debug!(step = self.clock.step(), time, "tick");
            }
            Mode::Terminate => {}
        }
    }
}
