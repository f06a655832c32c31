//! ProgressReporter - prints navigation time to the console in place

use std::io::{self, Write};

use contracts::{Bus, Mode, Plugin};
use tracing::warn;

use crate::format::fixed;

const NAME: &str = "progress_reporter";

/// Width of the printed time, also the number of backspaces used to erase it
const FIELD_WIDTH: usize = 5;

const ERASE: &str = "\x08\x08\x08\x08\x08";

/// Ticks between two console updates
pub const DEFAULT_INTERVAL: u64 = 1024;

/// Prints whole seconds into navigation, overwriting the previous value.
///
/// Pure observer of bus time.
pub struct ProgressReporter {
    out: Box<dyn Write + Send>,
    interval: u64,
    counter: u64,
}

impl ProgressReporter {
    /// Report to stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Report to any writer
    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Box::new(out),
            interval: DEFAULT_INTERVAL,
            counter: 0,
        }
    }

    /// Ticks between updates, at least one
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    fn print(&mut self, prefix: &str, time: f64, suffix: &str) {
        let result = write!(self.out, "{prefix}{}{suffix}", fixed(time, FIELD_WIDTH, 0))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!(plugin = NAME, error = %e, "progress output failed");
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ProgressReporter {
    fn name(&self) -> &str {
        NAME
    }

    fn invoke(&mut self, bus: &mut Bus) {
        if bus.imu().is_none() {
            return;
        }
        let time = bus.time();

        match bus.mode() {
            Mode::Init => {
                self.counter = 0;
                self.print("seconds into navigation: ", time, "");
            }
            Mode::Run => {
                if self.counter % self.interval == 0 {
                    self.print(ERASE, time, "");
                }
                self.counter += 1;
            }
            Mode::Terminate => self.print(ERASE, time, "\n"),
        }
    }
}
