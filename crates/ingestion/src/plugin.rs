//! SensorIngest plugin - feeds raw sensor samples into the bus

use std::path::PathBuf;
use std::sync::Arc;

use config_loader::keys;
use contracts::{Bus, Mode, Plugin, Termination};
use tracing::{debug, error, info, warn};

use crate::error::{IngestionError, Result};
use crate::metrics::IngestionMetrics;
use crate::record::{parse_record, FIELDS_PER_RECORD};
use crate::source::RecordSource;

const NAME: &str = "sensor_ingest";

/// Reads inertial sensor readings from a text file, one record per tick.
///
/// Uses: nothing on the bus besides the unit constants.
/// Modifies: angular rate, specific force and their validity flags.
/// Parameters: `sensors_in` - input file name (top level), e.g.
/// `sensors_in = imu.txt`.
pub struct SensorIngest {
    /// Overrides `sensors_in`
    input: Option<PathBuf>,
    source: Option<RecordSource>,
    metrics: Arc<IngestionMetrics>,
}

impl SensorIngest {
    /// Input resolved from `sensors_in`
    pub fn new() -> Self {
        Self {
            input: None,
            source: None,
            metrics: Arc::new(IngestionMetrics::new()),
        }
    }

    /// Input file given explicitly, `sensors_in` is ignored
    pub fn with_input(path: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(path.into()),
            ..Self::new()
        }
    }

    /// Shared metrics handle
    pub fn metrics(&self) -> Arc<IngestionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Whether an input source is currently held
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    fn resolve_input(&self, bus: &Bus) -> Result<PathBuf> {
        if let Some(path) = &self.input {
            return Ok(path.clone());
        }
        bus.configuration()
            .settings()
            .word(keys::SENSORS_IN)
            .map(PathBuf::from)
            .ok_or(IngestionError::InputNotConfigured {
                key: keys::SENSORS_IN,
            })
    }

    fn open(&mut self, bus: &Bus) -> Result<()> {
        let path = self.resolve_input(bus)?;
        let mut source = RecordSource::open(&path)?;
        // header
        source.next_record()?;
        info!(plugin = NAME, path = %path.display(), "input file opened");
        self.source = Some(source);
        Ok(())
    }

    fn step(&mut self, bus: &mut Bus) {
        let Some(imu) = bus.imu_mut() else {
            return;
        };
        imu.invalidate_sensors();

        let Some(source) = self.source.as_mut() else {
            return;
        };

        let record = match source.next_record() {
            Ok(Some(line)) => parse_record(&line),
            Ok(None) => {
                let snapshot = self.metrics.snapshot();
                info!(
                    plugin = NAME,
                    records = snapshot.records_valid,
                    malformed = snapshot.records_malformed,
                    "end of input"
                );
                bus.request_termination(Termination::end_of_input(NAME));
                return;
            }
            Err(e) => {
                error!(plugin = NAME, error = %e, "input read failed");
                bus.fail(NAME, e.to_string());
                return;
            }
        };

        match record {
            Ok(raw) => {
                let units = *imu.units();
                imu.set_angular_rate(raw.angular_rate.map(|deg| units.to_radians(deg)));
                imu.set_specific_force(raw.specific_force);
                self.metrics.record_valid();
            }
            Err(parsed) => {
                let skipped = IngestionError::MalformedRecord {
                    line: source.line(),
                    parsed,
                    expected: FIELDS_PER_RECORD,
                };
                self.metrics.record_malformed();
                warn!(plugin = NAME, tick = bus.tick(), error = %skipped, "record skipped");
            }
        }
    }
}

impl Default for SensorIngest {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SensorIngest {
    fn name(&self) -> &str {
        NAME
    }

    fn invoke(&mut self, bus: &mut Bus) {
        if bus.imu().is_none() {
            return;
        }

        match bus.mode() {
            Mode::Init => {
                if let Err(e) = self.open(bus) {
                    error!(plugin = NAME, error = %e, "initialization failed");
                    bus.fail(NAME, e.to_string());
                }
            }
            Mode::Run => self.step(bus),
            Mode::Terminate => {
                if self.source.take().is_some() {
                    debug!(plugin = NAME, "input file closed");
                }
            }
        }
    }
}
