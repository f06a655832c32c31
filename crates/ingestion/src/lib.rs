//! # Ingestion
//!
//! Inertial sensor ingestion.
//!
//! Responsibilities:
//! - Open the raw sensor file named by `sensors_in` and skip its header
//! - Parse one six-field record per tick into angular rate and specific force
//! - Convert angular rate from deg/s to rad/s and mark both values fresh
//! - Tolerate malformed records (counted, logged, no fresh data that tick)
//! - Request termination at end of input
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::SensorIngest;
//!
//! let ingest = SensorIngest::with_input("imu.txt");
//! let metrics = ingest.metrics();
//! executor.register(ingest);
//! // ...
//! println!("{} malformed", metrics.snapshot().records_malformed);
//! ```

mod error;
mod metrics;
mod plugin;
mod record;
mod source;

pub use error::{IngestionError, Result};
pub use metrics::{IngestionMetrics, MetricsSnapshot};
pub use plugin::SensorIngest;
pub use record::{parse_record, RawSample, FIELDS_PER_RECORD};
pub use source::RecordSource;
