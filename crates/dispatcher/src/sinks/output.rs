//! OutputWriter - writes the navigation solution to a fixed-width text file

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use config_loader::keys;
use contracts::{Bus, Mode, Plugin};
use tracing::{debug, error, info, instrument};

use crate::error::{DispatcherError, Result};
use crate::format::{format_record, HEADER};

const NAME: &str = "output_writer";

/// Writes one line per tick, preceded by a header written during Init.
///
/// Uses: bus time and the navigation solution.
/// Parameters: `out` - output file name (top level), e.g. `out = ins.nav`.
pub struct OutputWriter {
    /// Overrides `out`
    path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
    lines: u64,
}

impl OutputWriter {
    /// Output resolved from `out`
    pub fn new() -> Self {
        Self {
            path: None,
            writer: None,
            lines: 0,
        }
    }

    /// Output file given explicitly, `out` is ignored
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new()
        }
    }

    /// Data lines written so far
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn resolve_path(&self, bus: &Bus) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        bus.configuration()
            .settings()
            .word(keys::OUT)
            .map(PathBuf::from)
            .ok_or(DispatcherError::OutputNotConfigured { key: keys::OUT })
    }

    fn open(&mut self, bus: &Bus) -> Result<()> {
        let path = self.resolve_path(bus)?;
        let file = File::create(&path).map_err(|source| DispatcherError::Create {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{HEADER}").map_err(|e| DispatcherError::write(NAME, e))?;
        info!(plugin = NAME, path = %path.display(), "output file created");
        self.writer = Some(writer);
        self.lines = 0;
        Ok(())
    }

    fn write_line(&mut self, bus: &Bus) -> Result<()> {
        let (Some(writer), Some(imu)) = (self.writer.as_mut(), bus.imu()) else {
            return Ok(());
        };
        let line = format_record(bus.time(), &imu.solution, imu.units());
        writeln!(writer, "{line}").map_err(|e| DispatcherError::write(NAME, e))?;
        self.lines += 1;
        observability::record_output_line(NAME);
        Ok(())
    }

    #[instrument(name = "output_writer_close", skip(self), fields(lines = self.lines))]
    fn close(&mut self) {
        let Some(mut writer) = self.writer.take() else {
            return;
        };
        match writer.flush() {
            Ok(()) => debug!(plugin = NAME, "output file closed"),
            Err(e) => error!(plugin = NAME, error = %e, "flush on close failed"),
        }
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for OutputWriter {
    fn name(&self) -> &str {
        NAME
    }

    fn invoke(&mut self, bus: &mut Bus) {
        if bus.imu().is_none() {
            return;
        }

        let result = match bus.mode() {
            Mode::Init => self.open(bus),
            Mode::Run => self.write_line(bus),
            Mode::Terminate => {
                self.close();
                Ok(())
            }
        };

        if let Err(e) = result {
            error!(plugin = NAME, tick = bus.tick(), error = %e, "output failed");
            self.writer = None;
            bus.fail(NAME, e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_record;
    use contracts::{Configuration, Termination};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_header_and_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ins.nav");
        let mut bus = Bus::with_configuration(Configuration::new("{imu: freq = 400}"));
        let mut writer = OutputWriter::with_path(&path);

        writer.invoke(&mut bus);
        assert!(writer.is_open());
        bus.enter_run();
        for tick in 1..=3 {
            bus.begin_tick();
            bus.set_time(tick as f64 * 0.0025);
            writer.invoke(&mut bus);
        }
        bus.request_termination(Termination::end_of_input("test"));
        writer.invoke(&mut bus);
        assert!(!writer.is_open());
        assert_eq!(writer.lines(), 3);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER);
        assert_eq!(parse_record(lines[3]).unwrap()[0], 0.0075);
    }

    #[test]
    fn test_path_from_configuration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("from_config.nav");
        let config = format!("{{imu: freq = 100}} out = {}", path.display());
        let mut bus = Bus::with_configuration(Configuration::new(&config));
        let mut writer = OutputWriter::new();
        writer.invoke(&mut bus);
        bus.enter_terminate();
        writer.invoke(&mut bus);

        assert_eq!(fs::read_to_string(&path).unwrap().trim_end(), HEADER);
    }

    #[test]
    fn test_uncreatable_output_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("ins.nav");
        let mut bus = Bus::with_configuration(Configuration::new("{imu: freq = 400}"));
        let mut writer = OutputWriter::with_path(&path);
        writer.invoke(&mut bus);

        assert!(bus.termination().unwrap().is_error());
        assert!(!writer.is_open());
        writer.invoke(&mut bus);
    }

    #[test]
    fn test_output_not_configured() {
        let mut bus = Bus::with_configuration(Configuration::new("{imu: freq = 400}"));
        let mut writer = OutputWriter::new();
        writer.invoke(&mut bus);
        match bus.termination() {
            Some(Termination::Fatal { plugin, message }) => {
                assert_eq!(plugin, NAME);
                assert!(message.contains("out"));
            }
            other => panic!("unexpected termination: {other:?}"),
        }
    }

    #[test]
    fn test_noop_without_imu() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ins.nav");
        let mut bus = Bus::with_configuration(Configuration::new("out = x"));
        let mut writer = OutputWriter::with_path(&path);
        writer.invoke(&mut bus);
        assert!(!path.exists());
        assert!(!bus.is_terminating());
    }
}
