//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Read the configuration blob from files or strings
//! - Validate its structure (balanced braces, named subsystem blocks)
//! - Report fallbacks that will apply at Init as warnings
//!
//! # Example
//!
//! ```no_run
//! use config_loader::{keys, ConfigLoader};
//! use std::path::Path;
//!
//! let configuration = ConfigLoader::load_from_path(Path::new("pony.cfg")).unwrap();
//! println!("output: {:?}", configuration.settings().word(keys::OUT));
//! ```

pub mod keys;
mod parser;
mod validator;

pub use contracts::Configuration;
pub use parser::normalize;
pub use validator::{collect_warnings, subsystem_names};

use contracts::ContractError;
use std::path::Path;
use tracing::debug;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// # Errors
    /// - File read failure
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<Configuration, ContractError> {
        let content = Self::read_file(path)?;
        debug!(path = %path.display(), bytes = content.len(), "configuration file read");
        Self::load_from_str(&content)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str) -> Result<Configuration, ContractError> {
        let configuration = parser::parse(content)?;
        validator::validate(&configuration)?;
        Ok(configuration)
    }

    /// Built-in sample configuration
    pub fn sample() -> Configuration {
        Configuration::new(keys::SAMPLE_CONFIGURATION)
    }
}

impl ConfigLoader {
    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_str() {
        let cfg = ConfigLoader::load_from_str(keys::SAMPLE_CONFIGURATION).unwrap();
        let imu = cfg.subsystem("imu").unwrap();
        assert_eq!(imu.number(keys::FREQ), Some(400.0));
        assert_eq!(cfg.settings().word(keys::OUT), Some("ins.nav"));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# navigation run").unwrap();
        writeln!(file, "{{imu: freq = 800}}").unwrap();
        writeln!(file, "sensors_in = imu.txt").unwrap();
        writeln!(file, "out = ins.nav").unwrap();

        let cfg = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(cfg.subsystem("imu").unwrap().number(keys::FREQ), Some(800.0));
        assert_eq!(cfg.settings().word(keys::SENSORS_IN), Some("imu.txt"));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_from_path(Path::new("/nonexistent/pony.cfg"));
        assert!(matches!(result, Err(ContractError::Io(_))));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let result = ConfigLoader::load_from_str("{imu: freq = 1} {imu: freq = 2}");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }
}
