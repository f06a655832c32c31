//! Configuration validation
//!
//! Rules:
//! - every `{...}` block starts with `name:`
//! - subsystem names are unique
//!
//! Non-fatal findings (fallbacks that will kick in at Init) are reported by
//! [`collect_warnings`].

use std::collections::HashSet;

use contracts::{Configuration, ContractError, IMU_SUBSYSTEM};

use crate::keys;

/// Validate configuration structure
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(configuration: &Configuration) -> Result<(), ContractError> {
    let names = subsystem_names(configuration)?;
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ContractError::config_validation(
                format!("{{{name}: ...}}"),
                "duplicate subsystem block",
            ));
        }
    }
    Ok(())
}

/// Names of all subsystem blocks, in order of appearance
pub fn subsystem_names(configuration: &Configuration) -> Result<Vec<&str>, ContractError> {
    let text = configuration.as_str();
    let mut names = Vec::new();
    for (idx, _) in text.match_indices('{') {
        let body = text[idx + 1..].trim_start();
        let name_len = body
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(body.len());
        let (name, rest) = body.split_at(name_len);
        if name.is_empty() || !rest.trim_start().starts_with(':') {
            return Err(ContractError::config_validation(
                format!("block at offset {idx}"),
                "subsystem block must start with 'name:'",
            ));
        }
        names.push(name);
    }
    Ok(names)
}

/// Collect configuration warnings (non-fatal issues)
pub fn collect_warnings(configuration: &Configuration) -> Vec<String> {
    let mut warnings = Vec::new();

    match configuration.subsystem(IMU_SUBSYSTEM) {
        None => warnings.push(format!(
            "no '{{{IMU_SUBSYSTEM}: ...}}' block - inertial plugins will do nothing"
        )),
        Some(imu) => match imu.number(keys::FREQ) {
            None => warnings.push(format!(
                "'{}' not set - using default {} Hz",
                keys::FREQ,
                keys::FREQ_DEFAULT_HZ
            )),
            Some(freq) if !keys::FREQ_RANGE_HZ.contains(&freq) => warnings.push(format!(
                "'{}' = {} outside {}..={} Hz - using default {} Hz",
                keys::FREQ,
                freq,
                keys::FREQ_RANGE_HZ.start(),
                keys::FREQ_RANGE_HZ.end(),
                keys::FREQ_DEFAULT_HZ
            )),
            Some(_) => {}
        },
    }

    let settings = configuration.settings();
    for key in [keys::SENSORS_IN, keys::OUT] {
        if settings.word(key).is_none() {
            warnings.push(format!("'{key}' not set - initialization will fail"));
        }
    }

    warnings
}
