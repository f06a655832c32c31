//! Command implementations.

mod info;
mod run;
mod validate;

pub use info::run_info;
pub use run::run_pipeline;
pub use validate::run_validate;

use std::path::Path;

use contracts::Configuration;

use crate::error::CliError;

/// Load `path`, or the built-in sample configuration when none is given
pub(crate) fn load_configuration(path: Option<&Path>) -> Result<Configuration, CliError> {
    match path {
        Some(path) => config_loader::ConfigLoader::load_from_path(path)
            .map_err(|source| CliError::config(path, source)),
        None => Ok(config_loader::ConfigLoader::sample()),
    }
}

/// Display name of the configuration source
pub(crate) fn source_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "<built-in sample>".to_string(), |p| p.display().to_string())
}
