//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::HostConfig;
use tt_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HostConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_daemon(&mut errors, config);
    sections::validate_window(&mut errors, config);
    sections::validate_startup(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
