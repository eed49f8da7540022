use std::{env, fs};

use super::PlannerConfig;
use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "CYCLEFORGE_CONFIG_PATH";

/// Load a planner config from the file named by `CYCLEFORGE_CONFIG_PATH`.
///
/// `Ok(None)` when the variable is unset or blank.
pub fn config_from_env() -> Result<Option<PlannerConfig>, ConfigError> {
    let Ok(path) = env::var(CONFIG_PATH_ENV) else {
        return Ok(None);
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_string(), source })?;

    let config = PlannerConfig::from_json(&content)?;
    config.validate()?;

    tracing::debug!("Loaded planner config from {CONFIG_PATH_ENV}='{path}'");
    Ok(Some(config))
}
