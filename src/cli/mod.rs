pub mod config;
pub mod hook;

use serde_json::{Map, Value};
use std::path::Path;

use crate::config::{Config, ConfigError};

/// Resolve the config from an explicit path, or `config.json` next to the
/// executable when none is given.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    overrides: Option<&Map<String, Value>>,
) -> Result<Config, ConfigError> {
    let default_path = Config::default_path();
    let file = config_path.or(default_path.as_deref());
    tracing::debug!(file = ?file, "resolving config");
    Config::resolve(file, overrides)
}
