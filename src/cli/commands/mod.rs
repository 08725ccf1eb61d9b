pub mod analyze;
pub mod best_blast;
pub mod parse_xml;

use crate::core::config::{default_config, load_config, Config};
use anyhow::Context;
use std::path::Path;

/// Load the configuration file if one was given, otherwise the defaults
pub fn resolve_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let config = load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(default_config()),
    }
}
