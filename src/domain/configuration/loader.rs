//! Client configuration loading.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, ClientConfig};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cptmc.toml";

/// Load and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<ClientConfig, AppError> {
    let content = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::config_error(format!("Config file not found: {}", path.display()))
        } else {
            AppError::Io(err)
        }
    })?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<ClientConfig, AppError> {
    let config: ClientConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
