//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// File names searched, in order, when no path is given
const CANDIDATES: [&str; 3] = [
    ".sitetrack.toml",
    "sitetrack.toml",
    ".config/sitetrack.toml",
];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, or from the first standard
    /// location found in the current directory, or fall back to defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the standard locations is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config_not_found(p));
                }
                Self::from_file(p)
            }
            None => match std::env::current_dir()
                .ok()
                .and_then(|dir| find_config_file(&dir))
            {
                Some(found) => Self::from_file(&found),
                None => Ok(Self::default()),
            },
        }
    }

    /// Parse a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let schema = load_config_file(path)?;
        Ok(Self {
            schema,
            path: Some(path.to_path_buf()),
        })
    }
}

/// Find configuration file in standard locations under `dir`
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|path| path.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
        .with_source(e)
    })?;

    let schema: ConfigSchema = toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("While parsing {}", path.display()))
    })?;

    if let Some(timeout) = schema.api.timeout_secs {
        if timeout == 0 {
            return Err(Error::invalid_config_value(
                "api.timeout_secs",
                "must be greater than zero",
            ));
        }
    }

    Ok(schema)
}
