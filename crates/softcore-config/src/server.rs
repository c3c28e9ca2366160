//! Configuration file loader

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, LoadFailure};
use crate::model::Configuration;

/// Directory under the mod root holding the configuration file
pub const CONFIG_DIR: &str = "config";

/// Configuration file name
pub const CONFIG_FILE: &str = "config.json5";

/// Loads the configuration file once and hands out read-only access.
///
/// Loading is all-or-nothing: a failed [`load`](ConfigServer::load) leaves
/// the server unloaded, even if an earlier load succeeded.
#[derive(Debug, Clone)]
pub struct ConfigServer {
    path: PathBuf,
    config: Option<Configuration>,
}

impl ConfigServer {
    /// Server reading the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: None,
        }
    }

    /// Server reading `<root>/config/config.json5`
    #[must_use]
    pub fn at_mod_root(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Path of the configuration file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a configuration is loaded
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.config.is_some()
    }

    /// Read, parse and validate the file
    ///
    /// # Errors
    /// `ConfigError::Load` if the file is missing, unreadable, not JSON5, has
    /// wrong value types or out-of-range values.
    pub fn load(&mut self) -> Result<&Configuration, ConfigError> {
        self.config = None;

        let parsed = std::fs::read_to_string(&self.path)
            .map_err(LoadFailure::from)
            .and_then(|text| Configuration::parse(&text));

        match parsed {
            Ok(config) => {
                tracing::debug!(path = %self.path.display(), "configuration loaded");
                Ok(self.config.insert(config))
            }
            Err(source) => {
                tracing::error!(path = %self.path.display(), error = %source, "configuration load failed");
                Err(ConfigError::load(self.path.clone(), source))
            }
        }
    }

    /// The loaded configuration
    ///
    /// # Errors
    /// `ConfigError::NotLoaded` before a successful [`load`](ConfigServer::load).
    pub fn config(&self) -> Result<&Configuration, ConfigError> {
        self.config.as_ref().ok_or(ConfigError::NotLoaded)
    }

    /// Consume the server, yielding the loaded configuration
    ///
    /// # Errors
    /// `ConfigError::NotLoaded` before a successful [`load`](ConfigServer::load).
    pub fn into_config(self) -> Result<Configuration, ConfigError> {
        self.config.ok_or(ConfigError::NotLoaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_root_path() {
        let server = ConfigServer::at_mod_root("/mods/softcore");
        assert_eq!(server.path(), Path::new("/mods/softcore/config/config.json5"));
    }

    #[test]
    fn config_before_load() {
        let server = ConfigServer::new("unused.json5");
        assert!(!server.is_loaded());
        assert!(matches!(server.config(), Err(ConfigError::NotLoaded)));
    }
}
