//! Error types for configuration loading

use std::path::PathBuf;

/// Errors raised by [`ConfigServer`](crate::ConfigServer)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read, parsed or validated
    #[error("CONFIG_LOAD_ERROR - Could not load configuration ({}): {source}", path.display())]
    Load {
        /// Path that was read
        path: PathBuf,
        /// What went wrong
        #[source]
        source: LoadFailure,
    },

    /// Configuration accessed before a successful load
    #[error("CONFIG_NOT_LOADED - Configuration not loaded")]
    NotLoaded,
}

impl ConfigError {
    /// Stable error code shown to users
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            ConfigError::Load { .. } => "CONFIG_LOAD_ERROR",
            ConfigError::NotLoaded => "CONFIG_NOT_LOADED",
        }
    }

    /// Create load error
    pub fn load(path: impl Into<PathBuf>, source: LoadFailure) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }
}

/// Reason a configuration failed to load
#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    /// File missing or unreadable
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Not valid JSON5, or a value has the wrong type
    #[error("parse failed: {0}")]
    Parse(#[from] json5::Error),

    /// Parsed, but a value is out of range
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// camelCase path of the offending option
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl LoadFailure {
    /// Create invalid value error
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
