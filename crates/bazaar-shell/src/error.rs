//! # Shell Error Types
//!
//! Errors raised by the runtime layer. State mutations are not among them:
//! the store never fails a mutation. What can fail is loading configuration,
//! touching a storage backend, or starting the store outside a runtime.

use thiserror::Error;

/// Result type alias for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid shell configuration.
    #[error("Invalid shell configuration: {0}")]
    InvalidConfig(String),

    /// Backend URL could not be used.
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Reading or writing a storage file failed.
    #[error("Storage I/O failed for {path}: {source}")]
    StorageIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A storage file exists but is not a JSON string map.
    #[error("Storage file {path} is corrupt: {reason}")]
    StorageCorrupt { path: String, reason: String },

    /// A storage backend reported an error.
    #[error("Storage error: {0}")]
    Storage(String),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// The store was created outside a tokio runtime.
    #[error("No tokio runtime available to run alert timers")]
    NoRuntime,
}

impl ShellError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ShellError::InvalidConfig(_)
                | ShellError::InvalidBackendUrl { .. }
                | ShellError::ConfigLoadFailed(_)
                | ShellError::ConfigSaveFailed(_)
        )
    }

    /// Wraps any backend error from a `KeyValueStorage` implementation.
    pub fn storage(err: impl std::error::Error) -> Self {
        ShellError::Storage(err.to_string())
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        ShellError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(err: toml::ser::Error) -> Self {
        ShellError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors() {
        assert!(ShellError::InvalidConfig("bad".into()).is_config_error());
        assert!(ShellError::InvalidBackendUrl {
            url: "x".into(),
            reason: "y".into()
        }
        .is_config_error());
        assert!(!ShellError::NoRuntime.is_config_error());
        assert!(!ShellError::Storage("disk full".into()).is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = ShellError::InvalidBackendUrl {
            url: "ftp://example.com".into(),
            reason: "scheme must be http or https".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid backend URL 'ftp://example.com': scheme must be http or https"
        );
    }
}
