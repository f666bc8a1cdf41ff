//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                         │
//! │  └── CoreError        - Session record could not be read                │
//! │                                                                         │
//! │  bazaar-shell errors (separate crate)                                   │
//! │  └── ShellError       - Config, storage and runtime failures            │
//! │                                                                         │
//! │  Tauri API errors (in app)                                              │
//! │  └── ApiError         - What the webview sees (serialized)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! State mutations themselves never fail. A `CoreError` produced while
//! loading customer information is turned into a "login required" modal by
//! [`ApplicationState::commit`](crate::ApplicationState::commit) and only
//! surfaces to callers for logging.

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Nothing is stored under the user-information key.
    #[error("No session data stored under '{key}'")]
    SessionDataMissing { key: String },

    /// The stored record is not valid JSON.
    #[error("Session data under '{key}' is not valid JSON: {source}")]
    SessionDataCorrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The record parsed but carries no `customer` entry.
    #[error("Session data under '{key}' has no customer field")]
    CustomerFieldMissing { key: String },
}

impl CoreError {
    /// Short machine-readable reason, used in structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            CoreError::SessionDataMissing { .. } => "missing",
            CoreError::SessionDataCorrupt { .. } => "corrupt",
            CoreError::CustomerFieldMissing { .. } => "no_customer",
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::SessionDataMissing {
            key: "userInformation".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No session data stored under 'userInformation'"
        );

        let err = CoreError::CustomerFieldMissing {
            key: "userInformation".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Session data under 'userInformation' has no customer field"
        );
    }

    #[test]
    fn test_reason_codes() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CoreError::SessionDataCorrupt {
            key: "k".to_string(),
            source,
        };
        assert_eq!(err.reason(), "corrupt");
        assert!(err.to_string().starts_with("Session data under 'k' is not valid JSON"));
    }
}
