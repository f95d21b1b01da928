//! Errors produced while building, executing or mapping a command.
//!
//! The three ways a call can fail are kept apart:
//!
//! - [`CommandError::Transport`]: the HTTP round trip failed
//! - [`CommandError::Api`]: the API answered with an error envelope
//! - [`CommandError::Deserialization`]: the answer did not have the expected shape
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_command::command::CommandError;
//!
//! match provider.get_balance(None).await {
//!     Ok(balance) => println!("{} {}", balance.balance_currency, balance.currency),
//!     Err(CommandError::Api(e)) => println!("API refused ({}): {}", e.code, e.message),
//!     Err(CommandError::Transport(e)) => println!("Network trouble: {e}"),
//!     Err(CommandError::Deserialization(e)) => println!("Unexpected response: {e}"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::ConfigError;
use crate::response::ResultError;

/// Error type for command operations.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command path is empty.
    #[error("Invalid command path: '{path}'")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP round trip failed.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The API reported an error in its response body.
    #[error(transparent)]
    Api(#[from] ResultError),

    /// The response was not JSON, or did not match the expected shape.
    #[error("Failed to deserialize response: {0}")]
    Deserialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    #[test]
    fn test_invalid_path_error_includes_path() {
        let error = CommandError::InvalidPath {
            path: "  ".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid command path: '  '");
    }

    #[test]
    fn test_api_error_is_transparent() {
        let error: CommandError = ResultError {
            message: "bad key".to_string(),
            code: 403,
            raw: json!({}),
        }
        .into();

        assert!(matches!(error, CommandError::Api(_)));
        assert_eq!(error.to_string(), "API error 403: bad key");
    }

    #[test]
    fn test_transport_error_conversion() {
        let error: CommandError = HttpError::Response(HttpResponseError {
            code: 500,
            message: "boom".to_string(),
            error_reference: None,
        })
        .into();

        assert!(matches!(error, CommandError::Transport(_)));
    }

    #[test]
    fn test_deserialization_error_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: CommandError = source.into();

        assert!(matches!(error, CommandError::Deserialization(_)));
        assert!(error.to_string().starts_with("Failed to deserialize response"));
    }
}
