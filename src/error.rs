//! Configuration error types.
//!
//! Every validated newtype and builder in [`crate::config`] returns
//! `Result<T, ConfigError>` so that bad input is rejected at construction
//! instead of surfacing later as a failed request.
//!
//! # Example
//!
//! ```rust
//! use rest_command::{Authority, ConfigError};
//!
//! let result = Authority::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAuthority)));
//! ```

use thiserror::Error;

/// Errors that can occur while building configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Authority (host name) cannot be empty.
    #[error("Authority cannot be empty. Please provide a host name such as 'api.example.com'.")]
    EmptyAuthority,

    /// Authority contains a scheme, path or whitespace.
    #[error("Invalid authority '{authority}'. Expected a bare host name with an optional port (e.g., 'api.example.com' or 'localhost:8080').")]
    InvalidAuthority {
        /// The invalid authority that was provided.
        authority: String,
    },

    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid API key.")]
    EmptyApiKey,

    /// Private signing key cannot be empty.
    #[error("Private key cannot be empty. Signed protocols require a private key.")]
    EmptyPrivateKey,

    /// Transport must attempt a request at least once.
    #[error("Invalid tries value {tries}. A request must be attempted at least once.")]
    InvalidTries {
        /// The rejected value.
        tries: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_authority_error_message() {
        let message = ConfigError::EmptyAuthority.to_string();
        assert!(message.contains("Authority cannot be empty"));
    }

    #[test]
    fn test_invalid_authority_includes_value() {
        let error = ConfigError::InvalidAuthority {
            authority: "https://api.example.com".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("https://api.example.com"));
        assert!(message.contains("bare host name"));
    }

    #[test]
    fn test_invalid_tries_includes_value() {
        let message = ConfigError::InvalidTries { tries: 0 }.to_string();
        assert!(message.contains("Invalid tries value 0"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyPrivateKey;
        let _: &dyn std::error::Error = &error;
    }
}
