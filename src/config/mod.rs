//! Configuration types.
//!
//! - [`ClientConfig`] / [`ClientConfigBuilder`]: transport settings consumed
//!   by [`HttpClient`](crate::clients::HttpClient)
//! - [`Authority`]: a validated host name with optional port
//! - [`ApiKey`]: a validated public API key
//! - [`PrivateKey`]: a validated signing key with masked debug output
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use rest_command::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .user_agent_prefix("MyApp/1.0")
//!     .timeout(Duration::from_secs(30))
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.tries(), 3);
//! ```

mod newtypes;

pub use newtypes::{ApiKey, Authority, PrivateKey};

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Transport configuration.
///
/// None of these settings affect how a command is built or signed; they are
/// passed through to the HTTP layer as-is.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    tries: u32,
    default_headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns how many times the transport attempts a request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns headers added to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent_prefix: None,
            timeout: None,
            tries: 1,
            default_headers: HashMap::new(),
        }
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// # Defaults
///
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (the transport's own default)
/// - `tries`: `1` (no retries)
/// - `default_headers`: empty
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    tries: Option<u32>,
    default_headers: HashMap<String, String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times a request is attempted.
    ///
    /// Values above 1 let the transport retry 429 and 5xx responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTries`] if `tries` was set to zero.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(ClientConfig {
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            tries,
            default_headers: self.default_headers,
        })
    }
}
