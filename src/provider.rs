//! Shared plumbing for API providers.
//!
//! A provider owns one [`Protocol`] and one [`Transport`] and hands out
//! [`Command`]s bound to that protocol. Concrete providers wrap a
//! [`RestApiProvider`] and add their own pre-filled commands.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{HttpClient, HttpError, HttpMethod, Transport};
use crate::command::{Command, CommandError, Protocol};
use crate::config::ClientConfig;
use crate::response::ResultError;

/// A protocol and a transport shared by every command of one API.
///
/// Cloning is cheap: the protocol and the transport are reference counted.
///
/// # Thread Safety
///
/// `RestApiProvider` is `Send + Sync` whenever its transport is, so one
/// instance can issue commands from many tasks at once.
///
/// # Example
///
/// ```rust,ignore
/// use rest_command::command::Protocol;
/// use rest_command::response::check_for_error;
/// use rest_command::{Authority, RestApiProvider};
///
/// let provider = RestApiProvider::new(
///     Protocol::https(Authority::new("api.example.com")?),
///     None,
/// )?;
///
/// let command = provider.cmd("/v1/status")?.with_parameter("verbose", 1);
/// let status: serde_json::Value = provider.fetch(&command, check_for_error).await?;
/// ```
pub struct RestApiProvider<T: Transport = HttpClient> {
    protocol: Arc<Protocol>,
    transport: Arc<T>,
}

impl RestApiProvider<HttpClient> {
    /// Creates a provider backed by a new [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the HTTP client cannot be built.
    pub fn new(protocol: Protocol, config: Option<&ClientConfig>) -> Result<Self, HttpError> {
        Ok(Self::with_transport(protocol, HttpClient::new(config)?))
    }
}

impl<T: Transport> RestApiProvider<T> {
    /// Creates a provider with an explicit transport.
    #[must_use]
    pub fn with_transport(protocol: Protocol, transport: T) -> Self {
        Self::with_shared_transport(protocol, Arc::new(transport))
    }

    /// Creates a provider with a transport shared with other providers.
    #[must_use]
    pub fn with_shared_transport(protocol: Protocol, transport: Arc<T>) -> Self {
        Self {
            protocol: Arc::new(protocol),
            transport,
        }
    }

    /// Returns the protocol commands are bound to.
    #[must_use]
    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Returns the transport commands are executed through.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Starts a GET command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidPath`] if `path` is blank.
    pub fn cmd(&self, path: impl Into<String>) -> Result<Command, CommandError> {
        self.cmd_with_method(path, HttpMethod::Get)
    }

    /// Starts a command with the given method.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidPath`] if `path` is blank.
    pub fn cmd_with_method(
        &self,
        path: impl Into<String>,
        method: HttpMethod,
    ) -> Result<Command, CommandError> {
        Command::new(Arc::clone(&self.protocol), path, method)
    }

    /// Executes a command through this provider's transport.
    ///
    /// # Errors
    ///
    /// See [`Command::execute`].
    pub async fn execute(&self, command: &Command) -> Result<Value, CommandError> {
        command.execute(&*self.transport).await
    }

    /// Executes a command, transforms the body and decodes it.
    ///
    /// # Errors
    ///
    /// See [`Command::fetch`].
    pub async fn fetch<R, F>(&self, command: &Command, transform: F) -> Result<R, CommandError>
    where
        R: DeserializeOwned,
        F: FnOnce(Value) -> Result<Value, ResultError>,
    {
        command.fetch(&*self.transport, transform).await
    }
}

impl<T: Transport> Clone for RestApiProvider<T> {
    fn clone(&self) -> Self {
        Self {
            protocol: Arc::clone(&self.protocol),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> fmt::Debug for RestApiProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestApiProvider")
            .field("protocol", &self.protocol)
            .finish_non_exhaustive()
    }
}

// Verify RestApiProvider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestApiProvider>();
};
