//! The command builder.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{HttpError, HttpMethod, HttpRequest, Transport};
use crate::command::errors::CommandError;
use crate::command::parameters::{ParamValue, ParameterSet};
use crate::command::protocol::Protocol;
use crate::response::{map_to, ResultError};

/// One pending call: a path, a method, its parameters and the protocol it
/// is sent with.
///
/// Commands are values. Every `with_*` method consumes the command and
/// returns the extended one, so a partially built command can be cloned and
/// used as a template without the copies affecting each other.
///
/// # Example
///
/// ```rust
/// use rest_command::clients::HttpMethod;
/// use rest_command::command::{Command, Protocol};
/// use rest_command::Authority;
///
/// let protocol = Protocol::https(Authority::new("api.example.com").unwrap());
/// let base = Command::new(protocol, "api/v1/widget", HttpMethod::Post)
///     .unwrap()
///     .with_parameter("key", "abc");
///
/// let first = base.clone().with_parameter("id", 5);
/// let second = base.with_parameter_if_positive("id", 0);
///
/// assert_eq!(first.path(), "/api/v1/widget");
/// assert!(first.parameters().contains("id"));
/// assert!(!second.parameters().contains("id"));
/// ```
#[derive(Clone, Debug)]
pub struct Command {
    path: String,
    method: HttpMethod,
    parameters: ParameterSet,
    protocol: Arc<Protocol>,
}

impl Command {
    /// Creates a command with no parameters.
    ///
    /// A leading `/` is added to `path` when missing.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidPath`] if `path` is empty or blank.
    pub fn new(
        protocol: impl Into<Arc<Protocol>>,
        path: impl Into<String>,
        method: HttpMethod,
    ) -> Result<Self, CommandError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(CommandError::InvalidPath { path });
        }

        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Ok(Self {
            path,
            method,
            parameters: ParameterSet::new(),
            protocol: protocol.into(),
        })
    }

    /// Returns the absolute request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the parameters as set so far, before signing.
    #[must_use]
    pub const fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Returns the protocol the command is sent with.
    #[must_use]
    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Sets a parameter unconditionally.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters = self.parameters.set(name, value);
        self
    }

    /// Sets a parameter when `value` is present and not blank.
    #[must_use]
    pub fn with_parameter_if_present(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.parameters = self.parameters.set_if_present(name, value);
        self
    }

    /// Sets a parameter when `value` is greater than zero.
    #[must_use]
    pub fn with_parameter_if_positive(mut self, name: impl Into<String>, value: i64) -> Self {
        self.parameters = self.parameters.set_if_positive(name, value);
        self
    }

    /// Sets a parameter when `condition` holds.
    #[must_use]
    pub fn with_condition_parameter(
        mut self,
        condition: bool,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Self {
        self.parameters = self.parameters.set_if(condition, name, value);
        self
    }

    /// Encodes the command as an [`HttpRequest`].
    ///
    /// Parameters are prepared by the protocol first. GET commands carry
    /// them in the query string, POST commands in a form-encoded body.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Transport`] if the request fails validation.
    pub fn to_request(&self) -> Result<HttpRequest, CommandError> {
        let prepared = self.protocol.prepare(&self.parameters);
        let builder = HttpRequest::builder(self.method, self.protocol.base_url(), &self.path);

        let builder = match self.method {
            HttpMethod::Get if prepared.is_empty() => builder,
            HttpMethod::Get => builder.query(prepared.to_pairs()),
            HttpMethod::Post => builder.form_body(prepared.to_query_string()),
        };

        builder
            .build()
            .map_err(|e| CommandError::Transport(HttpError::from(e)))
    }

    /// Sends the command and returns the raw JSON body.
    ///
    /// API error envelopes are not looked at here; run the result through a
    /// transformer, or use [`fetch`](Self::fetch).
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Transport`] if the round trip fails or the
    /// status is not 2xx, and [`CommandError::Deserialization`] if the body
    /// is not JSON. An empty body is returned as `null`.
    pub async fn execute<T>(&self, transport: &T) -> Result<Value, CommandError>
    where
        T: Transport + ?Sized,
    {
        let request = self.to_request()?;
        tracing::debug!("Executing {} {}", self.method, request.url());

        let response = transport.send(request).await?;
        Ok(response.json()?)
    }

    /// Sends the command, transforms the body and decodes it into `R`.
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute), plus
    /// [`CommandError::Api`] when `transform` raises and
    /// [`CommandError::Deserialization`] when the shape does not match.
    pub async fn fetch<R, T, F>(&self, transport: &T, transform: F) -> Result<R, CommandError>
    where
        R: DeserializeOwned,
        T: Transport + ?Sized,
        F: FnOnce(Value) -> Result<Value, ResultError>,
    {
        let raw = self.execute(transport).await?;
        map_to(raw, transform)
    }
}

// Verify Command is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Command>();
};
