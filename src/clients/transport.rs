//! The transport seam.
//!
//! Commands never talk to the network directly; they hand an encoded
//! [`HttpRequest`] to a [`Transport`]. [`HttpClient`](crate::clients::HttpClient)
//! is the production implementation, and tests can plug in a stub.

use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Sends one encoded request and returns the response.
///
/// Implementations decide how connections are pooled, whether requests are
/// retried, and how timeouts apply. A non-2xx status must be returned as
/// [`HttpError::Response`] (or [`HttpError::MaxRetries`]); the body of a 2xx
/// response is returned untouched.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use async_trait::async_trait;
/// use rest_command::clients::{HttpError, HttpRequest, HttpResponse, Transport};
///
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl Transport for Canned {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(200, HashMap::new(), self.0))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for network failures, invalid requests and
    /// non-2xx responses.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request).await
    }
}
