//! HTTP request types.
//!
//! An [`HttpRequest`] is the fully encoded form of a
//! [`Command`](crate::command::Command): parameters have already been
//! signed and placed either in the query string or in a form body.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Content type used for POST bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP methods a command can be issued with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in a form-encoded body.
    Post,
}

impl HttpMethod {
    /// Returns `true` if parameters for this method are sent in the body.
    #[must_use]
    pub const fn carries_body(&self) -> bool {
        matches!(self, Self::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// An HTTP request ready to be handed to a [`Transport`](crate::clients::Transport).
///
/// # Example
///
/// ```rust
/// use rest_command::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "https://www.googleapis.com", "/customsearch/v1")
///     .query_param("q", "rust")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.url(), "https://www.googleapis.com/customsearch/v1");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// Scheme and authority, e.g. `https://atompark.com`.
    pub base_url: String,
    /// Absolute path on the authority, e.g. `/api/sms/3.0/getUserBalance`.
    pub path: String,
    /// Ordered query parameters.
    pub query: Option<Vec<(String, String)>>,
    /// Form-encoded request body.
    pub body: Option<String>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(
        method: HttpMethod,
        base_url: impl Into<String>,
        path: impl Into<String>,
    ) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, base_url, path)
    }

    /// Returns the request URL without its query string.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` is empty
    /// - `body` is set on a method that does not carry one
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if self.body.is_some() && !self.http_method.carries_body() {
            return Err(InvalidHttpRequestError::BodyNotAllowed {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    base_url: String,
    path: String,
    query: Option<Vec<(String, String)>>,
    body: Option<String>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            base_url: base_url.into(),
            path: path.into(),
            query: None,
            body: None,
            extra_headers: None,
        }
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = Some(query);
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Sets a form-encoded body and its `Content-Type` header.
    #[must_use]
    pub fn form_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.header("Content-Type", FORM_CONTENT_TYPE)
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            base_url: self.base_url,
            path: self.path,
            query: self.query,
            body: self.body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
