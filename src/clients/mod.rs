//! HTTP transport layer.
//!
//! Commands are encoded into an [`HttpRequest`] and sent through a
//! [`Transport`]. The types here know nothing about parameter guards,
//! signing, or API error envelopes.
//!
//! - [`Transport`]: the injected capability commands execute through
//! - [`HttpClient`]: the default `reqwest`-backed transport
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: an encoded request
//! - [`HttpResponse`]: a raw response
//! - [`HttpMethod`]: GET or POST
//! - [`HttpError`]: transport failures
//!
//! # Retry Behavior
//!
//! [`HttpClient`] retries 429 and 5xx responses only when configured with
//! `tries > 1` through [`ClientConfig`](crate::ClientConfig):
//!
//! - **429 (Rate Limited)**: waits for `Retry-After`, or 1 second if absent
//! - **5xx (Server Error)**: waits a fixed 1 second
//! - **Other errors (4xx)**: returned immediately

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, FORM_CONTENT_TYPE};
pub use http_response::HttpResponse;
pub use transport::Transport;
