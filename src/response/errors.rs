//! Errors reported by a remote API inside a successful HTTP response.

use serde_json::Value;
use thiserror::Error;

/// An error envelope found in an otherwise successful response.
///
/// Produced only by [`check_for_error`](crate::response::check_for_error)
/// and the transformers built on it. The full payload is kept for
/// diagnostics.
///
/// # Example
///
/// ```rust
/// use rest_command::response::ResultError;
/// use serde_json::json;
///
/// let error = ResultError {
///     message: "bad key".to_string(),
///     code: 403,
///     raw: json!({"error": {"message": "bad key", "code": 403}}),
/// };
/// assert_eq!(error.to_string(), "API error 403: bad key");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("API error {code}: {message}")]
pub struct ResultError {
    /// Human-readable message from the API.
    pub message: String,
    /// Numeric error code from the API, `0` when none was sent.
    pub code: i64,
    /// The complete response payload.
    pub raw: Value,
}
