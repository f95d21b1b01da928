//! Command construction and execution.
//!
//! A [`Command`] binds a path, an [`HttpMethod`](crate::clients::HttpMethod),
//! a [`ParameterSet`] and a [`Protocol`]. Executing it prepares the
//! parameters (signing them when the protocol requires it), encodes them
//! into an [`HttpRequest`](crate::clients::HttpRequest) and hands that to a
//! [`Transport`](crate::clients::Transport).
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_command::clients::{HttpClient, HttpMethod};
//! use rest_command::command::{Command, Protocol};
//! use rest_command::response::{check_for_error, Envelope, SuccessResult};
//! use rest_command::Authority;
//!
//! let protocol = Protocol::https(Authority::new("api.example.com")?);
//! let client = HttpClient::new(None)?;
//!
//! let outcome: Envelope<SuccessResult> = Command::new(protocol, "/api/v1/widget", HttpMethod::Post)?
//!     .with_parameter("key", "abc")
//!     .with_parameter("id", 5)
//!     .fetch(&client, check_for_error)
//!     .await?;
//! ```

#[allow(clippy::module_inception)]
mod command;
mod errors;
mod parameters;
mod protocol;
pub mod signature;

pub use command::Command;
pub use errors::CommandError;
pub use parameters::{ParamValue, ParameterSet};
pub use protocol::{Protocol, Scheme};
