//! # REST Command Library
//!
//! Declarative REST calls with uniform response normalization.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`ParameterSet`](command::ParameterSet) with guarded insertion
//! - Four [`Protocol`](command::Protocol) variants: plain HTTP, plain HTTPS
//!   and their AtomPark-signed counterparts
//! - An immutable [`Command`](command::Command) builder with `execute` and `fetch`
//! - Response transformers that surface API error envelopes and reshape
//!   columnar `fields`/`data` results into row objects
//! - Typed mapping of the transformed JSON with `serde`
//! - An async, `reqwest`-backed [`HttpClient`] behind the [`Transport`](clients::Transport) trait
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_command::clients::HttpMethod;
//! use rest_command::command::{Command, Protocol};
//! use rest_command::Authority;
//!
//! let protocol = Protocol::https(Authority::new("api.example.com").unwrap());
//! let command = Command::new(protocol, "/api/v1/widget", HttpMethod::Post)
//!     .unwrap()
//!     .with_parameter("key", "abc")
//!     .with_parameter("id", 5)
//!     .with_parameter_if_present("note", None);
//!
//! let request = command.to_request().unwrap();
//! assert_eq!(request.url(), "https://api.example.com/api/v1/widget");
//! assert_eq!(request.body.as_deref(), Some("key=abc&id=5"));
//! ```
//!
//! ## Executing and Mapping
//!
//! ```rust,ignore
//! use rest_command::clients::HttpClient;
//! use rest_command::response::{check_for_error, Envelope, SuccessResult};
//!
//! let client = HttpClient::new(None)?;
//! let outcome: Envelope<SuccessResult> = command.fetch(&client, check_for_error).await?;
//! assert!(outcome.into_inner().successful);
//! ```
//!
//! ## Signed Requests
//!
//! The AtomPark protocols add a `sum` parameter computed from the other
//! parameters and a private key, see [`command::signature`].
//!
//! ```rust
//! use rest_command::command::{ParameterSet, Protocol};
//! use rest_command::{Authority, PrivateKey};
//!
//! let protocol = Protocol::atompark_https(
//!     Authority::new("atompark.com").unwrap(),
//!     PrivateKey::new("private").unwrap(),
//! );
//! let prepared = protocol.prepare(&ParameterSet::new().set("action", "getUserBalance"));
//! assert!(prepared.contains("sum"));
//! ```
//!
//! ## Design Principles
//!
//! - **Values, not mutation**: commands and parameter sets are consumed and
//!   returned, so templates can be cloned safely
//! - **Three distinct failures**: transport, API envelope and shape mismatch
//!   are separate [`CommandError`] variants
//! - **Thread-safe**: protocols, commands and providers are `Send + Sync`
//! - **Injected transport**: anything implementing [`Transport`](clients::Transport)
//!   can carry commands

pub mod clients;
pub mod command;
pub mod config;
pub mod error;
pub mod provider;
pub mod providers;
pub mod response;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, Authority, ClientConfig, ClientConfigBuilder, PrivateKey};
pub use error::ConfigError;

pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use command::{Command, CommandError, ParamValue, ParameterSet, Protocol};
pub use provider::RestApiProvider;
pub use response::ResultError;
