//! Blocking client for a remote Todo REST resource.
//!
//! # Overview
//! `TodoApiClient` exposes list, get, create, update and delete. Every call
//! returns an `Either<ApiError, T>`: callers branch on the outcome instead of
//! handling panics or opaque errors.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network.
//! - `classify` is the single place where a status code and decoded body
//!   become success or failure.
//! - `Transport` executes the round-trip; `UreqTransport` is the default.
//!   A transport error never reaches the classifier and surfaces as
//!   `ApiError::Network`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod classify;
pub mod client;
pub mod config;
pub mod either;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::TodoApiClient;
pub use classify::classify;
pub use client::TodoClient;
pub use config::ClientConfig;
pub use either::Either;
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::Task;
