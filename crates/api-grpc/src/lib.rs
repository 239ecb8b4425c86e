//! # API gRPC
//!
//! gRPC server implementation for the assistant.
//!
//! Handles:
//! - gRPC service setup and API-key authentication
//! - Service implementations using `pulmo-core` for replies
//! - gRPC-specific concerns (interceptors, tonic integration)
//!
//! Uses `api-shared` for common types and utilities.

#![warn(rust_2018_idioms)]

pub use service::{pb, ApiKeyInterceptor, PulmoService};

pub mod service;
