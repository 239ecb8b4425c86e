//! # API Shared
//!
//! Shared utilities and definitions for the assistant's host APIs.
//!
//! Contains:
//! - Protobuf-generated wire types (`pb` module)
//! - Host configuration resolved at startup
//! - Transcript sessions and the chat service built on them
//! - Shared services like `HealthService`
//! - Authentication utilities
//!
//! Used by `api-grpc`, `api-rest` and the CLI.

// Re-export the generated protobuf module. The generated code will be placed
// into OUT_DIR at build time by the build script.
pub mod pb {
    tonic::include_proto!("pulmo.v1");
}

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod health;
pub mod transcript;

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("proto_descriptor");

pub use chat::{ChatOutcome, ChatService};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use health::HealthService;
pub use transcript::{TranscriptStore, TranscriptTurn};
