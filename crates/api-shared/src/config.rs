//! Host runtime configuration.
//!
//! Resolved once at process startup and passed into the servers, so request handlers never
//! read environment variables. The `*_from_env_value` helpers take the raw optional value so
//! they can be tested without touching the process environment.

use crate::error::{ApiError, ApiResult};
use std::net::SocketAddr;

pub const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:50051";
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_TRANSCRIPT_TURNS: usize = 200;
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

pub const GRPC_ADDR_VAR: &str = "PULMO_ADDR";
pub const REST_ADDR_VAR: &str = "PULMO_REST_ADDR";
pub const ENABLE_REFLECTION_VAR: &str = "PULMO_ENABLE_REFLECTION";
pub const MAX_TRANSCRIPT_TURNS_VAR: &str = "PULMO_MAX_TRANSCRIPT_TURNS";
pub const MAX_SESSIONS_VAR: &str = "PULMO_MAX_SESSIONS";
pub const API_KEY_VAR: &str = "API_KEY";

/// Host configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    grpc_addr: SocketAddr,
    rest_addr: SocketAddr,
    enable_reflection: bool,
    max_transcript_turns: usize,
    max_sessions: usize,
    api_key: Option<String>,
}

impl ApiConfig {
    /// Read configuration from the process environment.
    ///
    /// Call after `dotenvy::dotenv()` so `.env` values are visible.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] if any variable is set to an unparsable value.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_values(
            std::env::var(GRPC_ADDR_VAR).ok(),
            std::env::var(REST_ADDR_VAR).ok(),
            std::env::var(ENABLE_REFLECTION_VAR).ok(),
            std::env::var(MAX_TRANSCRIPT_TURNS_VAR).ok(),
            std::env::var(MAX_SESSIONS_VAR).ok(),
            std::env::var(API_KEY_VAR).ok(),
        )
    }

    /// Build configuration from raw optional values. Unset or blank values take defaults.
    pub fn from_values(
        grpc_addr: Option<String>,
        rest_addr: Option<String>,
        enable_reflection: Option<String>,
        max_transcript_turns: Option<String>,
        max_sessions: Option<String>,
        api_key: Option<String>,
    ) -> ApiResult<Self> {
        Ok(Self {
            grpc_addr: socket_addr_from_env_value(GRPC_ADDR_VAR, grpc_addr, DEFAULT_GRPC_ADDR)?,
            rest_addr: socket_addr_from_env_value(REST_ADDR_VAR, rest_addr, DEFAULT_REST_ADDR)?,
            enable_reflection: flag_from_env_value(ENABLE_REFLECTION_VAR, enable_reflection)?,
            max_transcript_turns: count_from_env_value(
                MAX_TRANSCRIPT_TURNS_VAR,
                max_transcript_turns,
                DEFAULT_MAX_TRANSCRIPT_TURNS,
            )?,
            max_sessions: count_from_env_value(MAX_SESSIONS_VAR, max_sessions, DEFAULT_MAX_SESSIONS)?,
            api_key: non_blank(api_key),
        })
    }

    pub fn grpc_addr(&self) -> SocketAddr {
        self.grpc_addr
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    pub fn enable_reflection(&self) -> bool {
        self.enable_reflection
    }

    pub fn max_transcript_turns(&self) -> usize {
        self.max_transcript_turns
    }

    /// Transcript sessions kept at once; the least recently used is dropped past this.
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            grpc_addr: SocketAddr::from(([0, 0, 0, 0], 50051)),
            rest_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            enable_reflection: false,
            max_transcript_turns: DEFAULT_MAX_TRANSCRIPT_TURNS,
            max_sessions: DEFAULT_MAX_SESSIONS,
            api_key: None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a socket address, falling back to `default` when unset.
pub fn socket_addr_from_env_value(
    var: &'static str,
    value: Option<String>,
    default: &str,
) -> ApiResult<SocketAddr> {
    let raw = non_blank(value).unwrap_or_else(|| default.to_string());
    raw.parse().map_err(|e| ApiError::InvalidConfig {
        var,
        message: format!("{raw:?} is not a socket address: {e}"),
    })
}

/// Parse a boolean flag. Accepts `true`/`false`, `1`/`0` and `yes`/`no`; unset means false.
pub fn flag_from_env_value(var: &'static str, value: Option<String>) -> ApiResult<bool> {
    match non_blank(value).map(|v| v.to_ascii_lowercase()).as_deref() {
        None | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => Err(ApiError::InvalidConfig {
            var,
            message: format!("{other:?} is not a boolean"),
        }),
    }
}

/// Parse a limit such as turns per session or open sessions. Must be at least 1.
pub fn count_from_env_value(
    var: &'static str,
    value: Option<String>,
    default: usize,
) -> ApiResult<usize> {
    let Some(raw) = non_blank(value) else {
        return Ok(default);
    };
    match raw.parse::<usize>() {
        Ok(0) => Err(ApiError::InvalidConfig {
            var,
            message: "must be at least 1".into(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ApiError::InvalidConfig {
            var,
            message: format!("{raw:?} is not a positive integer: {e}"),
        }),
    }
}
