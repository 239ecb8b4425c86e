use uuid::Uuid;

/// Errors raised by the host layer (configuration and transcript sessions).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid value for {var}: {message}")]
    InvalidConfig { var: &'static str, message: String },

    #[error("invalid session id: {0}")]
    InvalidSessionId(String),

    #[error("unknown session: {0}")]
    UnknownSession(Uuid),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
