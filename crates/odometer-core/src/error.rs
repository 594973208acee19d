//! Shared error type across odometer crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Upstream could not be reached.
    UpstreamUnavailable,
    /// Upstream answered with a non-success status.
    UpstreamStatus,
    /// Upstream did not answer in time.
    UpstreamTimeout,
    /// Upstream body was not the expected JSON shape.
    MalformedPayload,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ClientCode::UpstreamStatus => "UPSTREAM_STATUS",
            ClientCode::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            ClientCode::MalformedPayload => "MALFORMED_PAYLOAD",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OdometerError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum OdometerError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("upstream timed out")]
    UpstreamTimeout,
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl OdometerError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            OdometerError::UpstreamUnavailable(_) => ClientCode::UpstreamUnavailable,
            OdometerError::UpstreamStatus(_) => ClientCode::UpstreamStatus,
            OdometerError::UpstreamTimeout => ClientCode::UpstreamTimeout,
            OdometerError::MalformedPayload(_) => ClientCode::MalformedPayload,
            OdometerError::BadConfig(_) => ClientCode::BadConfig,
            OdometerError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            OdometerError::Internal(_) => ClientCode::Internal,
        }
    }
}
