use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid or token is malformed: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,
}
