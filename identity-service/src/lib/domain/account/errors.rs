use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all authentication operations.
///
/// Every flow failure is typed; the HTTP layer is the only place these are
/// mapped to transport statuses. Not-found and wrong-password are
/// deliberately distinguishable here even though a boundary may choose to
/// present them identically.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    // Credential failures
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Uniqueness violations (pre-check or storage-layer race fallback)
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Username already exists: {0}")]
    NameAlreadyExists(String),

    // Token failures
    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token no longer matches a live session")]
    StaleToken,

    // Identity provider failures
    #[error("Identity provider rejected the request: {0}")]
    ProviderRejected(String),

    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => AuthError::TokenExpired,
            auth::JwtError::DecodingFailed(_) => AuthError::TokenInvalid,
            auth::JwtError::EncodingFailed(msg) => {
                AuthError::Unknown(format!("Token signing failed: {}", msg))
            }
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}
