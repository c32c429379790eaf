use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::EmailError;
use crate::account::errors::UsernameError;

/// User identity record.
///
/// A user owns a password hash (local signup), a provider id (federated
/// signup), or both. Federation-only accounts carry no password.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: Username,
    pub email: EmailAddress,
    /// One-way Argon2id hash; `None` for federation-only accounts.
    pub password_hash: Option<String>,
    /// External identity provider user id; unique when set.
    pub provider_id: Option<i64>,
    /// Incremented only by explicit invalidation events. Every issued token
    /// snapshots this value; a mismatch marks the token stale.
    pub token_version: i32,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric,
/// underscore, and hyphen. GitHub login names satisfy these rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Insert record for a new user. The store assigns id, token version, and
/// creation time.
#[derive(Debug)]
pub struct NewUser {
    pub name: Username,
    pub email: EmailAddress,
    pub password_hash: Option<String>,
    pub provider_id: Option<i64>,
}

/// Command to register a new local user with validated fields.
///
/// Confirm-password equality is a boundary concern; the flow trusts
/// `password` alone.
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(name: Username, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Identity fetched from the external provider per federated-login attempt.
/// Never persisted as its own entity.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    /// Provider-side user id
    pub id: i64,
    /// Login/display name
    pub login: String,
    /// Primary verified email on the provider account
    pub email: String,
}

/// Projection of [`User`] without the password hash. The only user shape
/// that leaves the domain layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: Username,
    pub email: EmailAddress,
    pub provider_id: Option<i64>,
    pub token_version: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            provider_id: user.provider_id,
            token_version: user.token_version,
            created_at: user.created_at,
        }
    }
}

/// Result of a successful login, registration, or federated login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}
