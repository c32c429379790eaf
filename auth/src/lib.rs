//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the identity service:
//! - Password hashing (Argon2id)
//! - JWT session token generation and validation
//! - Dual-domain token issuance (access + refresh)
//!
//! The service defines its own domain ports and adapts these implementations.
//! Keeping this crate free of persistence and transport concerns means the
//! token and password primitives stay trivially unit-testable.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Dual-Domain Tokens
//! ```
//! use auth::{Claims, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_lng!",
//! );
//!
//! let claims = Claims::for_session(42, 0, Duration::minutes(15));
//! let token = issuer.sign_access(&claims).unwrap();
//! let decoded: Claims = issuer.verify_access(&token).unwrap();
//! assert_eq!(decoded.sub, 42);
//!
//! // An access token never verifies in the refresh domain.
//! assert!(issuer.verify_refresh::<Claims>(&token).is_err());
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
