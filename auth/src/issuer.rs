use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Dual-domain token issuer.
///
/// Holds one [`JwtHandler`] per trust domain. Access and refresh tokens
/// carry the same payload shape but are signed with distinct secrets, so a
/// token minted in one domain never verifies in the other.
pub struct TokenIssuer {
    access: JwtHandler,
    refresh: JwtHandler,
}

impl TokenIssuer {
    /// Create a new issuer with one secret per domain.
    ///
    /// The two secrets must differ; sharing a secret would collapse the
    /// domains and let a refresh token authorize requests directly.
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            access: JwtHandler::new(access_secret),
            refresh: JwtHandler::new(refresh_secret),
        }
    }

    /// Sign claims in the access domain.
    pub fn sign_access<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.access.encode(claims)
    }

    /// Sign claims in the refresh domain.
    pub fn sign_refresh<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.refresh.encode(claims)
    }

    /// Verify a token against the access domain.
    ///
    /// # Errors
    /// * `TokenExpired` - Token ttl has elapsed
    /// * `DecodingFailed` - Bad signature, wrong domain, or malformed token
    pub fn verify_access<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.access.decode(token)
    }

    /// Verify a token against the refresh domain.
    ///
    /// # Errors
    /// * `TokenExpired` - Token ttl has elapsed
    /// * `DecodingFailed` - Bad signature, wrong domain, or malformed token
    pub fn verify_refresh<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.refresh.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::jwt::Claims;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            b"access_secret_at_least_32_bytes_long!",
            b"refresh_secret_at_least_32_bytes_lng!",
        )
    }

    #[test]
    fn test_sign_and_verify_access() {
        let issuer = issuer();
        let claims = Claims::for_session(42, 0, Duration::minutes(15));

        let token = issuer.sign_access(&claims).expect("Failed to sign");
        let decoded: Claims = issuer.verify_access(&token).expect("Failed to verify");

        assert_eq!(decoded.sub, 42);
        assert_eq!(decoded.ver, 0);
    }

    #[test]
    fn test_sign_and_verify_refresh() {
        let issuer = issuer();
        let claims = Claims::for_session(7, 2, Duration::days(7));

        let token = issuer.sign_refresh(&claims).expect("Failed to sign");
        let decoded: Claims = issuer.verify_refresh(&token).expect("Failed to verify");

        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.ver, 2);
    }

    #[test]
    fn test_cross_domain_tokens_never_verify() {
        let issuer = issuer();
        let claims = Claims::for_session(42, 0, Duration::minutes(15));

        let access_token = issuer.sign_access(&claims).expect("Failed to sign");
        let refresh_token = issuer.sign_refresh(&claims).expect("Failed to sign");

        assert!(matches!(
            issuer.verify_refresh::<Claims>(&access_token),
            Err(JwtError::DecodingFailed(_))
        ));
        assert!(matches!(
            issuer.verify_access::<Claims>(&refresh_token),
            Err(JwtError::DecodingFailed(_))
        ));
    }

    #[test]
    fn test_expired_refresh_token() {
        let issuer = issuer();
        let claims = Claims::for_session(42, 0, Duration::seconds(-60));

        let token = issuer.sign_refresh(&claims).expect("Failed to sign");
        let result = issuer.verify_refresh::<Claims>(&token);

        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }
}
