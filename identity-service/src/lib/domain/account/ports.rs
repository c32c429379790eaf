use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::models::AuthenticatedSession;
use crate::account::models::EmailAddress;
use crate::account::models::NewUser;
use crate::account::models::ProviderIdentity;
use crate::account::models::RegisterCommand;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::UserProfile;

/// Port for authentication flow operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new local user and issue both tokens.
    ///
    /// Uniqueness is checked email-first, then name, for consistent error
    /// precedence; the storage-layer unique constraint closes the
    /// check-then-insert race.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `NameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand)
        -> Result<AuthenticatedSession, AuthError>;

    /// Authenticate a local user and issue both tokens.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `InvalidCredentials` - Password mismatch, or federation-only account
    /// * `DatabaseError` - Store operation failed
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthError>;

    /// Mint a new access token from a valid refresh token.
    ///
    /// The refresh token is not rotated; only an access token is returned.
    ///
    /// # Errors
    /// * `TokenInvalid` / `TokenExpired` - Refresh token failed verification
    /// * `StaleToken` - User gone or token version since bumped
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Exchange a provider authorization code for a provider access token.
    ///
    /// # Errors
    /// * `ProviderRejected` - Code was invalid or expired
    /// * `ProviderUnavailable` - Provider network/service error
    async fn exchange_code(&self, code: &str) -> Result<String, AuthError>;

    /// Complete a federated login with a provider access token.
    ///
    /// Logs in the bound user if the provider id is already known;
    /// otherwise creates a federation-only account, failing closed when the
    /// provider email or login name collides with an existing account.
    ///
    /// # Errors
    /// * `ProviderRejected` / `ProviderUnavailable` - Identity fetch failed
    /// * `EmailAlreadyExists` / `NameAlreadyExists` - Identity collides with
    ///   an existing account
    async fn federated_login(
        &self,
        provider_access_token: &str,
    ) -> Result<AuthenticatedSession, AuthError>;

    /// Load the profile for an authenticated user.
    ///
    /// # Errors
    /// * `StaleToken` - User gone or token version no longer current
    async fn get_user(&self, id: UserId, token_version: i32) -> Result<UserProfile, AuthError>;
}

/// Persistence operations for the credential store.
///
/// All lookup columns are unique, so reads return zero or one row.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new user; the store assigns id, token version, and
    /// creation time.
    ///
    /// Must surface uniqueness violations as `EmailAlreadyExists` /
    /// `NameAlreadyExists`, including when a concurrent insert wins the
    /// race after the caller's existence checks passed.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `NameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, AuthError>;

    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve user by username.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve user by external provider id.
    async fn find_by_provider_id(&self, provider_id: i64) -> Result<Option<User>, AuthError>;

    /// Retrieve user by id with an exact token-version match.
    ///
    /// Returns `None` when the user does not exist or the stored version
    /// differs from `token_version` (stale token).
    async fn find_by_id_and_version(
        &self,
        id: UserId,
        token_version: i32,
    ) -> Result<Option<User>, AuthError>;
}

/// Narrow capability interface over the external identity provider.
///
/// Two read operations against the provider's REST surface; the federated
/// flow is testable against a fake without network access.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Forward an authorization code (plus client credentials) to the
    /// provider's token endpoint.
    ///
    /// # Errors
    /// * `ProviderRejected` - No access token returned (invalid/expired code)
    /// * `ProviderUnavailable` - Provider network/service error
    async fn exchange_code(&self, code: &str) -> Result<String, AuthError>;

    /// Fetch the provider identity behind an access token: external id,
    /// login name, and primary verified email.
    ///
    /// # Errors
    /// * `ProviderRejected` - Token rejected, or no primary verified email
    /// * `ProviderUnavailable` - Provider network/service error
    async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity, AuthError>;
}
