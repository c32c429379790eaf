use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;

use crate::account::errors::AuthError;
use crate::account::models::AuthenticatedSession;
use crate::account::models::EmailAddress;
use crate::account::models::NewUser;
use crate::account::models::RegisterCommand;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::UserProfile;
use crate::account::models::Username;
use crate::account::ports::AuthServicePort;
use crate::account::ports::IdentityProvider;
use crate::account::ports::UserRepository;
use crate::config::JwtConfig;

/// Domain service implementation for authentication flows.
///
/// Request-scoped and stateless beyond the injected store, provider, and
/// read-only token configuration. Password hashing runs on the blocking
/// pool so concurrent request handling is never stalled.
pub struct AuthService<R, P>
where
    R: UserRepository,
    P: IdentityProvider,
{
    repository: Arc<R>,
    provider: Arc<P>,
    token_issuer: Arc<TokenIssuer>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl<R, P> AuthService<R, P>
where
    R: UserRepository,
    P: IdentityProvider,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `provider` - External identity provider client
    /// * `token_issuer` - Dual-domain token issuer (shared with middleware)
    /// * `config` - Token lifetimes, loaded once at startup
    pub fn new(
        repository: Arc<R>,
        provider: Arc<P>,
        token_issuer: Arc<TokenIssuer>,
        config: &JwtConfig,
    ) -> Self {
        Self {
            repository,
            provider,
            token_issuer,
            access_ttl: Duration::minutes(config.access_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_ttl_days),
        }
    }

    /// Issue an access + refresh token pair for a user and project out the
    /// password hash.
    fn issue_session(&self, user: &User) -> Result<AuthenticatedSession, AuthError> {
        let access_token = self
            .token_issuer
            .sign_access(&Claims::for_session(
                user.id.0,
                user.token_version,
                self.access_ttl,
            ))
            .map_err(AuthError::from)?;

        let refresh_token = self
            .token_issuer
            .sign_refresh(&Claims::for_session(
                user.id.0,
                user.token_version,
                self.refresh_ttl,
            ))
            .map_err(AuthError::from)?;

        Ok(AuthenticatedSession {
            user: UserProfile::from(user),
            access_token,
            refresh_token,
        })
    }

    /// Hash a password off the async executor.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hash = tokio::task::spawn_blocking(move || PasswordHasher::new().hash(&password))
            .await
            .map_err(|e| AuthError::Unknown(format!("Password hashing task failed: {}", e)))??;
        Ok(hash)
    }

    /// Verify a password off the async executor. A mismatch is `Ok(false)`.
    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let matches =
            tokio::task::spawn_blocking(move || PasswordHasher::new().verify(&password, &hash))
                .await
                .map_err(|e| {
                    AuthError::Unknown(format!("Password verification task failed: {}", e))
                })??;
        Ok(matches)
    }
}

#[async_trait]
impl<R, P> AuthServicePort for AuthService<R, P>
where
    R: UserRepository,
    P: IdentityProvider,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedSession, AuthError> {
        // Email-uniqueness check precedes the name check in every flow that
        // performs both, for consistent error precedence.
        if let Some(existing) = self.repository.find_by_email(command.email.as_str()).await? {
            return Err(AuthError::EmailAlreadyExists(
                existing.email.as_str().to_string(),
            ));
        }

        if let Some(existing) = self.repository.find_by_name(command.name.as_str()).await? {
            return Err(AuthError::NameAlreadyExists(
                existing.name.as_str().to_string(),
            ));
        }

        let password_hash = self.hash_password(command.password).await?;

        // Two concurrent registrations can both pass the checks above; the
        // store's unique constraints pick the winner and the loser surfaces
        // here as the same conflict error.
        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash: Some(password_hash),
                provider_id: None,
            })
            .await?;

        self.issue_session(&user)
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        let user = self
            .repository
            .find_by_email(email.as_str())
            .await?
            .ok_or_else(|| AuthError::NotFound(email.as_str().to_string()))?;

        // Federation-only accounts have no password; verification always
        // fails for them.
        let verified = match &user.password_hash {
            Some(hash) => {
                self.verify_password(password.to_owned(), hash.clone())
                    .await?
            }
            None => false,
        };

        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_session(&user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims: Claims = self
            .token_issuer
            .verify_refresh(refresh_token)
            .map_err(AuthError::from)?;

        // Exact token-version match: a bumped version invalidates every
        // previously issued refresh token for the user.
        let user = self
            .repository
            .find_by_id_and_version(UserId(claims.sub), claims.ver)
            .await?
            .ok_or(AuthError::StaleToken)?;

        // A new access token only; the refresh token is not rotated.
        let access_token = self.token_issuer.sign_access(&Claims::for_session(
            user.id.0,
            user.token_version,
            self.access_ttl,
        ))?;

        Ok(access_token)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        self.provider.exchange_code(code).await
    }

    async fn federated_login(
        &self,
        provider_access_token: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        let identity = self.provider.fetch_identity(provider_access_token).await?;

        // Provider id already bound: plain login for that user.
        if let Some(user) = self.repository.find_by_provider_id(identity.id).await? {
            return self.issue_session(&user);
        }

        // First-time federation. Fail closed on any collision with an
        // existing account; silently taking over a local account that
        // shares an email would be an account-linking decision this flow
        // must not make.
        let name = Username::new(identity.login)?;
        let email = EmailAddress::new(identity.email)?;

        if let Some(existing) = self.repository.find_by_email(email.as_str()).await? {
            return Err(AuthError::EmailAlreadyExists(
                existing.email.as_str().to_string(),
            ));
        }

        if let Some(existing) = self.repository.find_by_name(name.as_str()).await? {
            return Err(AuthError::NameAlreadyExists(
                existing.name.as_str().to_string(),
            ));
        }

        let user = self
            .repository
            .create(NewUser {
                name,
                email,
                password_hash: None,
                provider_id: Some(identity.id),
            })
            .await?;

        self.issue_session(&user)
    }

    async fn get_user(&self, id: UserId, token_version: i32) -> Result<UserProfile, AuthError> {
        let user = self
            .repository
            .find_by_id_and_version(id, token_version)
            .await?
            .ok_or(AuthError::StaleToken)?;

        Ok(UserProfile::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::account::models::ProviderIdentity;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, new_user: NewUser) -> Result<User, AuthError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
            async fn find_by_name(&self, name: &str) -> Result<Option<User>, AuthError>;
            async fn find_by_provider_id(&self, provider_id: i64) -> Result<Option<User>, AuthError>;
            async fn find_by_id_and_version(&self, id: UserId, token_version: i32) -> Result<Option<User>, AuthError>;
        }
    }

    mock! {
        pub TestIdentityProvider {}

        #[async_trait]
        impl IdentityProvider for TestIdentityProvider {
            async fn exchange_code(&self, code: &str) -> Result<String, AuthError>;
            async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity, AuthError>;
        }
    }

    const ACCESS_SECRET: &[u8] = b"test-access-secret-at-least-32-bytes!";
    const REFRESH_SECRET: &[u8] = b"test-refresh-secret-at-least-32-byte!";

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            access_secret: String::from_utf8(ACCESS_SECRET.to_vec()).unwrap(),
            access_ttl_minutes: 15,
            refresh_secret: String::from_utf8(REFRESH_SECRET.to_vec()).unwrap(),
            refresh_ttl_days: 7,
        }
    }

    fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(ACCESS_SECRET, REFRESH_SECRET))
    }

    fn service(
        repository: MockTestUserRepository,
        provider: MockTestIdentityProvider,
    ) -> AuthService<MockTestUserRepository, MockTestIdentityProvider> {
        AuthService::new(
            Arc::new(repository),
            Arc::new(provider),
            issuer(),
            &jwt_config(),
        )
    }

    fn local_user(id: i64, name: &str, email: &str, password_hash: &str) -> User {
        User {
            id: UserId(id),
            name: Username::new(name.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: Some(password_hash.to_string()),
            provider_id: None,
            token_version: 0,
            created_at: Utc::now(),
        }
    }

    fn federated_user(id: i64, name: &str, email: &str, provider_id: i64) -> User {
        User {
            id: UserId(id),
            name: Username::new(name.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: None,
            provider_id: Some(provider_id),
            token_version: 0,
            created_at: Utc::now(),
        }
    }

    fn register_command(name: &str, email: &str, password: &str) -> RegisterCommand {
        RegisterCommand::new(
            Username::new(name.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            password.to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        repository
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_name()
            .with(eq("ana"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|new_user| {
                new_user.name.as_str() == "ana"
                    && new_user.email.as_str() == "a@x.com"
                    && new_user.provider_id.is_none()
                    && new_user
                        .password_hash
                        .as_deref()
                        .is_some_and(|h| h.starts_with("$argon2"))
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: UserId(1),
                    name: new_user.name,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    provider_id: None,
                    token_version: 0,
                    created_at: Utc::now(),
                })
            });

        let service = service(repository, provider);
        let session = service
            .register(register_command("ana", "a@x.com", "Secret1!"))
            .await
            .expect("Registration failed");

        assert_eq!(session.user.id, UserId(1));
        assert_eq!(session.user.token_version, 0);

        // Both tokens verify in their own domain and carry the user id
        let access: Claims = issuer().verify_access(&session.access_token).unwrap();
        let refresh: Claims = issuer().verify_refresh(&session.refresh_token).unwrap();
        assert_eq!(access.sub, 1);
        assert_eq!(access.ver, 0);
        assert_eq!(refresh.sub, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(local_user(1, "other", "a@x.com", "$argon2id$x"))));
        // Email conflict short-circuits: no name check, no insert
        repository.expect_find_by_name().times(0);
        repository.expect_create().times(0);

        let service = service(repository, provider);
        let result = service
            .register(register_command("ana", "a@x.com", "Secret1!"))
            .await;

        assert!(matches!(result, Err(AuthError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_name() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(local_user(1, "ana", "other@x.com", "$argon2id$x"))));
        repository.expect_create().times(0);

        let service = service(repository, provider);
        let result = service
            .register(register_command("ana", "a@x.com", "Secret1!"))
            .await;

        assert!(matches!(result, Err(AuthError::NameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_lost_insert_race() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        // Both existence checks pass, but a concurrent registration wins
        // the insert; the storage-layer duplicate surfaces as the same
        // conflict as the pre-check path.
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|new_user| {
                Err(AuthError::EmailAlreadyExists(
                    new_user.email.as_str().to_string(),
                ))
            });

        let service = service(repository, provider);
        let result = service
            .register(register_command("ana", "a@x.com", "Secret1!"))
            .await;

        assert!(matches!(result, Err(AuthError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        let hash = PasswordHasher::new().hash("Secret1!").unwrap();
        repository
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .times(1)
            .returning(move |_| Ok(Some(local_user(1, "ana", "a@x.com", &hash))));

        let service = service(repository, provider);
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let session = service.login(&email, "Secret1!").await.expect("Login failed");

        assert_eq!(session.user.name.as_str(), "ana");
        let access: Claims = issuer().verify_access(&session.access_token).unwrap();
        assert_eq!(access.sub, 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        let hash = PasswordHasher::new().hash("Secret1!").unwrap();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(local_user(1, "ana", "a@x.com", &hash))));

        let service = service(repository, provider);
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let result = service.login(&email, "wrong_password").await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository, provider);
        let email = EmailAddress::new("nobody@x.com".to_string()).unwrap();
        let result = service.login(&email, "Secret1!").await;

        // Deliberately distinguishable from a password mismatch
        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_login_federation_only_account() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(federated_user(1, "ana", "a@x.com", 9001))));

        let service = service(repository, provider);
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let result = service.login(&email, "anything").await;

        // No stored password: verification fails, never panics
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        repository
            .expect_find_by_id_and_version()
            .with(eq(UserId(1)), eq(0))
            .times(1)
            .returning(|_, _| Ok(Some(local_user(1, "ana", "a@x.com", "$argon2id$x"))));

        let service = service(repository, provider);
        let refresh_token = issuer()
            .sign_refresh(&Claims::for_session(1, 0, Duration::days(7)))
            .unwrap();

        let access_token = service
            .refresh(&refresh_token)
            .await
            .expect("Refresh failed");

        let claims: Claims = issuer().verify_access(&access_token).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.ver, 0);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        let service = service(repository, provider);
        let access_token = issuer()
            .sign_access(&Claims::for_session(1, 0, Duration::minutes(15)))
            .unwrap();

        // Wrong trust domain: the store is never consulted
        let result = service.refresh(&access_token).await;
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn test_refresh_expired_token() {
        let repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        let service = service(repository, provider);
        let expired = issuer()
            .sign_refresh(&Claims::for_session(1, 0, Duration::seconds(-60)))
            .unwrap();

        let result = service.refresh(&expired).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn test_refresh_stale_version() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        // Token carries version 0 but the stored counter has been bumped
        repository
            .expect_find_by_id_and_version()
            .with(eq(UserId(1)), eq(0))
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(repository, provider);
        let refresh_token = issuer()
            .sign_refresh(&Claims::for_session(1, 0, Duration::days(7)))
            .unwrap();

        let result = service.refresh(&refresh_token).await;
        assert!(matches!(result, Err(AuthError::StaleToken)));
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let repository = MockTestUserRepository::new();
        let mut provider = MockTestIdentityProvider::new();

        provider
            .expect_exchange_code()
            .with(eq("bad-code"))
            .times(1)
            .returning(|_| Err(AuthError::ProviderRejected("code rejected".to_string())));

        let service = service(repository, provider);
        let result = service.exchange_code("bad-code").await;

        assert!(matches!(result, Err(AuthError::ProviderRejected(_))));
    }

    #[tokio::test]
    async fn test_federated_login_existing_binding() {
        let mut repository = MockTestUserRepository::new();
        let mut provider = MockTestIdentityProvider::new();

        provider
            .expect_fetch_identity()
            .with(eq("gho_token"))
            .times(1)
            .returning(|_| {
                Ok(ProviderIdentity {
                    id: 9001,
                    login: "octo-ana".to_string(),
                    email: "ana@x.com".to_string(),
                })
            });
        repository
            .expect_find_by_provider_id()
            .with(eq(9001))
            .times(1)
            .returning(|_| Ok(Some(federated_user(3, "octo-ana", "ana@x.com", 9001))));
        // Login path: no conflict checks, no insert
        repository.expect_find_by_email().times(0);
        repository.expect_create().times(0);

        let service = service(repository, provider);
        let session = service
            .federated_login("gho_token")
            .await
            .expect("Federated login failed");

        assert_eq!(session.user.id, UserId(3));
        assert_eq!(session.user.provider_id, Some(9001));
    }

    #[tokio::test]
    async fn test_federated_login_first_contact() {
        let mut repository = MockTestUserRepository::new();
        let mut provider = MockTestIdentityProvider::new();

        provider.expect_fetch_identity().times(1).returning(|_| {
            Ok(ProviderIdentity {
                id: 9001,
                login: "octo-ana".to_string(),
                email: "ana@x.com".to_string(),
            })
        });
        repository
            .expect_find_by_provider_id()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .with(eq("ana@x.com"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_name()
            .with(eq("octo-ana"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|new_user| {
                new_user.password_hash.is_none() && new_user.provider_id == Some(9001)
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: UserId(4),
                    name: new_user.name,
                    email: new_user.email,
                    password_hash: None,
                    provider_id: new_user.provider_id,
                    token_version: 0,
                    created_at: Utc::now(),
                })
            });

        let service = service(repository, provider);
        let session = service
            .federated_login("gho_token")
            .await
            .expect("Federated login failed");

        assert_eq!(session.user.id, UserId(4));
        let refresh: Claims = issuer().verify_refresh(&session.refresh_token).unwrap();
        assert_eq!(refresh.sub, 4);
    }

    #[tokio::test]
    async fn test_federated_login_email_collision() {
        let mut repository = MockTestUserRepository::new();
        let mut provider = MockTestIdentityProvider::new();

        provider.expect_fetch_identity().times(1).returning(|_| {
            Ok(ProviderIdentity {
                id: 9001,
                login: "octo-ana".to_string(),
                email: "ana@x.com".to_string(),
            })
        });
        repository
            .expect_find_by_provider_id()
            .times(1)
            .returning(|_| Ok(None));
        // A local account already owns this email: fail closed, never
        // attach the provider id to it
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(local_user(1, "ana", "ana@x.com", "$argon2id$x"))));
        repository.expect_find_by_name().times(0);
        repository.expect_create().times(0);

        let service = service(repository, provider);
        let result = service.federated_login("gho_token").await;

        assert!(matches!(result, Err(AuthError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_federated_login_name_collision() {
        let mut repository = MockTestUserRepository::new();
        let mut provider = MockTestIdentityProvider::new();

        provider.expect_fetch_identity().times(1).returning(|_| {
            Ok(ProviderIdentity {
                id: 9001,
                login: "ana".to_string(),
                email: "fresh@x.com".to_string(),
            })
        });
        repository
            .expect_find_by_provider_id()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(local_user(1, "ana", "ana@x.com", "$argon2id$x"))));
        repository.expect_create().times(0);

        let service = service(repository, provider);
        let result = service.federated_login("gho_token").await;

        assert!(matches!(result, Err(AuthError::NameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_federated_login_provider_unavailable() {
        let repository = MockTestUserRepository::new();
        let mut provider = MockTestIdentityProvider::new();

        provider.expect_fetch_identity().times(1).returning(|_| {
            Err(AuthError::ProviderUnavailable(
                "connection timed out".to_string(),
            ))
        });

        let service = service(repository, provider);
        let result = service.federated_login("gho_token").await;

        // Distinguished from a rejected credential
        assert!(matches!(result, Err(AuthError::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn test_get_user_stale_version() {
        let mut repository = MockTestUserRepository::new();
        let provider = MockTestIdentityProvider::new();

        repository
            .expect_find_by_id_and_version()
            .with(eq(UserId(1)), eq(2))
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(repository, provider);
        let result = service.get_user(UserId(1), 2).await;

        assert!(matches!(result, Err(AuthError::StaleToken)));
    }
}
