use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AuthError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewUser;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::Username;
use crate::domain::account::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, AuthError> {
        let db_err = |e: sqlx::Error| AuthError::DatabaseError(e.to_string());

        Ok(User {
            id: UserId(row.try_get("id").map_err(db_err)?),
            name: Username::new(row.try_get("name").map_err(db_err)?)?,
            email: EmailAddress::new(row.try_get("email").map_err(db_err)?)?,
            password_hash: row.try_get("password_hash").map_err(db_err)?,
            provider_id: row.try_get("provider_id").map_err(db_err)?,
            token_version: row.try_get("token_version").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, provider_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, provider_id, token_version, created_at
            "#,
        )
        .bind(new_user.name.as_str())
        .bind(new_user.email.as_str())
        .bind(&new_user.password_hash)
        .bind(new_user.provider_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraints are the authoritative arbiter for
            // concurrent inserts racing on the same column; the loser gets
            // the same error as a failed pre-insert existence check.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_email_key") {
                        return AuthError::EmailAlreadyExists(
                            new_user.email.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("users_name_key")
                        || db_err.constraint() == Some("users_provider_id_key")
                    {
                        return AuthError::NameAlreadyExists(new_user.name.as_str().to_string());
                    }
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Self::row_to_user(&row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, provider_id, token_version, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, provider_id, token_version, created_at
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_provider_id(&self, provider_id: i64) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, provider_id, token_version, created_at
            FROM users
            WHERE provider_id = $1
            "#,
        )
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id_and_version(
        &self,
        id: UserId,
        token_version: i32,
    ) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, provider_id, token_version, created_at
            FROM users
            WHERE id = $1 AND token_version = $2
            "#,
        )
        .bind(id.0)
        .bind(token_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}
