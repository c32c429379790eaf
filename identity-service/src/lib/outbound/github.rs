use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::config::GithubConfig;
use crate::domain::account::errors::AuthError;
use crate::domain::account::models::ProviderIdentity;
use crate::domain::account::ports::IdentityProvider;

/// GitHub identity provider client.
///
/// Two read calls against the REST surface: the token exchange and the
/// profile + email-list fetch. The underlying client carries an explicit
/// timeout so a hung provider cannot pin request handlers indefinitely.
pub struct GithubProvider {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    api_base_url: String,
}

#[derive(Debug, Serialize)]
struct AccessTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

/// GitHub answers a bad or expired code with 200 and no `access_token`
/// field, so the field is optional here.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: i64,
    login: String,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

impl GithubProvider {
    pub fn new(config: &GithubConfig) -> Result<Self, anyhow::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            // GitHub's API rejects requests without a user agent
            .user_agent("identity-service")
            .build()?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token_url: config.token_url.clone(),
            api_base_url: config.api_base_url.clone(),
        })
    }

    /// Map a transport-level failure. Timeouts and connection errors are
    /// upstream failures, never credential rejections.
    fn transport_error(e: reqwest::Error) -> AuthError {
        AuthError::ProviderUnavailable(e.to_string())
    }

    /// Map a non-success status: a provider 5xx is an upstream failure,
    /// anything else means the credential was rejected.
    fn status_error(status: StatusCode) -> AuthError {
        if status.is_server_error() {
            AuthError::ProviderUnavailable(format!("provider returned {}", status))
        } else {
            AuthError::ProviderRejected(format!("provider returned {}", status))
        }
    }
}

#[async_trait]
impl IdentityProvider for GithubProvider {
    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let response = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&AccessTokenRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                code,
            })
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }

        let body: AccessTokenResponse = response.json().await.map_err(Self::transport_error)?;

        body.access_token.ok_or_else(|| {
            AuthError::ProviderRejected("authorization code was not accepted".to_string())
        })
    }

    async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity, AuthError> {
        let user_response = self
            .http
            .get(format!("{}/user", self.api_base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = user_response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }

        let user: GithubUser = user_response.json().await.map_err(Self::transport_error)?;

        let emails_response = self
            .http
            .get(format!("{}/user/emails", self.api_base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = emails_response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }

        let emails: Vec<GithubEmail> =
            emails_response.json().await.map_err(Self::transport_error)?;

        let primary = emails
            .into_iter()
            .find(|e| e.primary && e.verified)
            .ok_or_else(|| {
                AuthError::ProviderRejected(
                    "account has no primary verified email".to_string(),
                )
            })?;

        Ok(ProviderIdentity {
            id: user.id,
            login: user.login,
            email: primary.email,
        })
    }
}
