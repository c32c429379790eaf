use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange the authorization code GitHub redirected back with for a
/// provider access token.
pub async fn github_exchange(
    State(state): State<AppState>,
    Query(params): Query<ExchangeCodeParams>,
) -> Result<ApiSuccess<ExchangeCodeResponseData>, ApiError> {
    state
        .auth_service
        .exchange_code(&params.code)
        .await
        .map_err(ApiError::from)
        .map(|provider_access_token| {
            ApiSuccess::new(
                StatusCode::OK,
                ExchangeCodeResponseData {
                    provider_access_token,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExchangeCodeParams {
    code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeCodeResponseData {
    pub provider_access_token: String,
}
