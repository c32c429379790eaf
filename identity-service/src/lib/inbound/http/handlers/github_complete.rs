use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Complete a federated login: fetch the GitHub identity behind the
/// provider access token and log in or create the matching account.
pub async fn github_complete(
    State(state): State<AppState>,
    Json(body): Json<FederatedLoginRequestBody>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    state
        .auth_service
        .federated_login(&body.provider_access_token)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FederatedLoginRequestBody {
    provider_access_token: String,
}
