use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::inbound::http::router::AppState;

/// Checks a token submitted in the body rather than the header.
pub async fn validate_token(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ValidateTokenRequestBody>,
) -> Result<ApiSuccess<ValidateTokenResponseData>, ApiError> {
    let claims = state
        .authenticator
        .claims(&body.token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Token is valid",
        ValidateTokenResponseData {
            subject: claims.sub.clone(),
            expires_at: claims.expires_at(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateTokenRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub subject: String,
    pub expires_at: Option<DateTime<Utc>>,
}
