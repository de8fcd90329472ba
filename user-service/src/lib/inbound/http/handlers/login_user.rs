use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::INVALID_CREDENTIALS_MESSAGE;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

pub async fn login_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginUserRequestBody>,
) -> Result<ApiSuccess<LoginUserResponseData>, ApiError> {
    // A username that cannot exist fails like any other unknown user
    let username = Username::new(&body.user_name)
        .map_err(|_| ApiError::BadRequest(INVALID_CREDENTIALS_MESSAGE.to_string()))?;

    state
        .user_service
        .login(LoginUserCommand::new(username, body.password))
        .await
        .map_err(ApiError::from)
        .map(|token| {
            ApiSuccess::new(
                StatusCode::OK,
                "User Logged In Successfully",
                LoginUserResponseData { token },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginUserRequestBody {
    user_name: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserResponseData {
    pub token: String,
}
