use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterUserRequestBody>,
) -> Result<ApiSuccess<RegisterUserResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|user_id| {
            ApiSuccess::new(
                StatusCode::OK,
                "User Registered Successfully",
                RegisterUserResponseData::from(user_id),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequestBody {
    user_name: String,
    password: String,
}

impl RegisterUserRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let username = Username::new(&self.user_name)?;
        Ok(RegisterUserCommand::new(username, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserResponseData {
    pub user_id: String,
}

impl From<UserId> for RegisterUserResponseData {
    fn from(user_id: UserId) -> Self {
        Self {
            user_id: user_id.to_string(),
        }
    }
}
