use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserView;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<GetUserResponseData>, ApiError> {
    let username = Username::new(&username).map_err(UserError::from)?;

    state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(ApiError::from)
        .map(|user| {
            ApiSuccess::new(
                StatusCode::OK,
                "User Fetched Successfully",
                GetUserResponseData::from(user),
            )
        })
}

/// Public user fields; the password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUserResponseData {
    pub id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserView> for GetUserResponseData {
    fn from(user: UserView) -> Self {
        Self {
            id: user.id.to_string(),
            user_name: user.username.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
