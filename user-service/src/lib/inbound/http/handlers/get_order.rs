use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Order;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_order(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<Order>, ApiError> {
    let username = Username::new(&username).map_err(UserError::from)?;

    state
        .user_service
        .get_order_by_username(&username)
        .await
        .map_err(ApiError::from)
        .map(|order| ApiSuccess::new(StatusCode::OK, "Order Fetched Successfully", order))
}
