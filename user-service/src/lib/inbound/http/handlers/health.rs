use axum::http::StatusCode;

use super::ApiSuccess;

pub async fn health() -> ApiSuccess<()> {
    ApiSuccess::message(StatusCode::OK, "User Management Service v2.0 is up and running")
}
