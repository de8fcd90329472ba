use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;

use crate::config::BasicAuthConfig;
use crate::inbound::http::router::AppState;

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": message })),
    )
        .into_response()
}

/// Auth gate for protected routes.
///
/// Requires a valid token in the `Authorization` header, either as
/// `Bearer <token>` or bare. Fails closed when no signing secret is
/// configured. The request is forwarded unchanged on success.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Unauthorized"))?;

    if !state.authenticator.is_configured() {
        tracing::error!("JWT secret not configured, rejecting protected request");
        return Err(unauthorized("jwt secret not set"));
    }

    let token = header
        .to_str()
        .map_err(|_| unauthorized("Unauthorized"))?;

    state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        unauthorized(&e.to_string())
    })?;

    Ok(next.run(req).await)
}

/// Basic credential gate for the register, login and token check routes.
///
/// Open when no credentials are configured.
pub async fn basic_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(expected) = state.basic_auth.as_ref() else {
        return Ok(next.run(req).await);
    };

    let authorized = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| matches_basic_credentials(h, expected));

    if !authorized {
        tracing::warn!(uri = %req.uri(), "Basic authentication failed");
        return Err(unauthorized("Unauthorized"));
    }

    Ok(next.run(req).await)
}

fn matches_basic_credentials(header: &str, expected: &BasicAuthConfig) -> bool {
    let Some(encoded) = header.strip_prefix("Basic ") else {
        return false;
    };

    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };

    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };

    match decoded.split_once(':') {
        Some((username, password)) => {
            username == expected.username && password == expected.password
        }
        None => false,
    }
}
