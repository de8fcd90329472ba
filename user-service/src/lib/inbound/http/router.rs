use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_order::get_order;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::login_user::login_user;
use super::handlers::register_user::register_user;
use super::handlers::validate_token::validate_token;
use super::middleware::authenticate as auth_middleware;
use super::middleware::basic_auth as basic_auth_middleware;
use crate::config::BasicAuthConfig;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub basic_auth: Option<BasicAuthConfig>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    authenticator: Arc<Authenticator>,
    basic_auth: Option<BasicAuthConfig>,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        basic_auth,
    };

    let public_routes = Router::new().route("/user/health", get(health));

    let credential_routes = Router::new()
        .route("/user/register", post(register_user))
        .route("/user/login", post(login_user))
        .route("/user/validate-token", post(validate_token))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_middleware,
        ));

    let protected_routes = Router::new()
        .route("/user/:username", get(get_user))
        .route("/user/:username/order", get(get_order))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(credential_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
