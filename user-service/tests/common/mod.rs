use std::sync::Arc;

use auth::Authenticator;
use auth::TokenConfig;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde_json::json;
use user_service::config::BasicAuthConfig;
use user_service::config::OrderServiceConfig;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::clients::HttpOrderClient;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by the in-memory store
/// and a stub order service.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub basic_auth: Option<BasicAuthConfig>,
}

impl TestApp {
    /// Spawn with token settings and open credential routes
    pub async fn spawn() -> Self {
        Self::spawn_with(TokenConfig::new(JWT_SECRET, 5), None).await
    }

    /// Spawn with credential routes behind Basic auth
    pub async fn spawn_with_basic_auth(username: &str, password: &str) -> Self {
        let credentials = BasicAuthConfig {
            username: username.to_string(),
            password: password.to_string(),
        };
        Self::spawn_with(TokenConfig::new(JWT_SECRET, 5), Some(credentials)).await
    }

    pub async fn spawn_with(token_config: TokenConfig, basic_auth: Option<BasicAuthConfig>) -> Self {
        let order_service_url = spawn_order_service().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let order_client = Arc::new(
            HttpOrderClient::new(
                &OrderServiceConfig {
                    base_url: order_service_url,
                    timeout_seconds: 5,
                },
                basic_auth.clone(),
            )
            .expect("Failed to create order client"),
        );
        let authenticator = Arc::new(Authenticator::new(token_config));

        let user_service = Arc::new(UserService::new(
            user_repo,
            order_client,
            Arc::clone(&authenticator),
        ));

        let router = create_router(user_service, authenticator, basic_auth.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            basic_auth,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request, with Basic credentials when configured
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.api_client.post(format!("{}{}", self.address, path));
        match &self.basic_auth {
            Some(credentials) => request.basic_auth(&credentials.username, Some(&credentials.password)),
            None => request,
        }
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the raw response
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/user/register")
            .json(&json!({ "user_name": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in a user and return the raw response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/user/login")
            .json(&json!({ "user_name": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register, log in and return the issued token
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        self.register(username, password).await;
        let body: serde_json::Value = self
            .login(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Token missing")
            .to_string()
    }
}

/// Stub order service: `alice` has an order, `broken` makes it fail.
async fn spawn_order_service() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

    let router = Router::new().route(
        "/order/:username",
        get(|Path(username): Path<String>| async move {
            if username == "broken" {
                return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})));
            }
            (
                StatusCode::OK,
                Json(json!({
                    "order_id": format!("order-{}", username),
                    "product_name": "Keyboard",
                    "quantity": 2
                })),
            )
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Order stub error");
    });

    address
}
