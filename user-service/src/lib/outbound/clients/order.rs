use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::Url;

use crate::config::BasicAuthConfig;
use crate::config::OrderServiceConfig;
use crate::domain::user::models::Order;
use crate::domain::user::models::Username;
use crate::domain::user::ports::OrderClient;
use crate::user::errors::OrderError;

/// Order service client over HTTP.
///
/// Calls `GET {base_url}/order/{username}`, with Basic credentials when
/// configured.
pub struct HttpOrderClient {
    client: Client,
    base_url: Url,
    credentials: Option<BasicAuthConfig>,
}

impl HttpOrderClient {
    pub fn new(
        config: &OrderServiceConfig,
        credentials: Option<BasicAuthConfig>,
    ) -> Result<Self, OrderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| OrderError::RequestFailed(e.to_string()))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| OrderError::RequestFailed(format!("Invalid base url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(OrderError::RequestFailed(format!(
                "Invalid base url: {}",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Username goes in as a single, percent-encoded path segment.
    fn order_url(&self, username: &Username) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("order")
                .push(username.as_str());
        }
        url
    }
}

#[async_trait]
impl OrderClient for HttpOrderClient {
    async fn fetch_order(&self, username: &Username) -> Result<Order, OrderError> {
        let url = self.order_url(username);
        tracing::debug!(url = %url, "Requesting order");

        let mut request = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| OrderError::RequestFailed(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(OrderError::UnexpectedStatus(response.status().as_u16()));
        }

        response
            .json::<Order>()
            .await
            .map_err(|e| OrderError::InvalidResponse(e.to_string()))
    }
}
