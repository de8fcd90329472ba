use chrono::Utc;

use super::claims::Claims;
use super::errors::AuthError;
use super::handler::JwtHandler;
use crate::config::TokenConfig;

const BEARER_PREFIX: &str = "Bearer ";

/// Validates access tokens against the configured secret.
pub struct TokenVerifier {
    config: TokenConfig,
}

impl TokenVerifier {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// True when a secret is configured and tokens can be checked at all.
    pub fn is_configured(&self) -> bool {
        self.config.secret().is_ok()
    }

    /// Validate a token, with or without a `Bearer ` prefix.
    ///
    /// # Errors
    /// * `SecretNotSet` - No secret configured
    /// * `Token` - Malformed token, bad signature or non-HMAC algorithm
    /// * `InvalidToken` - Signature holds but the token is expired
    pub fn validate(&self, token: &str) -> Result<(), AuthError> {
        self.claims(token).map(|_| ())
    }

    /// Validate a token and return its decoded claims.
    pub fn claims(&self, token: &str) -> Result<Claims, AuthError> {
        let secret = self
            .config
            .secret()
            .map_err(|_| AuthError::SecretNotSet)?;

        let token = strip_bearer(token);
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let handler = JwtHandler::new(secret);
        let claims = handler.decode(token)?;

        // jsonwebtoken accepts exp == now; tokens are only valid strictly before exp
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

fn strip_bearer(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim()
}
