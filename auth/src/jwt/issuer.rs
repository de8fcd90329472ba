use chrono::DateTime;
use chrono::Utc;

use super::claims::Claims;
use super::errors::TokenError;
use super::handler::JwtHandler;
use crate::config::TokenConfig;

/// Builds and signs access tokens.
pub struct TokenIssuer {
    config: TokenConfig,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Issue a token for `subject`, using `issued_at` as the `iat` baseline.
    ///
    /// Expiry counts from the current time, not from `issued_at`.
    ///
    /// # Errors
    /// * `Config` - Secret or expiration is not configured, or the
    ///   expiration is too large to represent
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        self.issue_at(subject, issued_at, Utc::now())
    }

    /// Same as [`issue`](Self::issue) with an explicit clock.
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let secret = self.config.secret()?;
        let lifetime_minutes = self.config.expiration_minutes()?;

        let claims = Claims::for_subject(
            subject,
            issued_at,
            now,
            lifetime_minutes,
            &self.config.issuer,
            &self.config.audience,
        )?;

        JwtHandler::new(secret).encode(&claims)
    }
}
