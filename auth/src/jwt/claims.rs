use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::ConfigError;

/// Identity provider recorded in every issued token.
pub const PROVIDER: &str = "local";

/// Login connection recorded in every issued token.
pub const CONNECTION: &str = "password";

/// Claims carried by an access token.
///
/// The field list is fixed and every issued token carries all of it. On
/// decode only `sub` and `exp` are required; unknown claims are ignored and
/// the other known ones fall back to empty values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issuer
    #[serde(default)]
    pub iss: String,

    /// Audience
    #[serde(default)]
    pub aud: String,

    /// Session identifier, random per token
    #[serde(default)]
    pub sid: String,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Time the credentials were checked (Unix timestamp)
    #[serde(default)]
    pub auth_time: i64,

    /// Identity provider
    #[serde(default)]
    pub provider: String,

    /// Login connection
    #[serde(default)]
    pub connection: String,
}

impl Claims {
    /// Build the claim set for a freshly authenticated subject.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `issued_at` - Baseline for the `iat` claim
    /// * `now` - Authentication time; expiry counts from here
    /// * `lifetime_minutes` - Minutes until the token expires
    /// * `issuer` - Value of `iss`
    /// * `audience` - Value of `aud`
    ///
    /// # Errors
    /// * `ExpirationOutOfRange` - `now` plus the lifetime is not a valid time
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        now: DateTime<Utc>,
        lifetime_minutes: i64,
        issuer: impl ToString,
        audience: impl ToString,
    ) -> Result<Self, ConfigError> {
        let expiration = TimeDelta::try_minutes(lifetime_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(ConfigError::ExpirationOutOfRange(lifetime_minutes))?;

        Ok(Self {
            sub: subject.to_string(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            sid: Uuid::new_v4().simple().to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            auth_time: now.timestamp(),
            provider: PROVIDER.to_string(),
            connection: CONNECTION.to_string(),
        })
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
