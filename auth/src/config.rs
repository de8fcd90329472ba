use serde::Deserialize;
use serde::Deserializer;

use crate::jwt::ConfigError;

/// Token signing settings shared by the issuer and the verifier.
///
/// Secret and expiration stay optional at load time. Each token operation
/// checks them and refuses to run when they are absent, so a service can
/// start without them and still reject every token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Shared HMAC secret
    #[serde(default)]
    pub secret: Option<String>,

    /// Token lifetime in minutes. Blank or non-numeric values count as unset.
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub expiration_minutes: Option<i64>,

    /// Value of the `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Value of the `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

/// Environment overrides arrive as text, so both shapes are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMinutes {
    Number(i64),
    Text(String),
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawMinutes>::deserialize(deserializer)? {
        Some(RawMinutes::Number(minutes)) => Some(minutes),
        Some(RawMinutes::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

fn default_issuer() -> String {
    "user-management-service".to_string()
}

fn default_audience() -> String {
    "user-management-clients".to_string()
}

impl TokenConfig {
    /// Create a fully configured token config with default issuer and audience.
    pub fn new(secret: impl Into<String>, expiration_minutes: i64) -> Self {
        Self {
            secret: Some(secret.into()),
            expiration_minutes: Some(expiration_minutes),
            issuer: default_issuer(),
            audience: default_audience(),
        }
    }

    /// Configured secret bytes. An empty string counts as unset.
    pub fn secret(&self) -> Result<&[u8], ConfigError> {
        self.secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::as_bytes)
            .ok_or(ConfigError::SecretNotSet)
    }

    /// Configured token lifetime in minutes.
    pub fn expiration_minutes(&self) -> Result<i64, ConfigError> {
        self.expiration_minutes
            .ok_or(ConfigError::ExpirationNotSet)
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: None,
            expiration_minutes: None,
            issuer: default_issuer(),
            audience: default_audience(),
        }
    }
}
