use thiserror::Error;

/// Token configuration is incomplete.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("jwt secret not set")]
    SecretNotSet,

    #[error("jwt expiration time not set")]
    ExpirationNotSet,

    #[error("jwt expiration time out of range: {0} minutes")]
    ExpirationOutOfRange(i64),
}

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

/// Error type for token verification.
///
/// Display strings are part of the HTTP contract: the auth gate returns them
/// verbatim as the `message` of a 401 response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unauthorized")]
    MissingToken,

    #[error("jwt secret not set")]
    SecretNotSet,

    #[error("token error: {0}")]
    Token(String),

    #[error("invalid token")]
    InvalidToken,
}
