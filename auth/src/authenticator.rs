use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Utc;

use crate::config::TokenConfig;
use crate::jwt::AuthError;
use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing, token issuance
/// and token verification over one configuration.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    placeholder_hash: OnceLock<Option<String>>,
}

const PLACEHOLDER_PASSWORD: &str = "placeholder-password-for-unknown-accounts";

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Token settings; missing secret or expiry only fails the
    ///   operations that need them
    pub fn new(config: TokenConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(config.clone()),
            verifier: TokenVerifier::new(config),
            placeholder_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Token subject
    /// * `issued_at` - Baseline for the `iat` claim
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `TokenError` - Token configuration missing or signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issuer.issue(subject, issued_at)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Spend one password verification on an account that does not exist.
    ///
    /// Login for an unknown username calls this before failing so it costs
    /// about as much as a wrong password. The comparison hash is computed on
    /// first use and reused afterwards.
    pub fn verify_unknown_user(&self, password: &str) {
        let placeholder = self
            .placeholder_hash
            .get_or_init(|| self.password_hasher.hash(PLACEHOLDER_PASSWORD).ok());

        if let Some(hash) = placeholder {
            let _ = self.password_hasher.verify(password, hash);
        }
    }

    /// True when tokens can be verified at all.
    pub fn is_configured(&self) -> bool {
        self.verifier.is_configured()
    }

    /// Validate a token, with or without a `Bearer ` prefix.
    pub fn validate_token(&self, token: &str) -> Result<(), AuthError> {
        self.verifier.validate(token)
    }

    /// Validate a token and return its claims.
    pub fn claims(&self, token: &str) -> Result<Claims, AuthError> {
        self.verifier.claims(token)
    }
}
