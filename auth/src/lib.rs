//! Authentication utilities library
//!
//! Provides the authentication core for the user management service:
//! - Password hashing (Argon2id)
//! - Access token issuance and verification (HS256 JWT)
//! - Authentication coordination
//!
//! None of these types log or retry. They return typed errors and leave the
//! HTTP status and wording to the caller.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenConfig, TokenIssuer, TokenVerifier};
//! use chrono::Utc;
//!
//! let config = TokenConfig::new("secret_key_at_least_32_bytes_long!", 30);
//! let token = TokenIssuer::new(config.clone()).issue("user123", Utc::now()).unwrap();
//!
//! let verifier = TokenVerifier::new(config);
//! assert!(verifier.validate(&format!("Bearer {}", token)).is_ok());
//! assert_eq!(verifier.claims(&token).unwrap().sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenConfig};
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(TokenConfig::new("secret_key_at_least_32_bytes_long!", 30));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "user123", Utc::now()).unwrap();
//!
//! // Validate token
//! assert!(auth.validate_token(&result.access_token).is_ok());
//! ```

pub mod authenticator;
pub mod config;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::TokenConfig;
pub use jwt::AuthError;
pub use jwt::Claims;
pub use jwt::ConfigError;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
