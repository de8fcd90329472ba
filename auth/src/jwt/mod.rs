pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use errors::AuthError;
pub use errors::ConfigError;
pub use errors::TokenError;
pub use handler::JwtHandler;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
