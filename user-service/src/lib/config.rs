use std::env;

use auth::TokenConfig;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Flat variable names accepted on top of the `SECTION__KEY` form.
const ENV_ALIASES: [(&str, &str); 7] = [
    ("JWT_SECRET_KEY", "jwt.secret"),
    ("JWT_EXPIRATION_TIME", "jwt.expiration_minutes"),
    ("SERVICE_PORT", "server.http_port"),
    ("DATABASE_URL", "database.url"),
    ("BASIC_AUTH_USER", "basic_auth.username"),
    ("BASIC_AUTH_PASSWORD", "basic_auth.password"),
    ("ORDER_SERVICE_URL", "order_service.base_url"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: TokenConfig,
    #[serde(default)]
    pub basic_auth: Option<BasicAuthConfig>,
    pub order_service: OrderServiceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string, or `memory` for the in-process store
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Credentials guarding the credential routes and sent to the order service.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OrderServiceConfig {
    pub base_url: String,
    #[serde(default = "default_order_timeout")]
    pub timeout_seconds: u64,
}

fn default_order_timeout() -> u64 {
    25
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat environment variables (JWT_SECRET_KEY, JWT_EXPIRATION_TIME, ...)
    /// 2. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        // Layer on environment variables (with __ as separator)
        // Example: DATABASE__URL=postgres://... overrides database.url
        let mut builder =
            file_sources(&run_mode).add_source(Environment::with_prefix("").separator("__"));

        // Blank flat variables count as unset
        for (variable, key) in ENV_ALIASES {
            let value = env::var(variable).ok().filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config: Config = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database.url == "memory"
    }
}

/// `config/default` with `config/{run_mode}` on top. Both files are optional.
fn file_sources(run_mode: &str) -> ConfigBuilder<DefaultState> {
    ::config::Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Config {
        ::config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_optional_sections_default() {
        let config = from_toml(
            r#"
            [database]
            url = "memory"

            [server]
            http_port = 8080

            [order_service]
            base_url = "http://localhost:8081"
            "#,
        );

        assert!(config.uses_memory_store());
        assert!(config.basic_auth.is_none());
        assert!(config.jwt.secret().is_err());
        assert_eq!(config.jwt.issuer, "user-management-service");
        assert_eq!(config.order_service.timeout_seconds, 25);
    }

    #[test]
    fn test_flat_override_reaches_nested_key() {
        let config: Config = ::config::Config::builder()
            .add_source(File::from_str(
                r#"
                [database]
                url = "postgresql://localhost/users"

                [server]
                http_port = 8080

                [order_service]
                base_url = "http://localhost:8081"
                "#,
                FileFormat::Toml,
            ))
            .set_override_option("jwt.secret", Some("from-env"))
            .unwrap()
            .set_override_option("jwt.expiration_minutes", Some("15"))
            .unwrap()
            .set_override_option("basic_auth.username", Some("svc"))
            .unwrap()
            .set_override_option("basic_auth.password", Some("pw"))
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(!config.uses_memory_store());
        assert_eq!(config.jwt.secret().unwrap(), b"from-env");
        assert_eq!(config.jwt.expiration_minutes().unwrap(), 15);
        assert_eq!(
            config.basic_auth,
            Some(BasicAuthConfig {
                username: "svc".to_string(),
                password: "pw".to_string(),
            })
        );
    }

    fn with_expiration(value: &str) -> Config {
        ::config::Config::builder()
            .add_source(File::from_str(
                r#"
                [database]
                url = "memory"

                [server]
                http_port = 8080

                [jwt]
                secret = "s"

                [order_service]
                base_url = "http://localhost:8081"
                "#,
                FileFormat::Toml,
            ))
            .set_override_option("jwt.expiration_minutes", Some(value))
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_unusable_expiration_still_loads() {
        for value in ["", "   ", "soon", "15m"] {
            let config = with_expiration(value);

            assert_eq!(
                config.jwt.expiration_minutes(),
                Err(auth::ConfigError::ExpirationNotSet),
                "value {:?}",
                value
            );
            assert!(config.jwt.secret().is_ok());
        }

        assert_eq!(with_expiration(" 30 ").jwt.expiration_minutes(), Ok(30));
    }

    #[test]
    fn test_test_mode_files() {
        let config: Config = file_sources("test")
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.uses_memory_store());
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(
            config.jwt.secret().unwrap(),
            b"test-secret-key-for-jwt-signing-at-least-32-bytes"
        );
        assert_eq!(config.jwt.expiration_minutes(), Ok(5));
        assert_eq!(config.jwt.issuer, "user-management-service");
    }
}
