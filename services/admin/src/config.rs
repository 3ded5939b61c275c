//! Service configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config/admin.{toml,yaml,json}` file, then `ADMIN_*` environment variables
//! (nested keys separated by `__`, e.g. `ADMIN_SERVER__PORT`). The database
//! URL and pool sizing come from `common::database::DatabaseConfig`.

use serde::Deserialize;

/// Which persistence backend the service runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub server: ServerConfig,
    pub storage: StorageKind,
    #[serde(default)]
    pub auth: AuthConfig,
    pub database: DatabaseSettings,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Token verification settings; one of the two keys must be present
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Shared secret for HS256 tokens
    pub jwt_secret: Option<String>,
    /// RS256 public key, PEM text or a path to a PEM file
    pub jwt_public_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub run_migrations: bool,
}

impl AdminConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("storage", "postgres")?
            .set_default("log_level", "info")?
            .set_default("database.run_migrations", false)?
            .add_source(config::File::with_name("config/admin").required(false))
            .add_source(
                config::Environment::with_prefix("ADMIN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "ADMIN_SERVER__PORT",
        "ADMIN_STORAGE",
        "ADMIN_AUTH__JWT_SECRET",
        "ADMIN_DATABASE__RUN_MIGRATIONS",
        "ADMIN_LOG_LEVEL",
    ];

    fn clear_env() {
        unsafe {
            for var in VARS {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = AdminConfig::load().unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage, StorageKind::Postgres);
        assert_eq!(config.log_level, "info");
        assert!(!config.database.run_migrations);
        assert!(config.auth.jwt_secret.is_none());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        unsafe {
            std::env::set_var("ADMIN_SERVER__PORT", "8088");
            std::env::set_var("ADMIN_STORAGE", "memory");
            std::env::set_var("ADMIN_AUTH__JWT_SECRET", "s3cret");
            std::env::set_var("ADMIN_DATABASE__RUN_MIGRATIONS", "true");
            std::env::set_var("ADMIN_LOG_LEVEL", "debug");
        }

        let config = AdminConfig::load().unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8088");
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.auth.jwt_secret.as_deref(), Some("s3cret"));
        assert!(config.database.run_migrations);
        assert_eq!(config.log_level, "debug");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_storage_is_rejected() {
        clear_env();
        unsafe {
            std::env::set_var("ADMIN_STORAGE", "sqlite");
        }

        assert!(AdminConfig::load().is_err());

        clear_env();
    }
}
