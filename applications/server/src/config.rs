/// Server configuration
use crate::error::{Result, ServerError};
use crate::services::auth::MAX_TOKEN_LIFETIME_HOURS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Used when no secret is configured outside production
const DEVELOPMENT_JWT_SECRET: &str = "dev-secret-key-change-in-production";

/// Range bcrypt accepts for its work factor
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_cors")]
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_environment")]
    pub environment: Environment,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from an explicit file (or `config.toml` if it
    /// exists), then apply `COUNTDOWN_*` environment overrides
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with COUNTDOWN_)
        settings = settings.add_source(
            config::Environment::with_prefix("COUNTDOWN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins"),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration, filling in the development secret when allowed
    pub fn validate(&mut self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            match self.server.environment {
                Environment::Production => {
                    return Err(ServerError::Config(
                        "JWT secret is required in production (set COUNTDOWN_AUTH__JWT_SECRET)"
                            .to_string(),
                    ));
                }
                Environment::Development => {
                    tracing::warn!("No JWT secret configured, using the development secret");
                    self.auth.jwt_secret = DEVELOPMENT_JWT_SECRET.to_string();
                }
            }
        }

        if !BCRYPT_COST_RANGE.contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "bcrypt cost must be between {} and {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            )));
        }

        if !(1..=MAX_TOKEN_LIFETIME_HOURS).contains(&self.auth.jwt_expiration_hours) {
            return Err(ServerError::Config(format!(
                "JWT expiration must be between 1 and {} hours",
                MAX_TOKEN_LIFETIME_HOURS
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        environment: default_environment(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/countdown.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_cors() -> CorsSettings {
    CorsSettings {
        allowed_origins: default_allowed_origins(),
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            cors: default_cors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.auth.jwt_expiration_hours, 24);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn test_development_falls_back_to_dev_secret() {
        let mut config = ServerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.auth.jwt_secret, DEVELOPMENT_JWT_SECRET);
    }

    #[test]
    fn test_production_requires_secret() {
        let mut config = ServerConfig::default();
        config.server.environment = Environment::Production;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        config.auth.jwt_secret = "s3cret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_bcrypt_cost() {
        let mut config = ServerConfig::default();
        config.auth.bcrypt_cost = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_expiration() {
        let mut config = ServerConfig::default();
        config.auth.jwt_expiration_hours = 0;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        config.auth.jwt_expiration_hours = u64::MAX;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        config.auth.jwt_expiration_hours = MAX_TOKEN_LIFETIME_HOURS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countdown.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9000
environment = "production"

[auth]
jwt_secret = "from-file"
jwt_expiration_hours = 2
"#,
        )
        .unwrap();

        let config = ServerConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.environment, Environment::Production);
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.auth.jwt_expiration_hours, 2);
        assert_eq!(config.storage.database_url, "sqlite://./data/countdown.db");
    }
}
