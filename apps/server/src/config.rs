//! Configuration loading and validation
//!
//! Settings come from an optional TOML file plus `STAYKIT__`-prefixed
//! environment variables (double underscore as section separator, e.g.
//! `STAYKIT__DATABASE__URL`). A `.env` file is honored in development.

use config::{Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; empty means no CORS headers are emitted.
    pub cors_origins: Vec<String>,
    /// Upper bound on request bodies. Hotel uploads carry up to six 5 MB
    /// images plus form fields.
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,
    pub cookie_name: String,
    pub token_ttl_seconds: i64,
    /// Mark the session cookie `Secure` (set in production deployments).
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of: daily, hourly, minutely, never.
    pub file_rotation: String,
    pub service_name: String,
    pub deployment_environment: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Cloudinary-style cloud name; the upload URL is derived from it.
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub http_timeout_seconds: u64,
    pub max_files: usize,
    pub max_file_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7000,
            cors_origins: Vec::new(),
            max_request_body_size: 40 * 1024 * 1024,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/staykit".to_string(),
            max_connections: 10,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            cookie_name: "auth_token".to_string(),
            token_ttl_seconds: 86_400,
            secure_cookies: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "staykit".to_string(),
            file_rotation: "daily".to_string(),
            service_name: "staykit-server".to_string(),
            deployment_environment: "development".to_string(),
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            http_timeout_seconds: 30,
            max_files: 6,
            max_file_size: 5 * 1024 * 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// The file path comes from `STAYKIT_CONFIG` (default `config/default`)
    /// and is optional; environment variables always win.
    pub fn load() -> anyhow::Result<Self> {
        // Best effort: a missing .env file is fine.
        dotenvy::dotenv().ok();

        let config_path =
            std::env::var("STAYKIT_CONFIG").unwrap_or_else(|_| "config/default".to_string());

        let settings = config::Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(
                Environment::with_prefix("STAYKIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Reject configurations that cannot possibly serve requests.
    pub fn validate(&self) -> Result<(), String> {
        if self.auth.jwt_secret.is_empty() {
            return Err("auth.jwt_secret must be set".to_string());
        }
        if self.auth.token_ttl_seconds <= 0 {
            return Err("auth.token_ttl_seconds must be positive".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string());
        }
        if self.images.max_files == 0 {
            return Err("images.max_files must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address '{addr}': {e}"))
    }
}

impl ImagesConfig {
    pub fn configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }

    pub fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_without_secret() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_with_secret_validates() {
        let mut config = Config::default();
        config.auth.jwt_secret = "test-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 7000;
        assert_eq!(
            config.socket_addr().unwrap().to_string(),
            "127.0.0.1:7000"
        );
    }

    #[test]
    fn upload_url_derives_from_cloud_name() {
        let mut images = ImagesConfig::default();
        images.cloud_name = "demo".to_string();
        assert_eq!(
            images.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }
}
