//! Configuration management for the quiz bank server

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes. Prevents DoS via large payloads.
    /// Default: 1 MB
    #[serde(default = "default_max_request_body_size")]
    pub max_request_body_size: usize,
    /// Per-request deadline enforced at the HTTP boundary. Default: 15s
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_pool_min_size")]
    pub pool_min_size: u32,
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
    #[serde(default = "default_pool_timeout")]
    pub pool_timeout_seconds: u64,
    /// Maximum lifetime of a pooled connection. Default: 300 (5 minutes)
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_seconds: u64,
    /// Maximum query execution time in seconds. Queries exceeding this are
    /// terminated by the server. Default: 30
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON formatting for logs (recommended for production)
    #[serde(default)]
    pub json: bool,

    /// Enable file logging in addition to console
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for log files (default: ./logs)
    #[serde(default = "default_log_directory")]
    pub file_directory: String,

    /// Log file prefix (default: quizbank)
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Serve the static admin page at `/`.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory holding the admin page assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_request_body_size() -> usize {
    1024 * 1024
}

fn default_request_timeout() -> u64 {
    15
}

fn default_database_url() -> String {
    "postgres://localhost:5432/quizbank".to_string()
}

fn default_pool_min_size() -> u32 {
    1
}

fn default_pool_max_size() -> u32 {
    25
}

fn default_pool_timeout() -> u64 {
    30
}

fn default_max_lifetime() -> u64 {
    300
}

fn default_statement_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "./logs".to_string()
}

fn default_log_file_prefix() -> String {
    "quizbank".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            // Start with defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default(
                "server.max_request_body_size",
                default_max_request_body_size() as i64,
            )?
            .set_default(
                "server.request_timeout_seconds",
                default_request_timeout() as i64,
            )?
            .set_default("database.url", default_database_url())?
            .set_default("database.pool_min_size", default_pool_min_size())?
            .set_default("database.pool_max_size", default_pool_max_size())?
            .set_default("database.pool_timeout_seconds", default_pool_timeout())?
            .set_default("database.max_lifetime_seconds", default_max_lifetime())?
            .set_default(
                "database.statement_timeout_seconds",
                default_statement_timeout(),
            )?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .set_default("logging.file_enabled", false)?
            .set_default("logging.file_directory", default_log_directory())?
            .set_default("logging.file_prefix", default_log_file_prefix())?
            .set_default("ui.enabled", default_true())?
            .set_default("ui.static_dir", default_static_dir())?
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            // Uses double underscore (__) to map to nested config structure
            // Example: QUIZ__DATABASE__URL → config.database.url
            // Arrays use comma separator: QUIZ__SERVER__CORS_ORIGINS=https://a.com,https://b.com
            .add_source(
                config::Environment::with_prefix("QUIZ")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;

        // Convenience escape hatch: allow DATABASE_URL to set `database.url` when no
        // explicit QUIZ__DATABASE__URL override is present.
        if std::env::var("QUIZ__DATABASE__URL").is_err() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                config.database.url = url;
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        Ok(addr.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database.pool_max_size == 0 {
            return Err("database.pool_max_size must be > 0".to_string());
        }
        if self.database.pool_min_size > self.database.pool_max_size {
            return Err("database.pool_min_size must be <= database.pool_max_size".to_string());
        }
        if self.server.request_timeout_seconds == 0 {
            return Err("server.request_timeout_seconds must be > 0".to_string());
        }
        if self.database.statement_timeout_seconds == 0 {
            return Err("database.statement_timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::load().expect("load default config");
        config.validate().expect("default config validates");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.pool_max_size, 25);
        assert_eq!(config.database.max_lifetime_seconds, 300);
        assert_eq!(config.server.request_timeout_seconds, 15);
        assert!(config.ui.enabled);
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let mut config = Config::load().expect("load default config");
        config.database.pool_min_size = 50;
        assert!(config.validate().is_err());
    }
}
