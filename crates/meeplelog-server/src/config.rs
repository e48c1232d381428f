//! Application configuration.
//!
//! Loaded once at startup from a TOML file with serde-level defaults for
//! every field, then overridden by a small set of environment variables so
//! secrets stay out of the file. No component reads configuration from
//! anywhere else.

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use meeplelog_auth::AuthConfig;
use meeplelog_db_postgres::PostgresConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Token issuance, verification, and account retention.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Redis session store; gracefully degrades to in-memory when disabled.
    #[serde(default)]
    pub redis: RedisConfig,
    /// PostgreSQL persistence; in-memory storage is used when disabled.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Outbound mail for recovery links.
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Initial admin user created at startup if missing.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Public base URL used in recovery links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Minutes between retention sweep runs.
    #[serde(default = "default_sweep_interval_minutes")]
    pub sweep_interval_minutes: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_sweep_interval_minutes() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: default_public_base_url(),
            sweep_interval_minutes: default_sweep_interval_minutes(),
        }
    }
}

impl ServerConfig {
    /// Bind address for the listener.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| format!("server.host: {e}"))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Redis configuration for the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Enable Redis. Disabled means the in-memory store, which is fine for
    /// a single instance but loses sessions on restart.
    #[serde(default)]
    pub enabled: bool,

    /// Redis connection URL (e.g., "redis://localhost:6379").
    #[serde(default = "default_redis_url")]
    pub url: String,

    /// Connection pool size.
    #[serde(default = "default_redis_pool_size")]
    pub pool_size: usize,
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_redis_pool_size() -> usize {
    10
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_redis_url(),
            pool_size: default_redis_pool_size(),
        }
    }
}

/// Relational persistence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Enable PostgreSQL. Disabled means in-memory storage.
    #[serde(default)]
    pub enabled: bool,

    #[serde(flatten)]
    pub postgres: PostgresConfig,
}

/// Outbound mail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Enable SMTP delivery. Disabled means recovery links are logged.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_username: Option<String>,

    #[serde(default)]
    pub smtp_password: Option<String>,

    #[serde(default = "default_email_from")]
    pub from: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_email_from() -> String {
    "meeplelog <noreply@meeplelog.local>".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            from: default_email_from(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Initial admin account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub admin_name: Option<String>,

    #[serde(default)]
    pub admin_email: Option<String>,

    #[serde(default)]
    pub admin_password: Option<String>,
}

impl AppConfig {
    /// Validates the whole configuration tree.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        self.server.socket_addr()?;
        self.auth.validate()?;

        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }

        if self.server.sweep_interval_minutes == 0 {
            return Err("server.sweep_interval_minutes must be > 0".into());
        }
        Ok(())
    }
}

/// Loads configuration from an optional TOML file, then applies
/// environment overrides.
///
/// Recognized environment variables: `MEEPLELOG_SECRET_KEY`,
/// `MEEPLELOG_DATABASE_URL`, `MEEPLELOG_REDIS_URL`.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
    let mut config: AppConfig = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read config file {path}: {e}"))?;
            toml::from_str(&raw).map_err(|e| format!("cannot parse {path}: {e}"))?
        }
        None => AppConfig::default(),
    };

    if let Ok(secret) = std::env::var("MEEPLELOG_SECRET_KEY") {
        config.auth.secret_key = secret;
    }
    if let Ok(url) = std::env::var("MEEPLELOG_DATABASE_URL") {
        config.database.postgres.url = url;
    }
    if let Ok(url) = std::env::var("MEEPLELOG_REDIS_URL") {
        config.redis.url = url;
    }

    config.validate()?;
    Ok(config)
}
