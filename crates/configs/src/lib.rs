use std::io;

use anyhow::Result;
use serde::Deserialize;
use anyhow::{anyhow, Context};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8081, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Dashboard behaviour knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Artificial latency before serving revenue data. Zero disables it.
    #[serde(default)]
    pub revenue_delay_ms: u64,
    #[serde(default = "default_view_cache_capacity")]
    pub view_cache_capacity: u64,
    #[serde(default = "default_view_cache_ttl")]
    pub view_cache_ttl_secs: u64,
    /// Apply pending migrations before serving.
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            revenue_delay_ms: 0,
            view_cache_capacity: default_view_cache_capacity(),
            view_cache_ttl_secs: default_view_cache_ttl(),
            run_migrations: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_view_cache_capacity() -> u64 { 1000 }
fn default_view_cache_ttl() -> u64 { 60 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from file when present, otherwise from environment variables.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = Self::load_or_env(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Only a missing file falls back to the environment; unreadable or
    /// malformed files are errors.
    pub fn load_or_env(path: &str) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).with_context(|| format!("invalid config file {path}")),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::from_env()),
            Err(e) => Err(anyhow!(e).context(format!("failed to read config file {path}"))),
        }
    }

    /// Build a config purely from `SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`
    /// and `REVENUE_DELAY_MS`, keeping defaults for everything else.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(delay) = std::env::var("REVENUE_DELAY_MS").ok().and_then(|v| v.parse::<u64>().ok()) {
            cfg.dashboard.revenue_delay_ms = delay;
        }
        cfg.database = DatabaseConfig::from_env();
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.dashboard.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.normalize_from_env();
        cfg
    }

    pub fn normalize_from_env(&mut self) {
        // An empty URL in the file defers to DATABASE_URL
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl DashboardConfig {
    fn validate(&self) -> Result<()> {
        if self.view_cache_capacity == 0 {
            return Err(anyhow!("dashboard.view_cache_capacity must be >= 1"));
        }
        if self.view_cache_ttl_secs == 0 {
            return Err(anyhow!("dashboard.view_cache_ttl_secs must be >= 1"));
        }
        Ok(())
    }
}
