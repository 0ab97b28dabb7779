use std::io;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_USER_SERVICE_PORT: u16 = 8081;
pub const DEFAULT_VIDEO_SERVICE_PORT: u16 = 8082;
pub const DEFAULT_USER_SERVICE_URL: &str = "http://user-service:8081";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "ServerConfig::user_service")]
    pub user_service: ServerConfig,
    #[serde(default = "ServerConfig::video_service")]
    pub video_service: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub downstream: DownstreamConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_service: ServerConfig::user_service(),
            video_service: ServerConfig::video_service(),
            database: DatabaseConfig::default(),
            downstream: DownstreamConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl ServerConfig {
    fn user_service() -> Self {
        Self { host: "0.0.0.0".into(), port: DEFAULT_USER_SERVICE_PORT, worker_threads: None }
    }

    fn video_service() -> Self {
        Self { host: "0.0.0.0".into(), port: DEFAULT_VIDEO_SERVICE_PORT, worker_threads: None }
    }

    /// `host:port` suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_run_migrations() -> bool { true }

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
            run_migrations: default_run_migrations(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownstreamConfig {
    #[serde(default = "default_user_service_url")]
    pub user_service_url: String,
}

fn default_user_service_url() -> String { DEFAULT_USER_SERVICE_URL.to_string() }

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self { user_service_url: default_user_service_url() }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content).with_context(|| format!("invalid config file {path}"))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), overlay environment variables and validate.
    /// A missing file is not an error; defaults plus environment are used instead.
    pub fn load_and_validate() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env_with(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from `lookup` (normally the process environment).
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("USER_SERVICE_HOST") {
            self.user_service.host = host;
        }
        if let Some(port) = lookup("USER_SERVICE_PORT") {
            self.user_service.port = parse_port("USER_SERVICE_PORT", &port)?;
        }
        if let Some(host) = lookup("VIDEO_SERVICE_HOST") {
            self.video_service.host = host;
        }
        if let Some(port) = lookup("VIDEO_SERVICE_PORT") {
            self.video_service.port = parse_port("VIDEO_SERVICE_PORT", &port)?;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.user_service.worker_threads.get_or_insert(w);
            self.video_service.worker_threads.get_or_insert(w);
        }
        if let Some(url) = lookup("USER_SERVICE_URL") {
            self.downstream.user_service_url = url;
        }
        // DATABASE_URL only fills the gap; an explicit TOML url wins
        if self.database.url.trim().is_empty() {
            if let Some(url) = lookup("DATABASE_URL") {
                self.database.url = url;
            }
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.user_service.normalize("user_service")?;
        self.video_service.normalize("video_service")?;
        self.downstream.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .map(|io| io.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}

fn parse_port(key: &str, raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| anyhow!("{key} must be a port number: {e}"))
}

impl ServerConfig {
    fn normalize(&mut self, section: &str) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("{section}.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Single-connection in-memory SQLite, used by tests and local runs.
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            ..Self::default()
        }
    }

    pub fn is_sqlite_memory(&self) -> bool {
        let lower = self.url.to_lowercase();
        lower.starts_with("sqlite::memory:") || lower.contains("mode=memory")
    }

    /// Only the user-service owns a database, so this is checked at its startup
    /// rather than in `normalize_and_validate`.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!(
                "database.url is empty; set it in config.toml or via DATABASE_URL"
            ));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://")
            || lower.starts_with("postgres://")
            || lower.starts_with("sqlite:"))
        {
            return Err(anyhow!(
                "database.url must start with postgres://, postgresql:// or sqlite:"
            ));
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

    pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }
    pub fn acquire_timeout(&self) -> Duration { Duration::from_secs(self.acquire_timeout_secs) }
    pub fn idle_timeout(&self) -> Duration { Duration::from_secs(self.idle_timeout_secs) }
    pub fn max_lifetime(&self) -> Duration { Duration::from_secs(self.max_lifetime_secs) }
}

impl DownstreamConfig {
    pub fn validate(&self) -> Result<()> {
        let lower = self.user_service_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!(
                "downstream.user_service_url must start with http:// or https://"
            ));
        }
        Ok(())
    }
}
