use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
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
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: None }
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

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

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

/// Token verification mode.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthAlgorithm {
    /// Issuer-signed tokens, keys from `https://{domain}/.well-known/jwks.json`.
    #[default]
    Rs256,
    /// Shared secret; local development and tests.
    Hs256,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub algorithm: AuthAlgorithm,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_jwks_ttl")]
    pub jwks_ttl_secs: u64,
}

fn default_jwks_ttl() -> u64 { 3600 }

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            audience: String::new(),
            algorithm: AuthAlgorithm::default(),
            secret: None,
            jwks_ttl_secs: default_jwks_ttl(),
        }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to an
    /// env-only configuration when no file exists, then validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        // zero means unset; the launcher then asks TOKIO_WORKER_THREADS
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
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
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
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

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.domain.trim().is_empty() {
            if let Ok(d) = std::env::var("AUTH0_DOMAIN") { self.domain = d; }
        }
        if self.audience.trim().is_empty() {
            if let Ok(a) = std::env::var("API_AUDIENCE") { self.audience = a; }
        }
        if self.secret.is_none() {
            self.secret = std::env::var("JWT_SECRET").ok();
        }
        if let Ok(alg) = std::env::var("JWT_ALGORITHM") {
            match alg.to_ascii_lowercase().as_str() {
                "hs256" => self.algorithm = AuthAlgorithm::Hs256,
                "rs256" => self.algorithm = AuthAlgorithm::Rs256,
                _ => {}
            }
        }
    }

    /// `https://{domain}/`, the `iss` every accepted token must carry.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain.trim_end_matches('/'))
    }

    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain.trim_end_matches('/'))
    }

    /// Only the coffee-shop service needs this; trivia never calls it.
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(anyhow!("auth.domain is empty; set it in config.toml or AUTH0_DOMAIN"));
        }
        if self.audience.trim().is_empty() {
            return Err(anyhow!("auth.audience is empty; set it in config.toml or API_AUDIENCE"));
        }
        if self.algorithm == AuthAlgorithm::Hs256 && self.secret.as_deref().map_or(true, |s| s.is_empty()) {
            return Err(anyhow!("auth.secret is required for hs256"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "sqlite::memory:"

            [auth]
            domain = "coffee.eu.auth0.com"
            audience = "drinks"
            algorithm = "hs256"
            secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.auth.algorithm, AuthAlgorithm::Hs256);
        assert_eq!(cfg.auth.issuer(), "https://coffee.eu.auth0.com/");
        assert_eq!(cfg.auth.jwks_url(), "https://coffee.eu.auth0.com/.well-known/jwks.json");
        cfg.auth.validate().unwrap();
    }

    #[test]
    fn database_url_scheme_is_checked() {
        let mut db = DatabaseConfig { url: "mysql://x".into(), min_connections: 1, max_connections: 2, connect_timeout_secs: 1, acquire_timeout_secs: 1, ..Default::default() };
        assert!(db.validate().is_err());
        db.url = "postgres://u@localhost/trivia".into();
        assert!(db.validate().is_ok());
        db.url = "sqlite://data/coffee.db?mode=rwc".into();
        assert!(db.validate().is_ok());
    }

    #[test]
    fn pool_bounds_are_checked() {
        let db = DatabaseConfig { url: "sqlite::memory:".into(), min_connections: 5, max_connections: 2, connect_timeout_secs: 1, acquire_timeout_secs: 1, ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn env_only_config_has_usable_pool_defaults() {
        let db = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
        assert!(db.validate().is_ok());
        assert_eq!(AppConfig::default().server.port, 5000);
    }

    #[test]
    fn worker_threads_stay_unset_unless_configured() {
        let mut server = ServerConfig::default();
        server.normalize().unwrap();
        assert_eq!(server.worker_threads, None);

        server.worker_threads = Some(0);
        server.normalize().unwrap();
        assert_eq!(server.worker_threads, None);

        let cfg: AppConfig = toml::from_str("[server]\nhost = \"0.0.0.0\"\nport = 8080\nworker_threads = 2\n").unwrap();
        let mut server = cfg.server;
        server.normalize().unwrap();
        assert_eq!(server.worker_threads, Some(2));
    }

    #[test]
    fn hs256_requires_secret() {
        let auth = AuthConfig { domain: "d".into(), audience: "a".into(), algorithm: AuthAlgorithm::Hs256, secret: None, jwks_ttl_secs: 60 };
        assert!(auth.validate().is_err());
    }
}
