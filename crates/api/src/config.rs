use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// SQLite connection URL.
    pub database_url: String,
    /// Root of the `teams/<team>/players/<player>/vods/` tree.
    pub storage_root: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Period of the background re-scan. `None` disables it.
    pub scan_interval_secs: Option<u64>,
    /// When set, an `admin` account is seeded at startup if missing.
    pub bootstrap_admin_password: Option<String>,
    /// JWT signing configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                          |
    /// |----------------------------|----------------------------------|
    /// | `HOST`                     | `0.0.0.0`                        |
    /// | `PORT`                     | `8000`                           |
    /// | `DATABASE_URL`             | `sqlite://db/vfe.sqlite?mode=rwc`|
    /// | `STORAGE_ROOT`             | `storage`                        |
    /// | `CORS_ORIGINS`             | `http://localhost:8000`          |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                             |
    /// | `SCAN_INTERVAL_SECS`       | unset (disabled)                 |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://db/vfe.sqlite?mode=rwc".into());

        let storage_root =
            PathBuf::from(std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage".into()));

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let scan_interval_secs = std::env::var("SCAN_INTERVAL_SECS")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .expect("SCAN_INTERVAL_SECS must be a valid u64")
            })
            .filter(|secs| *secs > 0);

        let bootstrap_admin_password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD")
            .ok()
            .filter(|v| !v.is_empty());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            database_url,
            storage_root,
            cors_origins,
            request_timeout_secs,
            scan_interval_secs,
            bootstrap_admin_password,
            jwt,
        }
    }
}
