use atreia_core::freshness::DEFAULT_CACHE_TTL_SECS;

/// Default seconds between automatic collector cycles.
pub const DEFAULT_COLLECTOR_INTERVAL_SECS: u64 = 300;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds to wait for background tasks after the listener closes.
    pub shutdown_timeout_secs: u64,
    /// Freshness window for cached characters (default: `300`).
    pub cache_ttl_secs: u64,
    /// Seconds between automatic collector cycles; `0` disables them.
    pub collector_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                       |
    /// | `CACHE_TTL_SECS`          | `300`                      |
    /// | `COLLECTOR_INTERVAL_SECS` | `300`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let cache_ttl_secs: u64 = std::env::var("CACHE_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_CACHE_TTL_SECS.to_string())
            .parse()
            .expect("CACHE_TTL_SECS must be a valid u64");

        let collector_interval_secs: u64 = std::env::var("COLLECTOR_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_COLLECTOR_INTERVAL_SECS.to_string())
            .parse()
            .expect("COLLECTOR_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            cache_ttl_secs,
            collector_interval_secs,
        }
    }
}
