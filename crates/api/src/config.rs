/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development next to the
/// dashboard. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). Must exceed the AI
    /// provider timeout so upstream failures surface as 502, not 408.
    pub request_timeout_secs: u64,
    /// SQLite connection string for the ticket store.
    pub database_url: String,
    /// Path of the persisted board document.
    pub boards_file: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `8000`                               |
    /// | `CORS_ORIGINS`         | `http://localhost:8501`              |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                                 |
    /// | `DATABASE_URL`         | `sqlite://scrumboard.db?mode=rwc`    |
    /// | `BOARDS_FILE`          | `boards_data.json`                   |
    ///
    /// Panics on unparsable numeric values; misconfiguration fails fast.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8501".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://scrumboard.db?mode=rwc".into());

        let boards_file =
            std::env::var("BOARDS_FILE").unwrap_or_else(|_| "boards_data.json".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            boards_file,
        }
    }
}
