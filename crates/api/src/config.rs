/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. `DATABASE_URL`
/// is read separately by the binary since it has no sensible default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time in-flight requests get to finish after a shutdown signal
    /// (default: `5`).
    pub shutdown_grace_secs: u64,
    /// How long startup waits for the database (default: `30`).
    pub db_connect_timeout_secs: u64,
    /// Delay between database connection attempts (default: `2`).
    pub db_retry_interval_secs: u64,
    /// Breed catalog endpoint.
    pub breed_catalog_url: String,
    /// Breed catalog request timeout in seconds (default: `5`).
    pub breed_catalog_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                               |
    /// |------------------------------|---------------------------------------|
    /// | `HOST`                       | `0.0.0.0`                             |
    /// | `PORT`                       | `8080`                                |
    /// | `CORS_ORIGINS`               | `http://localhost:3000`               |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                                  |
    /// | `SHUTDOWN_GRACE_SECS`        | `5`                                   |
    /// | `DB_CONNECT_TIMEOUT_SECS`    | `30`                                  |
    /// | `DB_RETRY_INTERVAL_SECS`     | `2`                                   |
    /// | `BREED_CATALOG_URL`          | `https://api.thecatapi.com/v1/breeds` |
    /// | `BREED_CATALOG_TIMEOUT_SECS` | `5`                                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let breed_catalog_url = std::env::var("BREED_CATALOG_URL")
            .unwrap_or_else(|_| spycat_breeds::DEFAULT_CATALOG_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: secs_from_env("REQUEST_TIMEOUT_SECS", 30),
            shutdown_grace_secs: secs_from_env("SHUTDOWN_GRACE_SECS", 5),
            db_connect_timeout_secs: secs_from_env("DB_CONNECT_TIMEOUT_SECS", 30),
            db_retry_interval_secs: secs_from_env("DB_RETRY_INTERVAL_SECS", 2),
            breed_catalog_url,
            breed_catalog_timeout_secs: secs_from_env("BREED_CATALOG_TIMEOUT_SECS", 5),
        }
    }
}

fn secs_from_env(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid u64")),
        Err(_) => default,
    }
}
