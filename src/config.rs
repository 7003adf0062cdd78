use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Database credentials and location, combined into a connection URL by
    /// [`Config::database_url`].
    pub db_username: String,
    pub db_password: String,
    pub db_host: String,
    pub db_name: String,

    /// Upper bound on pooled database connections
    pub max_db_connections: u32,

    /// Maximum payload size for all requests (in bytes)
    /// Default: 10MB (10 * 1024 * 1024)
    pub max_payload_size: usize,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Directory for rotated log files
    pub log_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required environment variables:
    /// - DB_USERNAME, DB_PASSWORD, DB_HOST, DB_DBNAME
    ///
    /// Optional environment variables:
    /// - MAX_DB_CONNECTIONS: pool size (default: 5)
    /// - MAX_PAYLOAD_SIZE: maximum request payload size in bytes (default: 10485760 = 10MB)
    /// - BIND_ADDR: listen address (default: 127.0.0.1:8080)
    /// - LOG_DIR: log file directory (default: logs)
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let db_username = require("DB_USERNAME")?;
        let db_password = require("DB_PASSWORD")?;
        let db_host = require("DB_HOST")?;
        let db_name = require("DB_DBNAME")?;

        let max_db_connections = env::var("MAX_DB_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let max_payload_size = env::var("MAX_PAYLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10 * 1024 * 1024); // Default: 10MB

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Ok(Config {
            db_username,
            db_password,
            db_host,
            db_name,
            max_db_connections,
            max_payload_size,
            bind_addr,
            log_dir,
        })
    }

    /// PostgreSQL connection string assembled from the credential parts.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}",
            self.db_username, self.db_password, self.db_host, self.db_name
        )
    }
}

fn require(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} must be set in .env file or environment", name))
}
