//! # Configuration Management
//!
//! Configuration comes from the environment (optionally via a `.env` file).
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 4000)
//! - `DATABASE_URL`: SQLite connection string (default: `sqlite:snippetbox.db?mode=rwc`)
//! - `STATIC_DIR`: Directory served under `/static/` (default: `ui/static`)
//! - `SESSION_SECURE`: Mark the session cookie `Secure` (default: false)

use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// Shared by the data layer and the session store
    pub database_url: String,

    pub static_dir: PathBuf,

    /// Only enable when the server is reached over HTTPS, otherwise browsers drop the cookie
    pub session_secure: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing variables fall back to defaults; malformed `PORT` or `SESSION_SECURE` values are
    /// errors.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine.
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:snippetbox.db?mode=rwc".to_string()),
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "ui/static".to_string())
                .into(),
            session_secure: env::var("SESSION_SECURE")
                .ok()
                .map(|v| v.parse::<bool>())
                .transpose()?
                .unwrap_or(false),
        })
    }

    /// Socket address for `tokio::net::TcpListener::bind()`, e.g. "127.0.0.1:4000"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
