//! Configuration module for the temple CMS backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! The media host URL is the one mandatory value; startup fails without it.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Admin token gating all mutating endpoints (auth disabled when unset)
    pub admin_token: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Base URL of the media upload host
    pub media_base_url: String,
    /// Bearer credential for the media host
    pub media_api_key: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Returns an error if `MANDIR_MEDIA_URL` is absent; nothing in the
    /// system works without a media host to upload to.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let admin_token = env::var("MANDIR_ADMIN_TOKEN").ok();

        let db_path = env::var("MANDIR_DB_PATH")
            .unwrap_or_else(|_| "./data/mandir.sqlite".to_string())
            .into();

        let media_base_url =
            env::var("MANDIR_MEDIA_URL").map_err(|_| "Missing MANDIR_MEDIA_URL".to_string())?;

        let media_api_key = env::var("MANDIR_MEDIA_API_KEY").ok();

        let bind_addr = env::var("MANDIR_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|_| "Invalid MANDIR_BIND_ADDR format".to_string())?;

        let log_level = env::var("MANDIR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            admin_token,
            db_path,
            media_base_url,
            media_api_key,
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("MANDIR_ADMIN_TOKEN");
        env::remove_var("MANDIR_DB_PATH");
        env::remove_var("MANDIR_MEDIA_API_KEY");
        env::remove_var("MANDIR_BIND_ADDR");
        env::remove_var("MANDIR_LOG_LEVEL");
        env::set_var("MANDIR_MEDIA_URL", "http://media.local");

        let config = Config::from_env().expect("config should load");

        assert!(config.admin_token.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/mandir.sqlite"));
        assert_eq!(config.media_base_url, "http://media.local");
        assert!(config.media_api_key.is_none());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }
}
