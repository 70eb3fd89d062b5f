//! Configuration module for the dashboard client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

use reqwest::Url;

use crate::errors::{ClientError, ClientResult};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API
    pub api_base_url: Url,
    /// Path to the JSON file backing local storage
    pub storage_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit log lines as JSON
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();

        let raw_url =
            env::var("DASHBOARD_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let api_base_url = Url::parse(&raw_url)
            .map_err(|e| ClientError::Config(format!("Invalid DASHBOARD_API_URL: {}", e)))?;

        let storage_path = env::var("DASHBOARD_STORAGE_PATH")
            .unwrap_or_else(|_| "./data/local_storage.json".to_string())
            .into();

        let log_level = env::var("DASHBOARD_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        let log_json = env::var("DASHBOARD_LOG_JSON")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            api_base_url,
            storage_path,
            log_level,
            log_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases live in one test so they never race on the process environment.
    #[test]
    fn test_config_from_env() {
        env::remove_var("DASHBOARD_API_URL");
        env::remove_var("DASHBOARD_STORAGE_PATH");
        env::remove_var("DASHBOARD_LOG_LEVEL");
        env::remove_var("DASHBOARD_LOG_JSON");

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/");
        assert_eq!(
            config.storage_path,
            PathBuf::from("./data/local_storage.json")
        );
        assert_eq!(config.log_level, "warn");
        assert!(!config.log_json);

        env::set_var("DASHBOARD_API_URL", "not a url");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        env::remove_var("DASHBOARD_API_URL");
    }
}
