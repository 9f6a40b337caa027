use std::{env, path::PathBuf, time::Duration};

use crate::error::ConfigError;

/// Public host of the Gudang Grosiran backend.
pub const DEFAULT_API_URL: &str = "https://be.gudanggrosiran.com";

/// Path prefix under which every admin resource lives.
pub const ADMIN_API_PREFIX: &str = "/api/admin";

/// AppConfig
///
/// Holds the client's entire configuration. Loaded once at startup and cloned
/// into the components that need it (`ApiClient`, `SeoStore`, `App`); nothing
/// mutates it afterwards.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Backend host, without the `/api/admin` prefix.
    pub api_url: String,
    // Host serving the public SEO endpoints. Usually the same as `api_url`.
    pub site_url: String,
    // JSON file backing the durable client storage.
    pub storage_path: PathBuf,
    // Optional per-request timeout. None means no timeout.
    pub request_timeout: Option<Duration>,
    // Runtime environment marker. Selects the log format and how strict loading is.
    pub env: Env,
}

/// Env
///
/// Runtime context of the client process.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for test scaffolding. Points at a local
    /// backend and an in-tree storage file.
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            site_url: "http://127.0.0.1:8000".to_string(),
            storage_path: PathBuf::from(".gudang/storage.json"),
            request_timeout: None,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables. Call
    /// `dotenv::dotenv()` first when a `.env` file should be honoured.
    ///
    /// # Errors
    /// In `Env::Production` the backend host must be given explicitly through
    /// `GUDANG_API_URL`; a missing value fails fast. A timeout that is not a
    /// whole number of seconds is rejected in every environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let api_url = match env {
            Env::Production => env::var("GUDANG_API_URL")
                .map_err(|_| ConfigError::Missing("GUDANG_API_URL"))?,
            Env::Local => {
                env::var("GUDANG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            }
        };
        let api_url = trim_base(&api_url);

        // The public site defaults to the API host; the production deployment
        // serves both from the same origin.
        let site_url = env::var("GUDANG_SITE_URL")
            .map(|url| trim_base(&url))
            .unwrap_or_else(|_| api_url.clone());

        let storage_path = env::var("GUDANG_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".gudang/storage.json"));

        let request_timeout = match env::var("GUDANG_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    key: "GUDANG_HTTP_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            api_url,
            site_url,
            storage_path,
            request_timeout,
            env,
        })
    }

    /// Base URL for every admin resource request.
    pub fn admin_base(&self) -> String {
        format!("{}{}", self.api_url, ADMIN_API_PREFIX)
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_base_appends_prefix() {
        let config = AppConfig {
            api_url: "https://be.example.com".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.admin_base(), "https://be.example.com/api/admin");
    }

    #[test]
    fn trim_base_drops_trailing_slashes() {
        assert_eq!(trim_base(" https://x.test// "), "https://x.test");
    }
}
