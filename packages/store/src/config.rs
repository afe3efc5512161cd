//! # Application configuration (`panicbutton.toml`)
//!
//! Defines the TOML configuration file read from the app data directory
//! (filename: [`AppConfig::filename`] = `"panicbutton.toml"`). It tells the client
//! where the backend lives and which service new users are attached to.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//!
//! [service]
//! service_id = 1
//! ```
//!
//! All structs derive or implement `Default`, so a missing or empty config file is
//! equivalent to the default configuration. The default base URL is taken from the
//! `PANIC_API_URL` environment variable at compile time when it is set.

use serde::{Deserialize, Serialize};

const FALLBACK_API_URL: &str = "http://localhost:3000";

/// Top-level configuration stored in `panicbutton.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Service that users created from the admin form belong to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_id")]
    pub service_id: i64,
}

fn default_base_url() -> String {
    option_env!("PANIC_API_URL")
        .unwrap_or(FALLBACK_API_URL)
        .to_string()
}

fn default_service_id() -> i64 {
    1
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_id: default_service_id(),
        }
    }
}

impl AppConfig {
    /// Builder method to point at another backend.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    pub fn with_service_id(mut self, id: i64) -> Self {
        self.service.service_id = id;
        self
    }

    /// Base URL without trailing slashes, ready for `format!("{base}/path")`.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "panicbutton.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
