//! # Application configuration — `rustyfin.toml`
//!
//! Defines the TOML file the desktop shell reads at startup (filename:
//! [`RustyfinConfig::filename`] = `"rustyfin.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [backend]
//! base_url = "http://127.0.0.1:1420/command"   # commands are POSTed to {base_url}/{command}
//! timeout_secs = 0                              # 0 = wait forever
//!
//! [log]
//! filter = "info"    # tracing EnvFilter directive, RUST_LOG wins when set
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`RustyfinConfig`] | Top-level config. Builder helpers, TOML (de)serialisation, and the canonical filename. |
//! | [`BackendConfig`] | Where the command channel sends requests and how long it waits. |
//! | [`LogConfig`] | Default log filter for the desktop binary. |
//!
//! Every section has `#[serde(default)]`, so a missing or empty file is the
//! default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `rustyfin.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RustyfinConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Command backend configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL the command name is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. 0 disables the timeout.
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:1420/command".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 0,
        }
    }
}

impl BackendConfig {
    /// The configured timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl RustyfinConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig {
                base_url: base_url.into(),
                ..BackendConfig::default()
            },
            log: LogConfig::default(),
        }
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.backend.timeout_secs = secs;
        self
    }

    /// Builder method to set the log filter.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log.filter = filter.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "rustyfin.toml"
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
