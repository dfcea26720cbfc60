//! Instance configuration.
//!
//! ```toml
//! [instances.tm1srv01]
//! address = "localhost"
//! port = 12354
//! user = "admin"
//! password = "YXBwbGU="
//! ssl = true
//! ```
//!
//! Passwords are stored base64-encoded. That only keeps them from being
//! read over a shoulder; it is not encryption.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::domain::ConfigError;

/// Default file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub instances: BTreeMap<String, InstanceConfig>,
}

/// Connection settings for one named instance.
#[derive(Clone, Deserialize)]
pub struct InstanceConfig {
    pub address: String,
    pub port: u16,
    pub user: String,
    /// base64-encoded.
    pub password: String,
    #[serde(default)]
    pub ssl: bool,
    /// CAM namespace; switches to CAM authentication when set.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Full REST root (e.g. `https://host:8010/api/v1`), overrides address/port/ssl.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub verify_tls: bool,
    /// Per-request timeout. No timeout when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for InstanceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceConfig")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ssl", &self.ssl)
            .field("namespace", &self.namespace)
            .field("base_url", &self.base_url)
            .field("verify_tls", &self.verify_tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reverse the base64 obfuscation of a stored password.
pub fn decode_password(instance: &str, encoded: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::PasswordEncoding {
        instance: instance.to_string(),
    };
    let bytes = STANDARD.decode(encoded.trim()).map_err(|_| invalid())?;
    String::from_utf8(bytes).map_err(|_| invalid())
}
