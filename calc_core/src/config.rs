//! # Site Configuration
//!
//! Settings shared by the web server and the CLI. Loaded once at startup
//! from an optional TOML file, then overridden from the environment.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [site]
//! base_url = "https://quickcalc.example"
//!
//! [display]
//! decimals = 6
//! px_em_decimals = 4
//! default_base_size = 16.0
//!
//! [model]
//! base_url = "http://localhost:11434"
//! model = "llama3.1"
//! api_key_env = "QUICKCALC_MODEL_API_KEY"
//! ```
//!
//! Environment overrides: `QUICKCALC_PORT`, `QUICKCALC_MODEL_URL`,
//! `QUICKCALC_MODEL`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Largest decimal count accepted for display rounding
pub const MAX_DECIMALS: u32 = 12;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub site: SiteInfo,
    pub display: DisplayConfig,
    pub model: ModelConfig,
}

/// HTTP listener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Public site identity, used for the site map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    /// Absolute base URL, no trailing slash needed
    pub base_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        SiteInfo {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Rounding applied to values written back into paired fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimals for unit converter pairs
    pub decimals: u32,
    /// Decimals for the pixel/em converter
    pub px_em_decimals: u32,
    /// Initial root font size for pixel/em
    pub default_base_size: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            decimals: crate::sync::DEFAULT_DECIMALS,
            px_em_decimals: crate::pixel_em::DEFAULT_DECIMALS,
            default_base_size: crate::pixel_em::DEFAULT_BASE_SIZE,
        }
    }
}

/// Model provider for the algebra flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible server
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout; `None` waits for the provider indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            api_key_env: "QUICKCALC_MODEL_API_KEY".to_string(),
            timeout_secs: None,
        }
    }
}

impl SiteConfig {
    /// Parse TOML text.
    pub fn from_toml(text: &str) -> CalcResult<Self> {
        toml::from_str(text).map_err(|e| CalcError::SerializationError {
            reason: format!("invalid config: {}", e),
        })
    }

    /// Read a TOML file.
    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CalcError::config(format!("cannot read '{}': {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    /// File (if any) + process environment + validation.
    pub fn load(path: Option<&Path>) -> CalcResult<Self> {
        let mut config = match path {
            Some(p) => {
                debug!(path = %p.display(), "loading config file");
                Self::from_file(p)?
            }
            None => SiteConfig::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QUICKCALC_*` overrides from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> CalcResult<()> {
        if let Some(port) = lookup("QUICKCALC_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| CalcError::config(format!("QUICKCALC_PORT is not a port number: '{}'", port)))?;
        }
        if let Some(url) = lookup("QUICKCALC_MODEL_URL") {
            self.model.base_url = url;
        }
        if let Some(model) = lookup("QUICKCALC_MODEL") {
            self.model.model = model;
        }
        Ok(())
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.server.port == 0 {
            return Err(CalcError::config("server.port must be non-zero"));
        }
        for (name, value) in [
            ("display.decimals", self.display.decimals),
            ("display.px_em_decimals", self.display.px_em_decimals),
        ] {
            if value > MAX_DECIMALS {
                return Err(CalcError::config(format!("{} must be at most {}", name, MAX_DECIMALS)));
            }
        }
        if !self.display.default_base_size.is_finite() || self.display.default_base_size <= 0.0 {
            return Err(CalcError::config("display.default_base_size must be positive"));
        }
        if self.model.model.trim().is_empty() {
            return Err(CalcError::config("model.model must not be empty"));
        }
        Ok(())
    }
}
