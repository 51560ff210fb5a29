//! Editor configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```rust
//! use product_grid::config::EditorConfig;
//!
//! let config = EditorConfig::from_toml_str(r#"
//!     product_ids = ["p1", "p4"]
//!     catalog_latency_ms = 300
//!
//!     [zoom]
//!     max = 3.0
//! "#).unwrap();
//!
//! assert_eq!(config.product_ids, ["p1", "p4"]);
//! assert_eq!(config.zoom.min, 0.5);
//! ```

use crate::catalog::parse_ids;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid zoom limits: min {min} must be positive and below max {max}")]
    InvalidZoom { min: f64, max: f64 },

    #[error("Invalid zoom step {step}: must be a positive finite number")]
    InvalidZoomStep { step: f64 },

    #[error("Invalid default zoom {default}: must be a finite number")]
    InvalidZoomDefault { default: f64 },
}

/// Zoom limits for the grid canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 2.0,
            step: 0.1,
            default: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Products to load initially; empty means the whole catalog.
    pub product_ids: Vec<String>,
    pub zoom: ZoomConfig,
    /// Simulated delay for the in-memory catalog.
    pub catalog_latency_ms: u64,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            product_ids: Vec::new(),
            zoom: ZoomConfig::default(),
            catalog_latency_ms: 0,
            log_filter: "info".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Replace the initial selection with a comma-separated id list.
    pub fn with_ids_param(mut self, raw: &str) -> Self {
        self.product_ids = parse_ids(raw);
        self
    }

    pub fn catalog_latency(&self) -> Duration {
        Duration::from_millis(self.catalog_latency_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ZoomConfig {
            min,
            max,
            step,
            default,
        } = self.zoom;
        // Written as negated comparisons so NaN fails them.
        if !(min > 0.0 && min <= max && max.is_finite()) {
            return Err(ConfigError::InvalidZoom { min, max });
        }
        if !(step > 0.0 && step.is_finite()) {
            return Err(ConfigError::InvalidZoomStep { step });
        }
        if !default.is_finite() {
            return Err(ConfigError::InvalidZoomDefault { default });
        }
        Ok(())
    }
}
