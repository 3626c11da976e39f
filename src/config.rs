//! Engine configuration.
//!
//! The configuration is deliberately small and easily serializable: limits
//! on proximity search radius and result page sizes. It can be loaded from
//! JSON, or from TOML when the `toml` feature is enabled.

use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Search engine configuration.
///
/// # Example
///
/// ```rust
/// use georegistry::Config;
///
/// let config = Config::default();
/// assert_eq!(config.max_radius_km, 100.0);
///
/// let json = r#"{ "max_radius_km": 50.0 }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.max_radius_km, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Largest radius a proximity search may request, in kilometers.
    #[serde(default = "Config::default_max_radius_km")]
    pub max_radius_km: f64,

    /// Largest permitted result page size.
    #[serde(default = "Config::default_max_page_size")]
    pub max_page_size: usize,

    /// Page size used when a criteria object does not supply one.
    #[serde(default = "Config::default_page_size")]
    pub default_page_size: usize,
}

impl Config {
    const fn default_max_radius_km() -> f64 {
        100.0
    }

    const fn default_max_page_size() -> usize {
        100
    }

    const fn default_page_size() -> usize {
        25
    }

    pub fn with_max_radius_km(mut self, max_radius_km: f64) -> Self {
        self.max_radius_km = max_radius_km;
        self
    }

    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    pub fn with_default_page_size(mut self, default_page_size: usize) -> Self {
        self.default_page_size = default_page_size;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !self.max_radius_km.is_finite() || self.max_radius_km <= 0.0 {
            return Err(RegistryError::InvalidConfig(format!(
                "max_radius_km must be positive and finite, got: {}",
                self.max_radius_km
            )));
        }

        if self.max_page_size == 0 {
            return Err(RegistryError::InvalidConfig(
                "max_page_size must be greater than zero".to_string(),
            ));
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(RegistryError::InvalidConfig(format!(
                "default_page_size must be in 1..={}, got: {}",
                self.max_page_size, self.default_page_size
            )));
        }

        Ok(())
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a TOML string (requires the `toml` feature).
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as a TOML string (requires the `toml` feature).
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_radius_km: Self::default_max_radius_km(),
            max_page_size: Self::default_max_page_size(),
            default_page_size: Self::default_page_size(),
        }
    }
}
