//! Application configuration
//!
//! Loaded from a TOML file (`~/.config/vet-clinic/config.toml` by default).
//! Every section and field is optional; missing values fall back to the
//! defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{CalculatorKind, RateParameters};
use crate::shared::types::ConfigError;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "VET_CLINIC_CONFIG";

const APP_DIR: &str = "vet-clinic";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `vet_clinic=debug`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub pet_ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            pet_ttl_seconds: 60,
            sweep_interval_seconds: 30,
        }
    }
}

impl CacheConfig {
    pub fn pet_ttl(&self) -> Duration {
        Duration::from_secs(self.pet_ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub calculator: CalculatorKind,
    pub base_charge: f64,
    pub price_per_pet: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            calculator: CalculatorKind::CustomerDependent,
            base_charge: 30.0,
            price_per_pet: 40.0,
        }
    }
}

impl PricingConfig {
    pub fn rates(&self) -> RateParameters {
        RateParameters::new(self.base_charge, self.price_per_pet)
    }
}

impl AppConfig {
    /// Load and validate the config at `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pricing
            .rates()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.cache.pet_ttl_seconds == 0 {
            return Err(ConfigError::Invalid(
                "cache.pet_ttl_seconds must be greater than zero".to_string(),
            ));
        }
        if self.cache.sweep_interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "cache.sweep_interval_seconds must be greater than zero".to_string(),
            ));
        }
        match self.logging.format.to_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                other
            ))),
        }
    }
}

/// `$VET_CLINIC_CONFIG` if set, otherwise `~/.config/vet-clinic/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────
