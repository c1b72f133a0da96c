use std::{fs, io, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::FuelType;

pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 30;
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to locate config directory.")]
    ConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Unknown fuel name in config: {0}")]
    UnknownFuel(String),
}

/// Contents of `config.toml`. Every key is optional; missing keys fall back
/// to built-in defaults, CLI flags override both.
#[non_exhaustive]
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub feed_url: Option<String>,
    pub cache_ttl_minutes: Option<u64>,
    pub radius_km: Option<f64>,
    pub default_fuel: Option<String>,
}

impl Config {
    #[inline]
    pub fn default_fuel(&self) -> Result<FuelType, ConfigError> {
        self.default_fuel.as_ref().map_or(Ok(FuelType::default()), |name| {
            FuelType::from_name(name)
                .ok_or_else(|| ConfigError::UnknownFuel(name.clone()))
        })
    }
}

#[non_exhaustive]
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    #[inline]
    pub fn new(custom_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = if let Some(path) = custom_path {
            path
        } else {
            let config_dir = dirs::config_dir()
                .ok_or(ConfigError::ConfigDir)?
                .join("fuelcli");

            fs::create_dir_all(&config_dir)?;

            config_dir.join("config.toml")
        };

        Ok(Self { config_path })
    }

    #[inline]
    pub fn init_default_config(&self) -> Result<(), ConfigError> {
        if !self.config_path.exists() {
            const DEFAULT_CONFIG: &str = r#"
# Override the ministry price-feed endpoint.
# feed_url = "https://geoportalgasolineras.es/rest/geoportalgasolineras/ListaPrecioGasolinerasSinGalp"

# How long a downloaded price snapshot stays fresh.
cache_ttl_minutes = 30

# Search radius for coordinate queries.
radius_km = 10.0

# One of: 95, 98, diesel, diesel-premium.
default_fuel = "95"
            "#;

            fs::write(&self.config_path, DEFAULT_CONFIG.trim())?;
        }
        Ok(())
    }

    /// A missing config file reads as the all-defaults config.
    #[inline]
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)?;
        let config = toml::from_str(&content)?;

        Ok(config)
    }
}
