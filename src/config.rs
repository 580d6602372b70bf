//! Process configuration
//!
//! The only file input the program reads. It sets the billing rate and the title of the menu; customers and bills
//! are never written to or read from disk.

/*  This file is part of water-billing.
    water-billing is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
    water-billing is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.
    You should have received a copy of the GNU General Public License
    along with water-billing.  If not, see http://www.gnu.org/licenses/.*/

use serde::Deserialize;
use std::env;
use std::fs;
use std::io;

use crate::billing::{Rate, DEFAULT_RATE};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "WATER_BILLING_CONFIG";

/// Things that can go wrong while loading the configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The named file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The file we tried to read
        path: String,
        /// Underlying io error
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or has unexpected keys
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Rates must be finite and non-negative
    #[error("invalid rate {0}: must be a non-negative number")]
    InvalidRate(f64),
}

/// Settings for one run of the program
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Money charged per unit of usage
    pub rate_per_unit: Rate,
    /// Title printed above the menu
    pub system_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            rate_per_unit: DEFAULT_RATE,
            system_name: "Water Billing System".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit path wins over `WATER_BILLING_CONFIG`. With neither the defaults are used.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => Some(p.to_string()),
            None => env::var(CONFIG_ENV_VAR).ok(),
        };

        let path = match path {
            Some(p) => p,
            None => {
                tracing::debug!("no config file given, using defaults");
                return Ok(AppConfig::default());
            }
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let cfg = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path, rate = cfg.rate_per_unit, "loaded config");
        Ok(cfg)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks that the values stored in the configuration are legal
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rate(self.rate_per_unit)
    }
}

/// A rate is usable if it is finite and not negative
pub fn validate_rate(rate: Rate) -> Result<(), ConfigError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ConfigError::InvalidRate(rate));
    }

    Ok(())
}
