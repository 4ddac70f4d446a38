//! Simulator configuration.
//!
//! Every section is optional; anything left out falls back to the product
//! defaults. Decimal values are written as strings.
//!
//! ```json
//! {
//!   "rate_policy": { "base_rate": "80", "floor_rate": "30" },
//!   "limits": { "max_term": 48 },
//!   "eligibility": { "min_monthly_income": "200000" },
//!   "per_page": 10
//! }
//! ```

use crate::core::simulation::DEFAULT_PAGE_SIZE;
use crate::engine::rate::RatePolicy;
use crate::engine::LoanSimulationEngine;
use crate::policy::eligibility::EligibilityPolicy;
use crate::policy::limits::ProductLimits;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors arising from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub rate_policy: RatePolicy,
    pub limits: ProductLimits,
    pub eligibility: EligibilityPolicy,
    /// Installments per page of the payment calendar.
    pub per_page: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            rate_policy: RatePolicy::default(),
            limits: ProductLimits::default(),
            eligibility: EligibilityPolicy::default(),
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SimulatorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Engine running this configuration's rate policy.
    pub fn engine(&self) -> LoanSimulationEngine {
        LoanSimulationEngine::new(self.rate_policy.clone())
    }
}
