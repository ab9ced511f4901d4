//! Configuration loading.
//!
//! Limits, weights and episode settings come from one TOML document. Every
//! key is optional and falls back to its default.
//!
//! ```toml
//! [fdtl]
//! max_daily_flight_time = 8.0
//! weekly_flight_time_limit = 35.0
//!
//! [cost_weights]
//! w_cancel = 750.0
//!
//! [environment]
//! max_steps = 200
//!
//! [environment.impact]
//! delay_passenger_share = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cost::{CostModel, CostWeights};
use crate::env::EnvironmentSettings;
use crate::error::{RecoveryError, Result};
use crate::rules::RuleLimits;

/// Complete recovery configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Flight and duty time limits.
    pub fdtl: RuleLimits,
    /// Cost term weights.
    pub cost_weights: CostWeights,
    /// Episode settings.
    pub environment: EnvironmentSettings,
}

impl RecoveryConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RecoveryConfig = toml::from_str(content).map_err(|e| {
            RecoveryError::config(format!("Failed to parse config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Returns
    /// * `Ok(RecoveryConfig)` if the file was read, parsed and is valid
    /// * `Err(RecoveryError::Config)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RecoveryError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<()> {
        self.fdtl.validate()?;
        self.cost_weights.validate()?;
        self.environment.validate()
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| RecoveryError::config(format!("Failed to render config: {e}")))
    }

    /// A cost model with this configuration's weights and limits.
    pub fn cost_model(&self) -> CostModel {
        CostModel::new(self.cost_weights.clone(), self.fdtl.clone())
    }
}
