//! Pipeline constants and the optional TOML configuration file

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::MonitorError;
use crate::models::{MachineInput, default_cohort};

/// Rate and threshold constants the pipeline runs against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Currency units per kWh
    pub electricity_rate: f64,
    pub process_time_threshold: f64,
    pub manual_time_threshold: f64,
    /// Cost above which a machine raises a high cost alert
    pub cost_alert_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            electricity_rate: 8.0,
            process_time_threshold: 1.2,
            manual_time_threshold: 1.3,
            cost_alert_threshold: 200.0,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.electricity_rate.is_finite() || self.electricity_rate < 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "electricity_rate must be a non-negative number, got {}",
                self.electricity_rate
            )));
        }
        for (name, value) in [
            ("process_time_threshold", self.process_time_threshold),
            ("manual_time_threshold", self.manual_time_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MonitorError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !self.cost_alert_threshold.is_finite() || self.cost_alert_threshold < 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "cost_alert_threshold must be a non-negative number, got {}",
                self.cost_alert_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials {
            username: "user".to_string(),
            password: "password".to_string(),
        }
    }
}

/// Everything the dashboard can be configured with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub pipeline: PipelineConfig,
    /// Symbol printed in front of costs
    pub currency: String,
    pub credentials: Credentials,
    /// Replaces the built-in five machine floor when present
    pub machines: Option<Vec<MachineInput>>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            pipeline: PipelineConfig::default(),
            currency: "₹".to_string(),
            credentials: Credentials::default(),
            machines: None,
        }
    }
}

impl MonitorConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: MonitorConfig = toml::from_str(text).context("Failed to parse configuration")?;
        config.pipeline.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// The configured cohort, or the default floor
    pub fn cohort(&self) -> Vec<MachineInput> {
        self.machines.clone().unwrap_or_else(default_cohort)
    }
}
