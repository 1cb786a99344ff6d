//! Runtime configuration, loaded from an optional file and the environment.

use anyhow::Result;
use config::{Config as Cfg, File};
use serde::Deserialize;
use tradebook_core::models::{DeductionPolicy, DEFAULT_PER_BUNCH_DEDUCTION};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the application's API routes.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub deduction: DeductionConfig,
}

/// Weight-deduction rule. The per-bunch constant is the live behavior;
/// the per-unit rate exists as a configuration switch for sites that
/// deduct proportionally instead.
#[derive(Debug, Deserialize, Clone)]
pub struct DeductionConfig {
    #[serde(default = "default_per_bunch")]
    pub per_bunch: f64,
    #[serde(default)]
    pub per_unit: Option<f64>,
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            per_bunch: default_per_bunch(),
            per_unit: None,
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_per_bunch() -> f64 {
    DEFAULT_PER_BUNCH_DEDUCTION
}

impl Config {
    /// Load from `configuration.*` (optional) and `TRADEBOOK`-prefixed
    /// environment variables; nested keys use `__`, for example
    /// `TRADEBOOK_DEDUCTION__PER_BUNCH`.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                config::Environment::with_prefix("TRADEBOOK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn deduction_policy(&self) -> DeductionPolicy {
        DeductionPolicy {
            per_bunch: self.deduction.per_bunch,
            per_unit: self.deduction.per_unit,
        }
    }
}
