//! Planner configuration.

use std::env;

use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "http://localhost:3000";

const WEBHOOK_STATUS_PATH: &str = "/api/webhooks/status";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Public base URL of the API, used to build the status webhook URL.
    pub api_url: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self { api_url: api_url.into() }
    }

    /// Reads `API_URL`, falling back to the default when unset or empty.
    pub fn from_env() -> Self {
        match env::var("API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Endpoint drivers post delivery status updates to.
    pub fn webhook_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), WEBHOOK_STATUS_PATH)
    }
}

/// Coefficients for the fuel and CO2 savings estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPolicy {
    /// Liters per kilometer.
    pub fuel_consumption: f64,
    /// Currency units per liter.
    pub fuel_cost: f64,
    /// Fraction of fuel credited to optimization.
    pub optimization_savings: f64,
    /// Kilograms of CO2 per liter burned.
    pub co2_per_liter: f64,
}

impl Default for SavingsPolicy {
    fn default() -> Self {
        Self {
            fuel_consumption: 0.3,
            fuel_cost: 1.5,
            optimization_savings: 0.15,
            co2_per_liter: 2.3,
        }
    }
}
