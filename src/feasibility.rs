//! Post-build constraint report.
//!
//! Runs after route construction and only describes how a plan relates to
//! the request's constraints. It never reorders or drops stops.

use serde::{Deserialize, Serialize};

use crate::haversine::round1;
use crate::model::Constraints;
use crate::plan::RoutePlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    pub within_max_distance: bool,
    /// Kilometers beyond `max_distance`, zero when within.
    pub excess_distance: f64,
    /// Constraint flags that were supplied but have no effect.
    pub ignored: Vec<String>,
}

impl FeasibilityReport {
    pub fn evaluate(plan: &RoutePlan, constraints: &Constraints) -> Self {
        let limit = constraints.max_distance;
        let excess = if limit > 0.0 {
            (plan.total_distance - limit).max(0.0)
        } else {
            0.0
        };

        let mut ignored = Vec::new();
        if constraints.avoid_highways {
            ignored.push("avoid_highways".to_string());
        }
        if constraints.traffic_enabled {
            ignored.push("traffic_enabled".to_string());
        }

        Self {
            within_max_distance: excess == 0.0,
            excess_distance: round1(excess),
            ignored,
        }
    }
}
