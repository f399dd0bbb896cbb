//! Request data model for route planning.
//!
//! All values are request-scoped: they are built from an inbound request,
//! read by the builder and dropped once the plan is produced.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PlannerError, Result};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and within their ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// An order to be delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub address: String,
    /// Lower is more urgent.
    pub priority: i64,
    /// Delivery window as `HH:mm-HH:mm`. Stored, never enforced.
    pub time_window: String,
    pub location: Coordinate,
}

/// A delivery vehicle.
///
/// Capacity and start location are carried through but do not influence
/// assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub capacity: f64,
    pub start_location: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
}

/// Routing constraints. Accepted but inert during route construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum route length in kilometers; zero or less means no limit.
    pub max_distance: f64,
    pub avoid_highways: bool,
    pub traffic_enabled: bool,
}

/// A complete optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub orders: Vec<Order>,
    pub vehicles: Vec<Vehicle>,
    pub depots: Vec<Depot>,
    #[serde(default)]
    pub constraints: Constraints,
}

impl OptimizeRequest {
    /// Parses a JSON request body. Structural problems (missing locations,
    /// non-numeric coordinates) are reported as invalid requests.
    pub fn from_json(body: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(body)?;
        Ok(request)
    }

    /// Rejects requests the builder cannot plan.
    pub fn validate(&self) -> Result<()> {
        let outcome = self.check();
        if let Err(err) = &outcome {
            warn!(error = %err, "rejected optimization request");
        }
        outcome
    }

    fn check(&self) -> Result<()> {
        if self.orders.is_empty() {
            return Err(PlannerError::invalid("No orders provided"));
        }
        if self.vehicles.is_empty() {
            return Err(PlannerError::invalid("No vehicles provided"));
        }
        if self.depots.is_empty() {
            return Err(PlannerError::invalid("No depots provided"));
        }

        for (index, depot) in self.depots.iter().enumerate() {
            if !depot.location.is_valid() {
                return Err(PlannerError::invalid(format!(
                    "Invalid coordinates for depot {}",
                    describe(&depot.id, index)
                )));
            }
        }

        for (index, order) in self.orders.iter().enumerate() {
            if order.id.is_empty() {
                return Err(PlannerError::invalid(format!(
                    "Missing id for order at index {}",
                    index
                )));
            }
            if !order.location.is_valid() {
                return Err(PlannerError::invalid(format!(
                    "Invalid coordinates for order {}",
                    describe(&order.id, index)
                )));
            }
        }

        Ok(())
    }
}

fn describe(id: &str, index: usize) -> String {
    if id.is_empty() {
        format!("at index {}", index)
    } else {
        id.to_string()
    }
}
