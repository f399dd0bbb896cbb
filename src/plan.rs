//! Route plan output types.
//!
//! A [`RoutePlan`] is the complete result of one optimization request. Field
//! names follow the JSON contract served to API clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::model::Coordinate;

/// The complete engine output for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub optimized_route: Vec<RouteStop>,
    /// Kilometers, rounded to one decimal.
    pub total_distance: f64,
    /// Rendered as `{H}h {M}m`.
    pub estimated_time: String,
    pub waypoints: Vec<Waypoint>,
    pub route_polyline: String,
    pub steps: Vec<Step>,
}

/// One order assigned to a vehicle with a planned arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub order_id: String,
    pub vehicle_id: String,
    /// `HH:MM:SS`, 24-hour clock.
    pub arrival_time: String,
    pub order_details: OrderDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub address: String,
    pub priority: i64,
    pub time_window: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointKind {
    Depot,
    Delivery,
}

/// A geographic stop: either a depot endpoint or a delivery location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: WaypointKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl Waypoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Travel instruction between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    /// Kilometers, rounded to one decimal.
    pub distance: f64,
    /// Rendered as `{M}m`.
    pub duration: String,
    pub from: StepEndpoint,
    pub to: StepEndpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEndpoint {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

impl From<&Waypoint> for StepEndpoint {
    fn from(waypoint: &Waypoint) -> Self {
        Self {
            lat: waypoint.lat,
            lng: waypoint.lng,
            label: waypoint.label.clone(),
        }
    }
}

/// An `{H}h {M}m` duration.
///
/// Minutes are not normalized: `0h 60m` is a legal value and renders as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatedTime {
    pub hours: i64,
    pub minutes: i64,
}

impl EstimatedTime {
    pub fn new(hours: i64, minutes: i64) -> Self {
        Self { hours, minutes }
    }

    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for EstimatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

impl FromStr for EstimatedTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PlannerError::invalid(format!("malformed duration: {}", s));
        let (hours, rest) = s.split_once("h ").ok_or_else(malformed)?;
        let minutes = rest.strip_suffix('m').ok_or_else(malformed)?;
        let hours = hours.trim().parse::<i64>().map_err(|_| malformed())?;
        let minutes = minutes.trim().parse::<i64>().map_err(|_| malformed())?;
        Ok(Self { hours, minutes })
    }
}
