//! Polyline representation for route geometries.
//!
//! Routes carry a lightweight textual polyline: every point rendered as
//! `lat,lng` and joined with `|`. This is not the compact Google encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

const POINT_SEPARATOR: char = '|';

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from (latitude, longitude) points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (lat, lng)) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", POINT_SEPARATOR)?;
            }
            write!(f, "{},{}", Component(*lat), Component(*lng))?;
        }
        Ok(())
    }
}

impl FromStr for Polyline {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::new(Vec::new()));
        }

        s.split(POINT_SEPARATOR)
            .map(|pair| -> Result<(f64, f64), PlannerError> {
                let (lat, lng) = pair.split_once(',').ok_or_else(|| {
                    PlannerError::invalid(format!("malformed polyline point: {}", pair))
                })?;
                let lat = lat
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| PlannerError::invalid(format!("malformed latitude: {}", lat)))?;
                let lng = lng
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| PlannerError::invalid(format!("malformed longitude: {}", lng)))?;
                Ok((lat, lng))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

/// A single coordinate component as shown in polylines.
///
/// Negative zero prints as `0` and magnitudes below 1e-6 use exponent form
/// (`1e-7`).
struct Component(f64);

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value == 0.0 {
            write!(f, "0")
        } else if value.abs() < 1e-6 {
            write!(f, "{:e}", value)
        } else {
            write!(f, "{}", value)
        }
    }
}
