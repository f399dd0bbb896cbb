//! Real New York City locations for realistic test fixtures.

use route_planner::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// ============================================================================
// Warehouses (depot locations)
// ============================================================================

pub const WAREHOUSES: &[Location] = &[
    Location::new("Warehouse 1", 40.7128, -74.0060),
    Location::new("Red Hook Terminal", 40.6781, -74.0125),
];

// ============================================================================
// Delivery addresses
// ============================================================================

pub const DELIVERIES: &[Location] = &[
    Location::new("123 Main St", 40.7157, -74.0152),
    Location::new("Brooklyn Bridge Park", 40.7003, -73.9967),
    Location::new("Washington Square", 40.7308, -73.9973),
    Location::new("Battery Park", 40.7033, -74.0170),
    Location::new("Union Square", 40.7359, -73.9911),
    Location::new("Chelsea Market", 40.7424, -74.0060),
    Location::new("DUMBO", 40.7033, -73.9881),
];
