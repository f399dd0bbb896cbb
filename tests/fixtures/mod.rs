//! Test fixtures for route-planner.
//!
//! Provides:
//! - Real lower Manhattan / Brooklyn locations
//! - Builders for orders, vehicles and requests

#![allow(dead_code)]

pub mod nyc_locations;

pub use nyc_locations::*;

use route_planner::{Constraints, Depot, OptimizeRequest, Order, Vehicle};

/// Builder for test requests with sensible defaults.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    orders: Vec<Order>,
    vehicles: Vec<Vehicle>,
    depots: Vec<Depot>,
    constraints: Constraints,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            vehicles: Vec::new(),
            depots: vec![depot("d1", &WAREHOUSES[0])],
            constraints: Constraints::default(),
        }
    }

    pub fn order(mut self, id: &str, priority: i64, location: &Location) -> Self {
        self.orders.push(Order {
            id: id.to_string(),
            address: location.name.to_string(),
            priority,
            time_window: "09:00-17:00".to_string(),
            location: location.coordinate(),
        });
        self
    }

    pub fn vehicle(mut self, id: &str) -> Self {
        self.vehicles.push(Vehicle {
            id: id.to_string(),
            capacity: 100.0,
            start_location: WAREHOUSES[0].coordinate(),
        });
        self
    }

    pub fn vehicle_with_capacity(mut self, id: &str, capacity: f64) -> Self {
        self.vehicles.push(Vehicle {
            id: id.to_string(),
            capacity,
            start_location: WAREHOUSES[0].coordinate(),
        });
        self
    }

    pub fn depots(mut self, depots: Vec<Depot>) -> Self {
        self.depots = depots;
        self
    }

    pub fn max_distance(mut self, km: f64) -> Self {
        self.constraints.max_distance = km;
        self
    }

    pub fn build(self) -> OptimizeRequest {
        OptimizeRequest {
            orders: self.orders,
            vehicles: self.vehicles,
            depots: self.depots,
            constraints: self.constraints,
        }
    }
}

pub fn depot(id: &str, location: &Location) -> Depot {
    Depot {
        id: id.to_string(),
        name: location.name.to_string(),
        location: location.coordinate(),
    }
}

/// A request with one order per delivery fixture and two vehicles.
pub fn city_request() -> OptimizeRequest {
    let mut builder = RequestBuilder::new().vehicle("van-1").vehicle("van-2");
    for (i, location) in DELIVERIES.iter().enumerate() {
        builder = builder.order(&format!("order-{}", i), (i % 3) as i64 + 1, location);
    }
    builder.build()
}
