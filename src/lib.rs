//! route-planner core
//!
//! Builds deterministic delivery route plans from time-windowed orders and
//! tracks per-order delivery status against them.

pub mod error;
pub mod config;
pub mod model;
pub mod haversine;
pub mod polyline;
pub mod plan;
pub mod builder;
pub mod feasibility;
pub mod traits;
pub mod store;
pub mod service;
pub mod status;
pub mod analytics;

pub use builder::RouteBuilder;
pub use error::{PlannerError, Result};
pub use model::{Constraints, Coordinate, Depot, OptimizeRequest, Order, Vehicle};
pub use plan::RoutePlan;
