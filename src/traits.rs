//! Storage seams for the planner's collaborators.
//!
//! These are intentionally minimal. Applications implement them over their
//! own database; [`crate::store`] provides in-memory versions.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::service::{RouteId, StoredRoute};
use crate::status::StatusEvent;

/// Persists produced route plans keyed by their generated identifier.
pub trait RouteRepository: Send + Sync {
    fn save(&self, route: StoredRoute) -> Result<()>;

    fn get(&self, id: &RouteId) -> Result<Option<StoredRoute>>;

    /// Routes created within `[start, end]`.
    fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<StoredRoute>>;
}

/// Append-only log of delivery status events.
pub trait DeliveryStatusRepository: Send + Sync {
    fn append(&self, event: StatusEvent) -> Result<()>;

    /// Newest event for a (route, order) pair.
    fn latest(&self, route_id: &str, order_id: &str) -> Result<Option<StatusEvent>>;

    /// All events for a route, newest first.
    fn history(&self, route_id: &str) -> Result<Vec<StatusEvent>>;

    /// Events created within `[start, end]`.
    fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<StatusEvent>>;
}
