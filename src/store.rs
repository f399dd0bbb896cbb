//! In-memory repositories.
//!
//! Suitable for tests and single-process deployments. Both stores are cheap
//! to share behind an `Arc`.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::{PlannerError, Result};
use crate::service::{RouteId, StoredRoute};
use crate::status::StatusEvent;
use crate::traits::{DeliveryStatusRepository, RouteRepository};

fn poisoned<T>(_: T) -> PlannerError {
    PlannerError::Storage("lock poisoned".to_string())
}

fn in_range(at: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start <= at && at <= end
}

#[derive(Debug, Default)]
pub struct InMemoryRouteStore {
    routes: RwLock<HashMap<RouteId, StoredRoute>>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.routes.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl RouteRepository for InMemoryRouteStore {
    fn save(&self, route: StoredRoute) -> Result<()> {
        self.routes.write().map_err(poisoned)?.insert(route.id, route);
        Ok(())
    }

    fn get(&self, id: &RouteId) -> Result<Option<StoredRoute>> {
        Ok(self.routes.read().map_err(poisoned)?.get(id).cloned())
    }

    fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<StoredRoute>> {
        let routes = self.routes.read().map_err(poisoned)?;
        let mut matching: Vec<StoredRoute> = routes
            .values()
            .filter(|route| in_range(route.created_at, start, end))
            .cloned()
            .collect();
        matching.sort_by_key(|route| route.created_at);
        Ok(matching)
    }
}

impl<T: RouteRepository> RouteRepository for std::sync::Arc<T> {
    fn save(&self, route: StoredRoute) -> Result<()> {
        (**self).save(route)
    }

    fn get(&self, id: &RouteId) -> Result<Option<StoredRoute>> {
        (**self).get(id)
    }

    fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<StoredRoute>> {
        (**self).list_between(start, end)
    }
}

/// Events are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStatusStore {
    events: RwLock<Vec<StatusEvent>>,
}

impl InMemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching events, newest first. Equal timestamps keep the later insert
    /// ahead of the earlier one.
    fn newest_first<F>(&self, predicate: F) -> Result<Vec<StatusEvent>>
    where
        F: Fn(&StatusEvent) -> bool,
    {
        let events = self.events.read().map_err(poisoned)?;
        let mut matching: Vec<StatusEvent> =
            events.iter().rev().filter(|e| predicate(e)).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

impl DeliveryStatusRepository for InMemoryStatusStore {
    fn append(&self, event: StatusEvent) -> Result<()> {
        self.events.write().map_err(poisoned)?.push(event);
        Ok(())
    }

    fn latest(&self, route_id: &str, order_id: &str) -> Result<Option<StatusEvent>> {
        let matching = self.newest_first(|e| e.route_id == route_id && e.order_id == order_id)?;
        Ok(matching.into_iter().next())
    }

    fn history(&self, route_id: &str) -> Result<Vec<StatusEvent>> {
        self.newest_first(|e| e.route_id == route_id)
    }

    fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<StatusEvent>> {
        let events = self.events.read().map_err(poisoned)?;
        Ok(events
            .iter()
            .filter(|e| in_range(e.created_at, start, end))
            .cloned()
            .collect())
    }
}

impl<T: DeliveryStatusRepository> DeliveryStatusRepository for std::sync::Arc<T> {
    fn append(&self, event: StatusEvent) -> Result<()> {
        (**self).append(event)
    }

    fn latest(&self, route_id: &str, order_id: &str) -> Result<Option<StatusEvent>> {
        (**self).latest(route_id, order_id)
    }

    fn history(&self, route_id: &str) -> Result<Vec<StatusEvent>> {
        (**self).history(route_id)
    }

    fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<StatusEvent>> {
        (**self).list_between(start, end)
    }
}
