//! Delivery status tracking.
//!
//! Drivers report status transitions per (route, order) pair through the
//! status webhook. Events are appended, never updated in place; the latest
//! event for a pair is its current status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{PlannerError, Result};
use crate::model::Coordinate;
use crate::traits::DeliveryStatusRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
    Failed,
}

/// Optional details attached to a status report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    /// RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<String>,
    /// RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_arrival: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Inbound status report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub route_id: String,
    pub order_id: String,
    #[serde(default)]
    pub status: DeliveryStatus,
    #[serde(default)]
    pub metadata: Option<StatusMetadata>,
}

impl StatusUpdate {
    pub fn new(
        route_id: impl Into<String>,
        order_id: impl Into<String>,
        status: DeliveryStatus,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            order_id: order_id.into(),
            status,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: StatusMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.route_id.is_empty() {
            return Err(PlannerError::invalid("route_id must not be empty"));
        }
        if self.order_id.is_empty() {
            return Err(PlannerError::invalid("order_id must not be empty"));
        }
        if let Some(location) = self.metadata.as_ref().and_then(|m| m.location) {
            if !location.is_valid() {
                return Err(PlannerError::invalid(format!(
                    "Invalid coordinates for status of order {}",
                    self.order_id
                )));
            }
        }
        Ok(())
    }
}

/// A recorded status report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub id: Uuid,
    pub route_id: String,
    pub order_id: String,
    pub status: DeliveryStatus,
    pub metadata: Option<StatusMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StatusEvent {
    fn from_update(update: StatusUpdate, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            route_id: update.route_id,
            order_id: update.order_id,
            status: update.status,
            metadata: update.metadata,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Records and queries delivery status events.
#[derive(Debug, Clone)]
pub struct StatusTracker<S> {
    repository: S,
}

impl<S: DeliveryStatusRepository> StatusTracker<S> {
    pub fn new(repository: S) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &S {
        &self.repository
    }

    pub fn record(&self, update: StatusUpdate) -> Result<StatusEvent> {
        self.record_at(update, Utc::now())
    }

    /// Records an update with an explicit timestamp.
    pub fn record_at(&self, update: StatusUpdate, at: DateTime<Utc>) -> Result<StatusEvent> {
        update.validate()?;
        let event = StatusEvent::from_update(update, at);
        self.repository.append(event.clone())?;

        info!(
            route_id = %event.route_id,
            order_id = %event.order_id,
            status = ?event.status,
            "recorded delivery status"
        );
        Ok(event)
    }

    pub fn latest(&self, route_id: &str, order_id: &str) -> Result<Option<StatusEvent>> {
        self.repository.latest(route_id, order_id)
    }

    pub fn history(&self, route_id: &str) -> Result<Vec<StatusEvent>> {
        self.repository.history(route_id)
    }
}
