//! Route planning service: validates requests, builds plans and keeps them
//! retrievable by identifier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::builder::RouteBuilder;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::model::OptimizeRequest;
use crate::plan::RoutePlan;
use crate::traits::RouteRepository;

/// Identifier generated for every stored route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(Uuid);

impl RouteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RouteId {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| PlannerError::RouteNotFound(s.to_string()))
    }
}

/// A persisted plan together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRoute {
    pub id: RouteId,
    #[serde(flatten)]
    pub plan: RoutePlan,
    pub webhook_url: String,
    pub input_data: OptimizeRequest,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RoutePlanningService<R> {
    repository: R,
    config: PlannerConfig,
}

impl<R: RouteRepository> RoutePlanningService<R> {
    pub fn new(repository: R, config: PlannerConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn optimize(&self, request: OptimizeRequest) -> Result<StoredRoute> {
        self.optimize_at(request, Utc::now())
    }

    /// Plans and stores a request with an explicit creation timestamp.
    pub fn optimize_at(&self, request: OptimizeRequest, at: DateTime<Utc>) -> Result<StoredRoute> {
        let plan = RouteBuilder::build(&request)?;
        let route = StoredRoute {
            id: RouteId::new(),
            plan,
            webhook_url: self.config.webhook_url(),
            input_data: request,
            created_at: at,
            updated_at: at,
        };
        self.repository.save(route.clone())?;

        info!(
            route_id = %route.id,
            stops = route.plan.optimized_route.len(),
            total_distance = route.plan.total_distance,
            "stored optimized route"
        );
        Ok(route)
    }

    /// Looks up a stored route. Unknown or malformed identifiers are reported
    /// as not found.
    pub fn get_route(&self, id: &str) -> Result<StoredRoute> {
        let route_id: RouteId = id.parse()?;
        self.repository
            .get(&route_id)?
            .ok_or_else(|| PlannerError::RouteNotFound(id.to_string()))
    }
}
