//! Error taxonomy for the planner and its collaborators.

use thiserror::Error;

/// Errors surfaced by request validation, lookups and the in-memory stores.
///
/// The route builder itself cannot fail on a well-formed request; every
/// variant here is a caller-facing rejection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// The request is missing required data or carries malformed values.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No stored route has the requested identifier.
    #[error("Route with ID {0} not found")]
    RouteNotFound(String),

    /// A store could not be accessed (e.g. a poisoned lock).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl PlannerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
