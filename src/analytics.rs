//! Aggregate reporting over stored routes and delivery status events.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SavingsPolicy;
use crate::error::Result;
use crate::haversine::round2;
use crate::plan::EstimatedTime;
use crate::service::StoredRoute;
use crate::status::{DeliveryStatus, StatusEvent};
use crate::traits::{DeliveryStatusRepository, RouteRepository};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAnalyticsReport {
    pub total_routes: usize,
    /// Kilometers, unrounded sum of per-route totals.
    pub total_distance: f64,
    pub average_route_time: String,
    /// Percentage of status events that are deliveries.
    pub delivery_success_rate: f64,
    pub total_deliveries: usize,
    pub on_time_deliveries: usize,
    pub delayed_deliveries: usize,
    pub failed_deliveries: usize,
    pub fuel_savings: f64,
    pub co2_savings: f64,
}

/// Punctuality of a delivered event, when both timestamps are readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Punctuality {
    OnTime,
    Delayed,
    Unknown,
}

pub struct RouteAnalytics;

impl RouteAnalytics {
    /// Report over routes and events created within `[start, end]`.
    pub fn for_range<R, S>(
        routes: &R,
        statuses: &S,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        policy: &SavingsPolicy,
    ) -> Result<RouteAnalyticsReport>
    where
        R: RouteRepository,
        S: DeliveryStatusRepository,
    {
        let routes = routes.list_between(start, end)?;
        let events = statuses.list_between(start, end)?;
        debug!(routes = routes.len(), events = events.len(), "computing route analytics");
        Ok(Self::compute(&routes, &events, policy))
    }

    pub fn compute(
        routes: &[StoredRoute],
        events: &[StatusEvent],
        policy: &SavingsPolicy,
    ) -> RouteAnalyticsReport {
        let total_distance: f64 = routes.iter().map(|route| route.plan.total_distance).sum();
        let fuel_used = total_distance * policy.fuel_consumption;

        let delivered: Vec<&StatusEvent> = events
            .iter()
            .filter(|event| event.status == DeliveryStatus::Delivered)
            .collect();
        let punctuality: Vec<Punctuality> =
            delivered.iter().map(|event| punctuality_of(event)).collect();

        RouteAnalyticsReport {
            total_routes: routes.len(),
            total_distance,
            average_route_time: average_route_time(routes),
            delivery_success_rate: if events.is_empty() {
                0.0
            } else {
                delivered.len() as f64 / events.len() as f64 * 100.0
            },
            total_deliveries: events.len(),
            on_time_deliveries: punctuality.iter().filter(|p| **p == Punctuality::OnTime).count(),
            delayed_deliveries: punctuality.iter().filter(|p| **p == Punctuality::Delayed).count(),
            failed_deliveries: events
                .iter()
                .filter(|event| event.status == DeliveryStatus::Failed)
                .count(),
            fuel_savings: round2(fuel_used * policy.fuel_cost * policy.optimization_savings),
            co2_savings: round2(fuel_used * policy.co2_per_liter * policy.optimization_savings),
        }
    }
}

/// Mean of the routes' estimated times; unparsable values count as zero.
fn average_route_time(routes: &[StoredRoute]) -> String {
    if routes.is_empty() {
        return EstimatedTime::new(0, 0).to_string();
    }

    let total_minutes: i64 = routes
        .iter()
        .map(|route| {
            route
                .plan
                .estimated_time
                .parse::<EstimatedTime>()
                .map(|time| time.total_minutes())
                .unwrap_or(0)
        })
        .sum();

    let average = total_minutes as f64 / routes.len() as f64;
    let hours = (average / 60.0).floor() as i64;
    let minutes = (average % 60.0).round() as i64;
    EstimatedTime::new(hours, minutes).to_string()
}

fn punctuality_of(event: &StatusEvent) -> Punctuality {
    let Some(metadata) = event.metadata.as_ref() else {
        return Punctuality::Unknown;
    };
    match (
        parse_arrival(metadata.estimated_arrival.as_deref()),
        parse_arrival(metadata.actual_arrival.as_deref()),
    ) {
        (Some(estimated), Some(actual)) if actual <= estimated => Punctuality::OnTime,
        (Some(_), Some(_)) => Punctuality::Delayed,
        _ => Punctuality::Unknown,
    }
}

/// RFC 3339, or an ISO date-time without offset read as UTC.
fn parse_arrival(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
