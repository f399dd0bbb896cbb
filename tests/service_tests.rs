//! Service-level tests: planning + persistence, status tracking, analytics.

mod fixtures;

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use route_planner::analytics::RouteAnalytics;
use route_planner::config::{PlannerConfig, SavingsPolicy};
use route_planner::service::RoutePlanningService;
use route_planner::status::{DeliveryStatus, StatusMetadata, StatusTracker, StatusUpdate};
use route_planner::store::{InMemoryRouteStore, InMemoryStatusStore};
use route_planner::{OptimizeRequest, PlannerError, RouteBuilder};

use fixtures::{DELIVERIES, RequestBuilder, city_request};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()
}

fn service() -> RoutePlanningService<Arc<InMemoryRouteStore>> {
    RoutePlanningService::new(Arc::new(InMemoryRouteStore::new()), PlannerConfig::default())
}

// ============================================================================
// Route Planning Service
// ============================================================================

#[test]
fn test_optimize_stores_and_returns_route() {
    let service = service();
    let request = city_request();

    let stored = service.optimize(request.clone()).unwrap();

    assert_eq!(stored.plan, RouteBuilder::build(&request).unwrap());
    assert_eq!(stored.input_data, request);
    assert_eq!(stored.webhook_url, "http://localhost:3000/api/webhooks/status");
    assert_eq!(service.repository().len(), Ok(1));

    let fetched = service.get_route(&stored.id.to_string()).unwrap();
    assert_eq!(fetched, stored);
}

#[test]
fn test_each_optimization_gets_a_new_id() {
    let service = service();
    let a = service.optimize(city_request()).unwrap();
    let b = service.optimize(city_request()).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(a.plan, b.plan);
}

#[test]
fn test_unknown_route_not_found() {
    let service = service();
    let missing = "7f0c5a9e-2d41-4b4e-9a55-3f2a8c1d9e00";

    assert_eq!(
        service.get_route(missing),
        Err(PlannerError::RouteNotFound(missing.to_string()))
    );
    assert!(matches!(service.get_route("nope"), Err(PlannerError::RouteNotFound(_))));
}

#[test]
fn test_invalid_request_is_not_stored() {
    let service = service();
    let mut request = city_request();
    request.vehicles.clear();

    assert_eq!(
        service.optimize(request),
        Err(PlannerError::InvalidRequest("No vehicles provided".to_string()))
    );
    assert_eq!(service.repository().is_empty(), Ok(true));
}

#[test]
fn test_optimize_from_json_body() {
    let body = r#"{
        "orders": [
            {"id": "101", "address": "123 Main St", "priority": 1, "time_window": "09:00-12:00",
             "location": {"lat": 40.7157, "lng": -74.0152}}
        ],
        "vehicles": [{"id": "v1", "capacity": 100,
                      "start_location": {"lat": 40.7128, "lng": -74.0060}}],
        "depots": [{"id": "d1", "name": "Warehouse 1",
                    "location": {"lat": 40.7128, "lng": -74.0060}}],
        "constraints": {"max_distance": 100, "avoid_highways": false, "traffic_enabled": true}
    }"#;

    let request = OptimizeRequest::from_json(body).unwrap();
    let stored = service().optimize(request).unwrap();
    let json = serde_json::to_value(&stored).unwrap();

    assert_eq!(json["total_distance"], 1.7);
    assert_eq!(json["waypoints"][2]["label"], "Warehouse 1 (Return)");
    assert_eq!(json["input_data"]["constraints"]["traffic_enabled"], true);
    assert_eq!(json["id"], stored.id.to_string());
}

// ============================================================================
// Status Tracking
// ============================================================================

#[test]
fn test_status_latest_and_history() {
    let tracker = StatusTracker::new(InMemoryStatusStore::new());

    tracker
        .record_at(StatusUpdate::new("r1", "101", DeliveryStatus::Pending), day(1))
        .unwrap();
    tracker
        .record_at(StatusUpdate::new("r1", "101", DeliveryStatus::InTransit), day(2))
        .unwrap();
    tracker
        .record_at(StatusUpdate::new("r1", "102", DeliveryStatus::Failed), day(3))
        .unwrap();
    tracker
        .record_at(StatusUpdate::new("r2", "101", DeliveryStatus::Delivered), day(4))
        .unwrap();

    let latest = tracker.latest("r1", "101").unwrap().unwrap();
    assert_eq!(latest.status, DeliveryStatus::InTransit);

    let history: Vec<DeliveryStatus> =
        tracker.history("r1").unwrap().iter().map(|e| e.status).collect();
    assert_eq!(
        history,
        vec![DeliveryStatus::Failed, DeliveryStatus::InTransit, DeliveryStatus::Pending]
    );
    assert!(tracker.latest("r1", "999").unwrap().is_none());
}

#[test]
fn test_status_rejects_empty_ids() {
    let tracker = StatusTracker::new(InMemoryStatusStore::new());
    let result = tracker.record(StatusUpdate::new("", "101", DeliveryStatus::Pending));

    assert!(matches!(result, Err(PlannerError::InvalidRequest(_))));
    assert!(tracker.history("").unwrap().is_empty());
}

#[test]
fn test_status_update_from_webhook_json() {
    let body = r#"{
        "route_id": "r1",
        "order_id": "101",
        "status": "delivered",
        "metadata": {"location": {"lat": 40.7157, "lng": -74.0152}, "notes": "left at door"}
    }"#;
    let update: StatusUpdate = serde_json::from_str(body).unwrap();
    let tracker = StatusTracker::new(InMemoryStatusStore::new());

    let event = tracker.record(update).unwrap();
    assert_eq!(event.status, DeliveryStatus::Delivered);
    assert_eq!(event.metadata.unwrap().notes.as_deref(), Some("left at door"));
}

// ============================================================================
// Analytics
// ============================================================================

fn delivered(route: &str, order: &str, estimated: &str, actual: &str) -> StatusUpdate {
    StatusUpdate::new(route, order, DeliveryStatus::Delivered).with_metadata(StatusMetadata {
        estimated_arrival: Some(estimated.to_string()),
        actual_arrival: Some(actual.to_string()),
        ..StatusMetadata::default()
    })
}

#[test]
fn test_analytics_over_range() {
    let routes = Arc::new(InMemoryRouteStore::new());
    let statuses = Arc::new(InMemoryStatusStore::new());
    let service = RoutePlanningService::new(routes.clone(), PlannerConfig::default());
    let tracker = StatusTracker::new(statuses.clone());

    let short = RequestBuilder::new().order("a", 1, &DELIVERIES[0]).vehicle("v1").build();
    let first = service.optimize_at(short.clone(), day(2)).unwrap();
    let second = service.optimize_at(short.clone(), day(3)).unwrap();
    // Outside the range.
    service.optimize_at(city_request(), day(20)).unwrap();

    tracker
        .record_at(delivered("r", "1", "2024-03-02T10:00:00Z", "2024-03-02T09:50:00Z"), day(2))
        .unwrap();
    tracker
        .record_at(delivered("r", "2", "2024-03-02T10:00:00Z", "2024-03-02T10:30:00Z"), day(2))
        .unwrap();
    tracker
        .record_at(StatusUpdate::new("r", "3", DeliveryStatus::Failed), day(3))
        .unwrap();
    tracker
        .record_at(StatusUpdate::new("r", "4", DeliveryStatus::InTransit), day(4))
        .unwrap();

    let policy = SavingsPolicy::default();
    let report =
        RouteAnalytics::for_range(routes.as_ref(), statuses.as_ref(), day(1), day(5), &policy)
            .unwrap();

    assert_eq!(report.total_routes, 2);
    assert_eq!(report.total_distance, first.plan.total_distance + second.plan.total_distance);
    assert_eq!(report.average_route_time, "0h 3m");
    assert_eq!(report.total_deliveries, 4);
    assert_eq!(report.delivery_success_rate, 50.0);
    assert_eq!(report.on_time_deliveries, 1);
    assert_eq!(report.delayed_deliveries, 1);
    assert_eq!(report.failed_deliveries, 1);

    // 3.4 km * 0.3 L/km = 1.02 L
    assert_eq!(report.fuel_savings, 0.23);
    assert_eq!(report.co2_savings, 0.35);
}

#[test]
fn test_analytics_range_is_inclusive() {
    let routes = InMemoryRouteStore::new();
    let statuses = InMemoryStatusStore::new();
    let service = RoutePlanningService::new(Arc::new(routes), PlannerConfig::default());

    service.optimize_at(city_request(), day(1)).unwrap();
    service.optimize_at(city_request(), day(1) + Duration::days(1)).unwrap();

    let report = RouteAnalytics::for_range(
        service.repository().as_ref(),
        &statuses,
        day(1),
        day(2),
        &SavingsPolicy::default(),
    )
    .unwrap();
    assert_eq!(report.total_routes, 2);
    assert_eq!(report.total_deliveries, 0);
    assert_eq!(report.delivery_success_rate, 0.0);
}
