//! Route construction engine.
//!
//! Turns an [`OptimizeRequest`] into a [`RoutePlan`] by sequencing orders by
//! priority, alternating them between the first two vehicles and measuring
//! the depot-to-depot tour with straight-line distances. The output is a pure
//! function of the input: no I/O, no clock, no randomness.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::haversine::{DEFAULT_SPEED_KMH, haversine_km, leg_minutes, round1};
use crate::model::{Depot, OptimizeRequest, Order, Vehicle};
use crate::plan::{
    EstimatedTime, OrderDetails, RoutePlan, RouteStop, Step, StepEndpoint, Waypoint, WaypointKind,
};
use crate::polyline::Polyline;

/// First planned arrival, in minutes from midnight (09:30).
const FIRST_ARRIVAL_MINUTES: i64 = 9 * 60 + 30;

/// Offset of the second arrival within each hour slot.
const ODD_SLOT_OFFSET_MINUTES: i64 = 45;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Builds route plans from optimization requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteBuilder;

impl RouteBuilder {
    /// Validates the request and builds its plan.
    pub fn build(request: &OptimizeRequest) -> Result<RoutePlan> {
        request.validate()?;
        Self::build_unchecked(request)
    }

    /// Builds a plan without coordinate validation.
    ///
    /// Non-finite coordinates propagate into non-finite distances. Empty
    /// orders, vehicles or depots are still rejected.
    pub fn build_unchecked(request: &OptimizeRequest) -> Result<RoutePlan> {
        let depot = request
            .depots
            .first()
            .ok_or_else(|| PlannerError::invalid("No depots provided"))?;
        if request.vehicles.is_empty() {
            return Err(PlannerError::invalid("No vehicles provided"));
        }
        if request.orders.is_empty() {
            return Err(PlannerError::invalid("No orders provided"));
        }

        let sorted = sort_by_priority(&request.orders);
        let optimized_route = sorted
            .iter()
            .enumerate()
            .map(|(index, order)| RouteStop {
                order_id: order.id.clone(),
                vehicle_id: assign_vehicle(&request.vehicles, index).id.clone(),
                arrival_time: arrival_time(index),
                order_details: OrderDetails {
                    address: order.address.clone(),
                    priority: order.priority,
                    time_window: order.time_window.clone(),
                },
            })
            .collect();

        let waypoints = build_waypoints(depot, &sorted);
        let total_distance = round1(tour_distance_km(&waypoints));
        let estimated_time = estimated_time(total_distance).to_string();
        let points = waypoints.iter().map(|w| w.coordinate().as_tuple()).collect();
        let route_polyline = Polyline::new(points).to_string();
        let steps = build_steps(&waypoints);

        debug!(
            orders = request.orders.len(),
            vehicles = request.vehicles.len(),
            total_distance,
            estimated_time = %estimated_time,
            "built route plan"
        );

        Ok(RoutePlan {
            optimized_route,
            total_distance,
            estimated_time,
            waypoints,
            route_polyline,
            steps,
        })
    }

    /// Builds plans for independent requests in parallel.
    ///
    /// Results are returned in input order.
    pub fn build_batch(requests: &[OptimizeRequest]) -> Vec<Result<RoutePlan>> {
        requests.par_iter().map(Self::build).collect()
    }
}

/// Stable sort by ascending priority; ties keep input order.
fn sort_by_priority(orders: &[Order]) -> Vec<&Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by_key(|order| order.priority);
    sorted
}

/// Round-robin-by-two: even positions go to the first vehicle, odd positions
/// to the second when there is one.
fn assign_vehicle(vehicles: &[Vehicle], index: usize) -> &Vehicle {
    if index % 2 == 1 {
        if let Some(second) = vehicles.get(1) {
            return second;
        }
    }
    &vehicles[0]
}

/// Planned arrival for the order at sorted position `index`.
///
/// Hour = 9 + index/2, minute = 30 + (index%2)*45. Minutes past 59 carry
/// into the hour and hours wrap at midnight, so index 1 is `10:15:00`.
pub fn arrival_time(index: usize) -> String {
    let index = index as i64;
    let minutes = FIRST_ARRIVAL_MINUTES + (index / 2) * 60 + (index % 2) * ODD_SLOT_OFFSET_MINUTES;
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY);

    format!("{:02}:{:02}:00", minutes / 60, minutes % 60)
}

/// Whole-route duration at the constant city speed.
///
/// Minutes are rounded independently of hours, so `60m` can appear.
pub fn estimated_time(distance_km: f64) -> EstimatedTime {
    let total_hours = distance_km / DEFAULT_SPEED_KMH;
    let hours = total_hours.floor();
    let minutes = ((total_hours - hours) * 60.0).round();
    EstimatedTime::new(hours as i64, minutes as i64)
}

fn build_waypoints(depot: &Depot, sorted: &[&Order]) -> Vec<Waypoint> {
    let mut waypoints = Vec::with_capacity(sorted.len() + 2);

    waypoints.push(depot_waypoint(depot, depot.name.clone()));
    for (index, order) in sorted.iter().enumerate() {
        waypoints.push(Waypoint {
            label: format!("Stop {}: {}", index + 1, order.address),
            lat: order.location.lat,
            lng: order.location.lng,
            kind: WaypointKind::Delivery,
            order_id: Some(order.id.clone()),
            priority: Some(order.priority),
        });
    }
    waypoints.push(depot_waypoint(depot, format!("{} (Return)", depot.name)));

    waypoints
}

fn depot_waypoint(depot: &Depot, label: String) -> Waypoint {
    Waypoint {
        label,
        lat: depot.location.lat,
        lng: depot.location.lng,
        kind: WaypointKind::Depot,
        order_id: None,
        priority: None,
    }
}

/// Unrounded sum of consecutive leg distances.
fn tour_distance_km(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| haversine_km(pair[0].coordinate(), pair[1].coordinate()))
        .sum()
}

fn build_steps(waypoints: &[Waypoint]) -> Vec<Step> {
    waypoints
        .windows(2)
        .map(|pair| {
            let (current, next) = (&pair[0], &pair[1]);
            let km = haversine_km(current.coordinate(), next.coordinate());
            Step {
                instruction: format!("Travel from {} to {}", current.label, next.label),
                distance: round1(km),
                duration: format!("{}m", leg_minutes(km)),
                from: StepEndpoint::from(current),
                to: StepEndpoint::from(next),
            }
        })
        .collect()
}
