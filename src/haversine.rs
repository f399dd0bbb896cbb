//! Great-circle distance and straight-line travel-time estimates.
//!
//! Distances ignore roads entirely; travel times assume a constant city
//! speed of 30 km/h.

use crate::model::Coordinate;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Kilometers covered per minute at [`DEFAULT_SPEED_KMH`].
const KM_PER_MINUTE: f64 = DEFAULT_SPEED_KMH / 60.0;

/// Haversine distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Travel minutes for a single leg, rounded to the nearest minute.
pub fn leg_minutes(km: f64) -> i64 {
    (km / KM_PER_MINUTE).round() as i64
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
