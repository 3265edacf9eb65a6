//! Great-circle distance, travel-time estimates and the synthetic path drawn
//! for approximate routes. Everything here is pure.

use std::f64::consts::PI;

use geo_types::Coord;

use crate::entities::{Coordinates, TransportType};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

const MIN_PATH_POINTS: usize = 3;
const MAX_PATH_POINTS: usize = 10;
const KM_PER_PATH_POINT: f64 = 10.0;

pub fn haversine_distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Average speed used for estimates, in km/h.
pub fn average_speed_kmh(transport_type: TransportType) -> f64 {
    match transport_type {
        TransportType::Foot => 5.0,
        TransportType::Bicycle => 15.0,
        TransportType::PublicTransport => 25.0,
        TransportType::Car => 50.0,
    }
}

pub fn estimate_duration_hours(distance_km: f64, transport_type: TransportType) -> f64 {
    distance_km / average_speed_kmh(transport_type)
}

/// Lateral wobble applied to interior path points as `(lat amplitude, lon factor)`.
fn wobble(transport_type: TransportType) -> (f64, f64) {
    match transport_type {
        TransportType::Car | TransportType::PublicTransport => (0.01, 0.5),
        TransportType::Bicycle => (0.005, 0.3),
        TransportType::Foot => (0.0, 0.0),
    }
}

pub fn path_point_count(distance_km: f64) -> usize {
    let per_distance = (distance_km / KM_PER_PATH_POINT).floor();
    if !per_distance.is_finite() {
        return MIN_PATH_POINTS;
    }

    (per_distance.max(0.0) as usize).clamp(MIN_PATH_POINTS, MAX_PATH_POINTS)
}

/// A plausible-looking path from `from` to `to`, for map display only.
///
/// Points are evenly spaced along the straight line, with interior points
/// pushed sideways by `sin(pi * ratio)` so the line bows like a road. The
/// endpoints are exactly `from` and `to`.
pub fn interpolated_path(
    from: Coordinates,
    to: Coordinates,
    transport_type: TransportType,
) -> Vec<Coordinates> {
    let n = path_point_count(haversine_distance_km(from, to));
    let (amplitude, lon_factor) = wobble(transport_type);

    let start: Coord<f64> = from.into();
    let end: Coord<f64> = to.into();
    let step = end - start;

    let mut path = Vec::with_capacity(n);
    path.push(from);

    for i in 1..n - 1 {
        let ratio = i as f64 / (n - 1) as f64;
        let offset = (ratio * PI).sin() * amplitude;

        let point = start + step * ratio + Coord { x: offset * lon_factor, y: offset };
        path.push(point.into());
    }

    path.push(to);
    path
}
