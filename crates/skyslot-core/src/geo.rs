//! Geographic conversions: DMS parsing and the planar projection.

use crate::error::CoordinateError;
use crate::models::Point;

/// Earth radius approximation in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Convert a degree/minute/second coordinate to decimal degrees.
///
/// Degrees and minutes are integers, seconds may carry a fraction.
/// `S` and `O` (ouest) negate the result.
///
/// # Arguments
/// * `degrees`, `minutes`, `seconds` - Raw textual components
/// * `direction` - One of `N`, `S`, `E`, `O`
pub fn dms_to_decimal(
    degrees: &str,
    minutes: &str,
    seconds: &str,
    direction: &str,
) -> Result<f64, CoordinateError> {
    let integer = |s: &str| s.parse::<i64>().ok().map(|v| v as f64);
    let degrees = parse_component("degrees", degrees, integer)?;
    let minutes = parse_component("minutes", minutes, integer)?;
    let seconds = parse_component("seconds", seconds, |s| {
        s.parse::<f64>().ok().filter(|v| v.is_finite())
    })?;

    let direction = direction.trim();
    if direction.is_empty() {
        return Err(CoordinateError::Missing("direction"));
    }
    let sign = match direction {
        "N" | "E" => 1.0,
        "S" | "O" => -1.0,
        other => return Err(CoordinateError::Direction(other.to_string())),
    };

    Ok(sign * (degrees + minutes / 60.0 + seconds / 3600.0))
}

fn parse_component(
    component: &'static str,
    raw: &str,
    parse: impl Fn(&str) -> Option<f64>,
) -> Result<f64, CoordinateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoordinateError::Missing(component));
    }
    parse(raw).ok_or_else(|| CoordinateError::NotNumeric {
        component,
        value: raw.to_string(),
    })
}

/// Project decimal latitude/longitude onto the plane.
///
/// `x = R·cos(lat)·sin(lon)`, `y = R·cos(lat)·cos(lon)`. Only meaningful for
/// short-range intersection geometry.
pub fn geo_to_planar(latitude_deg: f64, longitude_deg: f64) -> Point {
    let lat = latitude_deg.to_radians();
    let lon = longitude_deg.to_radians();
    Point::new(
        EARTH_RADIUS_KM * lat.cos() * lon.sin(),
        EARTH_RADIUS_KM * lat.cos() * lon.cos(),
    )
}

/// Inverse of [`geo_to_planar`].
///
/// The projection folds both hemispheres onto the same disc, so the returned
/// latitude is always the non-negative magnitude.
pub fn planar_to_geo(point: Point) -> (f64, f64) {
    let radius = (point.x * point.x + point.y * point.y).sqrt();
    let cos_lat = (radius / EARTH_RADIUS_KM).clamp(0.0, 1.0);
    let latitude = cos_lat.acos().to_degrees();
    let longitude = point.x.atan2(point.y).to_degrees();
    (latitude, longitude)
}
