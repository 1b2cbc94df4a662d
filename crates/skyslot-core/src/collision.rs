//! Segment intersection and arrival-time estimation on the projected plane.

use std::collections::HashMap;

use chrono::{Duration, NaiveTime};

use crate::error::LookupError;
use crate::models::{Airport, Flight, Point};

/// Determinants below this are treated as parallel lines.
const PARALLEL_EPS: f64 = 1e-9;

/// Orientation of an ordered triplet of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of `(p, q, r)` from the sign of `(q - p) × (r - q)`.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val > 0.0 {
        Orientation::Clockwise
    } else if val < 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether `q` lies inside the bounding box of `p` and `r`.
///
/// Only meaningful once the three points are known to be collinear.
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segment `ab` intersects segment `cd` (touching and overlap included).
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(a, c, b))
        || (o2 == Orientation::Collinear && on_segment(a, d, b))
        || (o3 == Orientation::Collinear && on_segment(c, a, d))
        || (o4 == Orientation::Collinear && on_segment(c, b, d))
}

/// Intersection point of segments `ab` and `cd`.
///
/// Returns `None` when the segments do not meet, and also when they are
/// (nearly) parallel: collinear overlaps have no single crossing point.
pub fn intersection_point(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    if !segments_intersect(a, b, c, d) {
        return None;
    }

    let denom = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
    if denom.abs() < PARALLEL_EPS {
        return None;
    }

    let ab = a.x * b.y - a.y * b.x;
    let cd = c.x * d.y - c.y * d.x;
    let x = (ab * (c.x - d.x) - (a.x - b.x) * cd) / denom;
    let y = (ab * (c.y - d.y) - (a.y - b.y) * cd) / denom;
    Some(Point::new(x, y))
}

/// Look up the departure and arrival airports of a flight.
pub fn flight_endpoints<'a>(
    flight: &Flight,
    airports: &'a HashMap<String, Airport>,
) -> Result<(&'a Airport, &'a Airport), LookupError> {
    let find = |code: &str| {
        airports.get(code).ok_or_else(|| LookupError::UnknownAirport {
            flight: flight.id.clone(),
            code: code.to_string(),
        })
    };
    Ok((find(&flight.departure_airport)?, find(&flight.arrival_airport)?))
}

/// Estimated time at which `flight` reaches `point`.
///
/// Assumes constant ground speed along the straight departure→arrival
/// segment. The travel time is truncated to whole minutes. Degenerate flights
/// (zero length or zero duration) are at every point at departure time.
pub fn eta_at_point(
    point: Point,
    flight: &Flight,
    airports: &HashMap<String, Airport>,
) -> Result<NaiveTime, LookupError> {
    let (departure, arrival) = flight_endpoints(flight, airports)?;

    let total_distance = departure.position.distance_to(&arrival.position);
    let total_minutes = flight.duration.num_minutes() as f64;
    if total_distance <= f64::EPSILON || total_minutes <= 0.0 {
        return Ok(flight.departure_time);
    }

    let speed = total_distance / total_minutes;
    let minutes_to_point = departure.position.distance_to(&point) / speed;

    // NaiveTime addition wraps around midnight.
    Ok(flight.departure_time + Duration::minutes(minutes_to_point as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MRS: Point = Point::new(420.387068, 4607.15017);
    const BES: Point = Point::new(-325.555103, 4213.34092);
    const LYS: Point = Point::new(394.648936, 4429.95907);
    const BOD: Point = Point::new(-56.4286114, 4518.10228);

    fn airports() -> HashMap<String, Airport> {
        [
            ("MRS", "Marseille", MRS),
            ("BES", "Brest", BES),
            ("LYS", "Lyon", LYS),
            ("BOD", "Bordeaux", BOD),
        ]
        .into_iter()
        .map(|(code, name, pos)| (code.to_string(), Airport::at(code, name, pos)))
        .collect()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn orientation_signs() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(1.0, 1.0);
        assert_eq!(orientation(p, q, Point::new(2.0, 2.0)), Orientation::Collinear);
        assert_eq!(orientation(p, q, Point::new(2.0, 0.0)), Orientation::Clockwise);
        assert_eq!(
            orientation(p, q, Point::new(0.0, 2.0)),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn crossing_segments_intersect() {
        let point = intersection_point(MRS, BES, LYS, BOD).expect("segments cross");
        assert!((point.x - 168.472108).abs() < 1e-5);
        assert!((point.y - 4474.15535).abs() < 1e-5);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let c = Point::new(0.0, 1.0);
        let d = Point::new(10.0, 1.0);
        assert!(!segments_intersect(a, b, c, d));
        assert!(intersection_point(a, b, c, d).is_none());
    }

    #[test]
    fn collinear_overlap_is_detected_but_has_no_single_point() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let c = Point::new(5.0, 0.0);
        let d = Point::new(15.0, 0.0);
        assert!(segments_intersect(a, b, c, d));
        assert!(intersection_point(a, b, c, d).is_none());
    }

    #[test]
    fn touching_endpoint_counts_as_intersection() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 4.0);
        let c = Point::new(4.0, 4.0);
        let d = Point::new(8.0, 0.0);
        let point = intersection_point(a, b, c, d).unwrap();
        assert!((point.x - 4.0).abs() < 1e-9);
        assert!((point.y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn eta_at_intersection() {
        let airports = airports();
        let point = Point::new(168.472108, 4474.15535);
        let af90 = Flight::new("AF000090", "MRS", "BES", hm(7, 33), Duration::minutes(81));
        let af132 = Flight::new("AF000132", "LYS", "BOD", hm(7, 34), Duration::minutes(47));

        assert_eq!(eta_at_point(point, &af90, &airports).unwrap(), hm(8, 0));
        assert_eq!(eta_at_point(point, &af132, &airports).unwrap(), hm(7, 57));
    }

    #[test]
    fn eta_with_unknown_airport_fails() {
        let airports = airports();
        let flight = Flight::new("X1", "MRS", "CDG", hm(7, 0), Duration::minutes(60));
        let err = eta_at_point(MRS, &flight, &airports).unwrap_err();
        assert_eq!(
            err,
            LookupError::UnknownAirport {
                flight: "X1".into(),
                code: "CDG".into()
            }
        );
    }

    #[test]
    fn eta_of_zero_duration_flight_is_departure() {
        let airports = airports();
        let flight = Flight::new("X2", "MRS", "BES", hm(23, 50), Duration::zero());
        assert_eq!(eta_at_point(BES, &flight, &airports).unwrap(), hm(23, 50));
    }

    #[test]
    fn eta_wraps_past_midnight() {
        let airports = airports();
        let flight = Flight::new("X3", "MRS", "BES", hm(23, 50), Duration::minutes(30));
        assert_eq!(eta_at_point(BES, &flight, &airports).unwrap(), hm(0, 20));
    }
}
