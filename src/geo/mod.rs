use serde::{Deserialize, Serialize};

const EARTH_RADIUS_MILES: f64 = 3_959.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

pub fn haversine_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    // Rounding can push near-antipodal inputs just past 1.0.
    let haversine =
        (sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng).clamp(0.0, 1.0);
    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());

    EARTH_RADIUS_MILES * central_angle
}

/// Distance between two optional points. An unknown side counts as zero
/// miles, so a van with no known position is never ruled out by range.
pub fn distance_miles(a: Option<&Coordinate>, b: Option<&Coordinate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => haversine_miles(a, b),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{distance_miles, haversine_miles, Coordinate};

    #[test]
    fn zero_distance_for_same_point() {
        let p = Coordinate::new(41.8781, -87.6298);
        assert_eq!(haversine_miles(&p, &p), 0.0);
    }

    #[test]
    fn new_york_to_los_angeles_is_around_2446_miles() {
        let new_york = Coordinate::new(40.7128, -74.0060);
        let los_angeles = Coordinate::new(34.0522, -118.2437);
        let distance = haversine_miles(&new_york, &los_angeles);
        // Road-atlas figures quote ~2451; the 3959 mi sphere gives 2445.7.
        assert!((distance - 2445.7).abs() < 1.0, "got {distance}");
    }

    #[test]
    fn missing_side_counts_as_zero() {
        let p = Coordinate::new(40.0, -75.0);
        assert_eq!(distance_miles(Some(&p), None), 0.0);
        assert_eq!(distance_miles(None, Some(&p)), 0.0);
        assert_eq!(distance_miles(None, None), 0.0);
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate { lat, lng })
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
            let ab = haversine_miles(&a, &b);
            let ba = haversine_miles(&b, &a);
            prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        }

        #[test]
        fn distance_to_self_is_zero(a in coordinate()) {
            prop_assert_eq!(haversine_miles(&a, &a), 0.0);
        }
    }
}
