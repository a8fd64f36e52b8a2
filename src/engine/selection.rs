use serde::Serialize;

use crate::geo::{distance_miles, Coordinate};
use crate::models::van::Van;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    NearestInRange,
    FallbackOutOfRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    pub van: &'a Van,
    pub distance_miles: f64,
    pub reason: RecommendationReason,
}

/// Picks the closest available van whose service radius covers the job.
/// When no available van covers it, the first available van is returned.
pub fn select_nearest_van<'a>(
    job_location: Option<&Coordinate>,
    vans: &'a [Van],
) -> Option<&'a Van> {
    recommend_van(job_location, vans).map(|recommendation| recommendation.van)
}

pub fn recommend_van<'a>(
    job_location: Option<&Coordinate>,
    vans: &'a [Van],
) -> Option<Recommendation<'a>> {
    let available: Vec<&Van> = vans
        .iter()
        .filter(|van| van.status.is_assignable())
        .collect();

    let first_available = *available.first()?;
    let job_location = job_location?;

    let nearest_in_range = available
        .iter()
        .map(|&van| (van, distance_miles(van.reference_location(), Some(job_location))))
        .filter(|(van, distance)| within_service_area(van, *distance))
        .fold(None::<(&Van, f64)>, |best, candidate| match best {
            Some(current) if current.1 <= candidate.1 => Some(current),
            _ => Some(candidate),
        });

    match nearest_in_range {
        Some((van, distance)) => Some(Recommendation {
            van,
            distance_miles: distance,
            reason: RecommendationReason::NearestInRange,
        }),
        None => Some(Recommendation {
            van: first_available,
            distance_miles: distance_miles(
                first_available.reference_location(),
                Some(job_location),
            ),
            reason: RecommendationReason::FallbackOutOfRange,
        }),
    }
}

fn within_service_area(van: &Van, distance: f64) -> bool {
    if van.reference_location().is_none() {
        return true;
    }

    match &van.service_area {
        Some(area) => distance <= area.radius_miles,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::{recommend_van, select_nearest_van, RecommendationReason};
    use crate::engine::testing::{van, van_at};
    use crate::geo::{haversine_miles, Coordinate};
    use crate::models::van::VanStatus;

    const JOB: Coordinate = Coordinate { lat: 40.0, lng: -75.0 };

    // Roughly 69 miles per degree of latitude.
    fn north_of_job(miles: f64) -> Coordinate {
        Coordinate {
            lat: JOB.lat + miles / 69.09,
            lng: JOB.lng,
        }
    }

    #[test]
    fn picks_the_closest_van_in_range() {
        let vans = vec![
            van_at("five", VanStatus::Available, north_of_job(5.0), 50.0),
            van_at("two", VanStatus::Available, north_of_job(2.0), 50.0),
            van_at("eight", VanStatus::Available, north_of_job(8.0), 50.0),
        ];

        let chosen = select_nearest_van(Some(&JOB), &vans).unwrap();

        assert_eq!(chosen.id, "two");
    }

    #[test]
    fn falls_back_to_first_available_when_nothing_in_range() {
        let vans = vec![van_at("far", VanStatus::Available, north_of_job(30.0), 10.0)];

        let recommendation = recommend_van(Some(&JOB), &vans).unwrap();

        assert_eq!(recommendation.van.id, "far");
        assert_eq!(recommendation.reason, RecommendationReason::FallbackOutOfRange);
        assert!(recommendation.distance_miles > 10.0);
    }

    #[test]
    fn fallback_keeps_input_order() {
        let vans = vec![
            van_at("offline", VanStatus::Offline, north_of_job(1.0), 50.0),
            van_at("first", VanStatus::Available, north_of_job(40.0), 5.0),
            van_at("second", VanStatus::Available, north_of_job(20.0), 5.0),
        ];

        let chosen = select_nearest_van(Some(&JOB), &vans).unwrap();

        assert_eq!(chosen.id, "first");
    }

    #[test]
    fn no_available_vans_yields_none() {
        let vans = vec![
            van_at("busy", VanStatus::OnJob, north_of_job(1.0), 50.0),
            van_at("shop", VanStatus::Maintenance, north_of_job(1.0), 50.0),
        ];

        assert!(select_nearest_van(Some(&JOB), &vans).is_none());
        assert!(select_nearest_van(Some(&JOB), &[]).is_none());
    }

    #[test]
    fn missing_job_location_yields_none() {
        let vans = vec![van_at("a", VanStatus::Available, north_of_job(1.0), 50.0)];

        assert!(select_nearest_van(None, &vans).is_none());
    }

    #[test]
    fn ties_go_to_the_first_encountered_van() {
        let vans = vec![
            van_at("left", VanStatus::Available, north_of_job(3.0), 50.0),
            van_at("right", VanStatus::Available, north_of_job(3.0), 50.0),
        ];

        let chosen = select_nearest_van(Some(&JOB), &vans).unwrap();

        assert_eq!(chosen.id, "left");
    }

    #[test]
    fn van_without_location_counts_as_in_range_at_zero_miles() {
        let vans = vec![
            van_at("near", VanStatus::Available, north_of_job(1.0), 50.0),
            van("unknown", VanStatus::Available, &[], None),
        ];

        let recommendation = recommend_van(Some(&JOB), &vans).unwrap();

        assert_eq!(recommendation.van.id, "unknown");
        assert_eq!(recommendation.distance_miles, 0.0);
        assert_eq!(recommendation.reason, RecommendationReason::NearestInRange);
    }

    #[test]
    fn service_area_center_stands_in_for_unknown_position() {
        let mut parked = van_at("parked", VanStatus::Available, north_of_job(4.0), 10.0);
        parked.current_location = None;
        let moving = van_at("moving", VanStatus::Available, north_of_job(6.0), 10.0);
        let vans = vec![moving, parked];

        let recommendation = recommend_van(Some(&JOB), &vans).unwrap();

        assert_eq!(recommendation.van.id, "parked");
        let expected = haversine_miles(&north_of_job(4.0), &JOB);
        assert!((recommendation.distance_miles - expected).abs() < 1e-9);
    }
}
