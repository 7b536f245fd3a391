//! Great-circle distance and nearest-hospital ranking.
//!
//! Query coordinates are deliberately not range-validated: an out-of-range
//! point still produces a finite (if degenerate) ranking rather than a
//! failure, matching the directory's tolerant contract.

use crate::domain::hospital::{Hospital, RankedHospital};

/// Mean Earth radius used by the Haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Upper bound on ranked results returned by [`rank_nearest`].
pub const MAX_RANKED_RESULTS: usize = 10;

/// Great-circle distance between two coordinate pairs, in kilometres.
///
/// Haversine with all angles in radians:
/// `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`,
/// `d = 2·R·asin(√a)`.
///
/// # Examples
/// ```
/// use lifeline_backend::domain::proximity::haversine_distance_km;
///
/// let d = haversine_distance_km(6.5244, 3.3792, 6.5964, 3.3486);
/// assert!((d - 8.690_392_088_867).abs() < 1e-6);
/// ```
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Rank `hospitals` by ascending distance from `(latitude, longitude)`.
///
/// When `only_available` is set, hospitals with zero available beds are
/// dropped before the result is truncated, so a fully-booked facility never
/// crowds out a usable one. The sort is stable: equal distances keep their
/// input order. At most [`MAX_RANKED_RESULTS`] entries are returned.
pub fn rank_nearest(
    latitude: f64,
    longitude: f64,
    hospitals: &[Hospital],
    only_available: bool,
) -> Vec<RankedHospital> {
    let mut ranked: Vec<RankedHospital> = hospitals
        .iter()
        .filter(|hospital| !only_available || hospital.available_beds > 0)
        .map(|hospital| RankedHospital {
            distance_km: haversine_distance_km(
                latitude,
                longitude,
                hospital.latitude,
                hospital.longitude,
            ),
            hospital: hospital.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(MAX_RANKED_RESULTS);
    ranked
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn hospital(id: &str, latitude: f64, longitude: f64, available_beds: u32) -> Hospital {
        Hospital {
            id: id.to_owned(),
            name: format!("{id} General"),
            address: "1 Test Road".to_owned(),
            lga: "Ikeja".to_owned(),
            available_beds,
            expertise: vec!["Emergency".to_owned()],
            phone: "01-000-0000".to_owned(),
            latitude,
            longitude,
        }
    }

    #[rstest]
    // Closed-form references computed independently of this implementation.
    #[case(6.5244, 3.3792, 6.5964, 3.3486, 8.690_392_088_867_13)]
    #[case(6.5244, 3.3792, 6.4541, 3.3947, 8.002_382_448_464_417)]
    #[case(0.0, 0.0, 0.0, 1.0, 111.194_926_644_558_73)]
    fn distances_match_closed_form_references(
        #[case] lat1: f64,
        #[case] lon1: f64,
        #[case] lat2: f64,
        #[case] lon2: f64,
        #[case] expected_km: f64,
    ) {
        let actual = haversine_distance_km(lat1, lon1, lat2, lon2);
        assert!(
            (actual - expected_km).abs() < 1e-6,
            "expected {expected_km} km, got {actual} km"
        );
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_distance_km(6.5244, 3.3792, 6.5244, 3.3792).abs() < 1e-12);
    }

    #[test]
    fn ranking_is_monotonic_by_distance() {
        let hospitals = vec![
            hospital("far", 6.6198, 3.5073, 5),
            hospital("near", 6.5533, 3.3786, 5),
            hospital("mid", 6.4541, 3.3947, 5),
        ];
        let ranked = rank_nearest(6.5244, 3.3792, &hospitals, false);
        let ids: Vec<&str> = ranked.iter().map(|r| r.hospital.id.as_str()).collect();
        assert_eq!(ids, ["near", "mid", "far"]);
        assert!(
            ranked
                .windows(2)
                .all(|pair| pair[0].distance_km <= pair[1].distance_km)
        );
    }

    #[test]
    fn results_are_truncated_to_the_cap() {
        let hospitals: Vec<Hospital> = (0..25)
            .map(|i| hospital(&format!("h{i}"), 6.5 + f64::from(i) * 0.01, 3.4, 5))
            .collect();
        let ranked = rank_nearest(6.5244, 3.3792, &hospitals, false);
        assert_eq!(ranked.len(), MAX_RANKED_RESULTS);
    }

    #[test]
    fn availability_filter_drops_full_hospitals_before_truncation() {
        // The nearest hospital has no beds; with the filter it must vanish
        // entirely rather than occupy a slot.
        let mut hospitals = vec![hospital("full-but-near", 6.5244, 3.3792, 0)];
        hospitals.extend((0..12).map(|i| {
            hospital(&format!("open{i}"), 6.6 + f64::from(i) * 0.01, 3.4, 3)
        }));

        let unfiltered = rank_nearest(6.5244, 3.3792, &hospitals, false);
        assert_eq!(unfiltered[0].hospital.id, "full-but-near");

        let filtered = rank_nearest(6.5244, 3.3792, &hospitals, true);
        assert_eq!(filtered.len(), MAX_RANKED_RESULTS);
        assert!(
            filtered
                .iter()
                .all(|r| r.hospital.id != "full-but-near" && r.hospital.available_beds > 0)
        );
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let hospitals = vec![
            hospital("first", 6.6, 3.4, 5),
            hospital("second", 6.6, 3.4, 5),
            hospital("third", 6.6, 3.4, 5),
        ];
        let ranked = rank_nearest(6.5244, 3.3792, &hospitals, false);
        let ids: Vec<&str> = ranked.iter().map(|r| r.hospital.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn degenerate_query_points_still_produce_finite_results() {
        let hospitals = vec![hospital("h", 6.5964, 3.3486, 5)];
        let ranked = rank_nearest(400.0, -720.0, &hospitals, false);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].distance_km.is_finite());
    }
}
