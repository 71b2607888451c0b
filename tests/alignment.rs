//! Tests for alignment, redistribution and orientation through the public API

use track_aligner::geo_utils::{distance, haversine_distance};
use track_aligner::{align, alignment_similarity, is_reversed, redistribute, GpsPoint};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn sample_route() -> Vec<GpsPoint> {
    vec![
        GpsPoint::with_elevation(51.5074, -0.1278, 11.0),
        GpsPoint::with_elevation(51.5080, -0.1290, 14.0),
        GpsPoint::with_elevation(51.5090, -0.1300, 19.0),
        GpsPoint::with_elevation(51.5100, -0.1310, 17.0),
        GpsPoint::with_elevation(51.5110, -0.1320, 22.0),
    ]
}

/// Same corridor as `sample_route`, logged by a noisier device at a different rate.
fn noisy_route() -> Vec<GpsPoint> {
    vec![
        GpsPoint::with_elevation(51.50742, -0.12781, 12.0),
        GpsPoint::with_elevation(51.50771, -0.12841, 13.0),
        GpsPoint::with_elevation(51.50803, -0.12902, 15.0),
        GpsPoint::with_elevation(51.50952, -0.13049, 18.0),
        GpsPoint::with_elevation(51.51098, -0.13199, 21.0),
    ]
}

fn assert_well_formed(aligned1: &[Option<GpsPoint>], aligned2: &[Option<GpsPoint>]) {
    assert_eq!(aligned1.len(), aligned2.len());
    for (a, b) in aligned1.iter().zip(aligned2) {
        assert!(a.is_some() || b.is_some());
    }
}

#[test]
fn test_distance_properties() {
    let route = sample_route();
    for p in &route {
        assert!(approx_eq(distance(p, p, true), 0.0, 1e-6));
    }
    for a in &route {
        for b in &route {
            assert!(approx_eq(distance(a, b, true), distance(b, a, true), 1e-9));
            assert!(approx_eq(distance(a, b, false), distance(b, a, false), 1e-9));
        }
    }
}

#[test]
fn test_alignments_are_well_formed() {
    let tracks = [sample_route(), noisy_route()];
    for t1 in &tracks {
        for t2 in &tracks {
            for gap in [-100.0, -10.0, -1.0, 0.0, 5.0] {
                for use_elevation in [false, true] {
                    let alignment = align(t1, t2, gap, use_elevation).unwrap();
                    assert_well_formed(&alignment.aligned1, &alignment.aligned2);

                    // Dropping gaps gives back the input tracks in order
                    let back1: Vec<GpsPoint> =
                        alignment.aligned1.iter().flatten().copied().collect();
                    let back2: Vec<GpsPoint> =
                        alignment.aligned2.iter().flatten().copied().collect();
                    assert_eq!(&back1, t1);
                    assert_eq!(&back2, t2);
                }
            }
        }
    }
}

#[test]
fn test_self_alignment_is_perfect_for_non_positive_gaps() {
    let route = sample_route();
    for gap in [-50.0, -10.0, -0.5, 0.0] {
        let alignment = align(&route, &route, gap, true).unwrap();
        assert_eq!(alignment.similarity().unwrap(), 1.0);
        let expected: Vec<Option<GpsPoint>> = route.iter().copied().map(Some).collect();
        assert_eq!(alignment.aligned1, expected);
        assert_eq!(alignment.aligned2, expected);
    }
}

#[test]
fn test_noisy_copy_aligns_with_generous_cutoff() {
    let alignment = align(&sample_route(), &noisy_route(), -40.0, false).unwrap();
    assert!(alignment.similarity().unwrap() >= 0.6);

    let strict = align(&sample_route(), &noisy_route(), -1.0, false).unwrap();
    assert!(strict.similarity().unwrap() < alignment.similarity().unwrap());
}

#[test]
fn test_gap_scenario_from_three_points() {
    let track1 = vec![
        GpsPoint::new(0.0, 0.0),
        GpsPoint::new(0.0, 1.0),
        GpsPoint::new(0.0, 2.0),
    ];
    let track2 = vec![GpsPoint::new(0.0, 0.0), GpsPoint::new(0.0, 2.0)];

    let alignment = align(&track1, &track2, -1.0, false).unwrap();
    assert_eq!(alignment.aligned2, vec![Some(track2[0]), None, Some(track2[1])]);
    assert!(approx_eq(alignment.similarity().unwrap(), 2.0 / 3.0, 1e-12));
    assert!(approx_eq(
        alignment_similarity(&track1, &track2, -1.0, false).unwrap(),
        2.0 / 3.0,
        1e-12
    ));
}

#[test]
fn test_single_point_track_yields_length_n() {
    let route = sample_route();
    let single = vec![GpsPoint::new(51.5091, -0.1301)];

    let alignment = align(&single, &route, -50.0, false).unwrap();
    assert_eq!(alignment.len(), route.len());
    assert_eq!(alignment.matched_count(), 1);
    // Matched against the closest point of the route
    let idx = alignment.aligned1.iter().position(Option::is_some).unwrap();
    assert_eq!(alignment.aligned2[idx], Some(route[2]));
}

#[test]
fn test_reversed_scenario() {
    let track1 = vec![GpsPoint::new(0.0, 0.0), GpsPoint::new(0.0, 1.0)];
    let track2 = vec![GpsPoint::new(0.0, 1.0), GpsPoint::new(0.0, 0.0)];
    assert!(is_reversed(&track1, &track2, 2).unwrap());
    assert!(!is_reversed(&track1, &track1, 2).unwrap());
}

#[test]
fn test_redistribution_keeps_endpoints() {
    let route = sample_route();
    for spacing in [1.0, 15.0, 60.0, 1000.0] {
        let even = redistribute(&route, spacing).unwrap();
        assert_eq!(even[0], route[0]);
        assert_eq!(even[even.len() - 1], route[route.len() - 1]);
    }
}

#[test]
fn test_redistribution_spacing_along_winding_route() {
    let route = sample_route();
    let even = redistribute(&route, 15.0).unwrap();

    // Consecutive synthesized points are never farther apart than the spacing
    for w in even.windows(2) {
        assert!(haversine_distance(&w[0], &w[1]) <= 15.0 + 1e-3);
    }
    assert!(even.len() > route.len());
}
