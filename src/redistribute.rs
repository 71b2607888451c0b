//! Even redistribution of track points.
//!
//! Two recordings of the same path rarely share a sampling rate: one device logs every
//! second, another every ten meters. Alignment scores point against point, so the denser
//! track would otherwise dominate. Redistribution walks a track and emits a new point
//! every `spacing` meters of travelled path.
//!
//! Distances here are horizontal only; [`move_point`](crate::geo_utils::move_point)
//! changes latitude and longitude, so an elevation-aware excess could not be stepped back
//! consistently.

use crate::error::{check_track, Result, TrackAlignError, TrackId};
use crate::geo_utils::{bearing, haversine_distance, move_point};
use crate::GpsPoint;

/// A synthesized point this close to the final input point is replaced by it.
const SNAP_TOLERANCE_M: f64 = 1e-6;

pub(crate) fn check_spacing(spacing: f64) -> Result<()> {
    if spacing.is_finite() && spacing > 0.0 {
        Ok(())
    } else {
        Err(TrackAlignError::InvalidSpacing(spacing))
    }
}

/// Resample `points` so consecutive output points are `spacing` meters apart along the
/// original path.
///
/// The walk accumulates distance from the last emitted point. Once the accumulated
/// distance reaches `spacing`, the current input point is stepped back along the
/// heading of its incoming segment by the overshoot, emitted, and the accumulator
/// restarts at zero from the emitted point. The first and last input points are always
/// emitted unchanged. Synthesized points keep the elevation of the input point they were
/// derived from.
///
/// Errors: [`TrackAlignError::InvalidSpacing`] for a non-positive spacing, and
/// [`TrackAlignError::EmptyTrack`] / [`TrackAlignError::InvalidPoint`] (reported against
/// [`TrackId::First`]) for unusable input.
///
/// # Example
/// ```
/// use track_aligner::{GpsPoint, redistribute, geo_utils};
///
/// // ~1.1 km due north, sampled unevenly
/// let track = vec![
///     GpsPoint::new(51.500, -0.12),
///     GpsPoint::new(51.501, -0.12),
///     GpsPoint::new(51.504, -0.12),
///     GpsPoint::new(51.510, -0.12),
/// ];
///
/// let even = redistribute(&track, 100.0).unwrap();
/// assert_eq!(even[0], track[0]);
/// assert_eq!(even[even.len() - 1], track[3]);
/// assert!((geo_utils::haversine_distance(&even[0], &even[1]) - 100.0).abs() < 1e-3);
/// ```
pub fn redistribute(points: &[GpsPoint], spacing: f64) -> Result<Vec<GpsPoint>> {
    check_spacing(spacing)?;
    check_track(points, TrackId::First)?;

    let first = points[0];
    let last = points[points.len() - 1];
    if points.len() == 1 {
        return Ok(vec![first]);
    }

    let mut even = vec![first];
    let mut accumulated = 0.0;
    let mut restarted = true;
    let mut i = 1;

    while i < points.len() {
        let anchor = if restarted {
            even[even.len() - 1]
        } else {
            points[i - 1]
        };
        let current = points[i];
        accumulated += haversine_distance(&anchor, &current);

        if accumulated >= spacing {
            // The segment anchor -> current has positive length here, so the heading
            // is well defined.
            let heading = bearing(&anchor, &current);
            even.push(move_point(&current, -(accumulated - spacing), heading));
            accumulated = 0.0;
            restarted = true;
        } else {
            restarted = false;
            i += 1;
        }
    }

    let lands_on_last = even.len() > 1
        && haversine_distance(&even[even.len() - 1], &last) < SNAP_TOLERANCE_M;
    if lands_on_last {
        even.pop();
    }
    even.push(last);

    Ok(even)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// Points due north from (51.5, -0.12), unevenly spaced.
    fn meridian_track(offsets_deg: &[f64]) -> Vec<GpsPoint> {
        offsets_deg
            .iter()
            .map(|d| GpsPoint::new(51.5 + d, -0.12))
            .collect()
    }

    #[test]
    fn test_rejects_bad_spacing() {
        let track = meridian_track(&[0.0, 0.001]);
        assert_eq!(
            redistribute(&track, 0.0),
            Err(TrackAlignError::InvalidSpacing(0.0))
        );
        assert_eq!(
            redistribute(&track, -5.0),
            Err(TrackAlignError::InvalidSpacing(-5.0))
        );
        assert!(redistribute(&track, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_empty_track() {
        assert_eq!(
            redistribute(&[], 10.0),
            Err(TrackAlignError::EmptyTrack {
                track: TrackId::First
            })
        );
    }

    #[test]
    fn test_single_point_unchanged() {
        let p = GpsPoint::with_elevation(51.5, -0.12, 20.0);
        assert_eq!(redistribute(&[p], 10.0).unwrap(), vec![p]);
    }

    #[test]
    fn test_even_spacing_on_straight_line() {
        let track = meridian_track(&[0.0, 0.0003, 0.0011, 0.0012, 0.0040, 0.0090]);
        let even = redistribute(&track, 50.0).unwrap();

        assert_eq!(even[0], track[0]);
        assert_eq!(even[even.len() - 1], track[track.len() - 1]);

        let gaps: Vec<f64> = even
            .windows(2)
            .map(|w| haversine_distance(&w[0], &w[1]))
            .collect();
        let (tail, body) = gaps.split_last().unwrap();
        for gap in body {
            assert!(approx_eq(*gap, 50.0, 1e-3), "gap {gap}");
        }
        assert!(*tail <= 50.0 + 1e-3);
        // ~1000 m of path at 50 m spacing
        assert!(even.len() >= 20 && even.len() <= 22);
    }

    #[test]
    fn test_sparse_track_gets_intermediate_points() {
        // One 556 m segment yields points every 100 m
        let track = meridian_track(&[0.0, 0.005]);
        let even = redistribute(&track, 100.0).unwrap();
        assert_eq!(even.len(), 7);
        assert!(approx_eq(
            haversine_distance(&even[0], &even[3]),
            300.0,
            1e-3
        ));
    }

    #[test]
    fn test_already_even_track_is_stable() {
        let track: Vec<GpsPoint> = (0..12)
            .map(|i| GpsPoint::new(0.0, i as f64 * 0.001))
            .collect();
        let spacing = haversine_distance(&track[0], &track[1]);
        let even = redistribute(&track, spacing).unwrap();

        assert_eq!(even.len(), track.len());
        for (a, b) in even.iter().zip(&track) {
            assert!(haversine_distance(a, b) < 1e-4);
        }
    }

    #[test]
    fn test_duplicate_points_terminate() {
        let track = meridian_track(&[0.0, 0.0, 0.0, 0.002, 0.002, 0.002, 0.004]);
        let even = redistribute(&track, 100.0).unwrap();
        assert_eq!(even[0], track[0]);
        assert_eq!(even[even.len() - 1], track[6]);
        assert_eq!(even.len(), 6);
    }

    #[test]
    fn test_synthesized_points_keep_source_elevation() {
        let track = vec![
            GpsPoint::with_elevation(51.5, -0.12, 10.0),
            GpsPoint::with_elevation(51.505, -0.12, 80.0),
        ];
        let even = redistribute(&track, 100.0).unwrap();
        assert_eq!(even[0].elevation, Some(10.0));
        for p in &even[1..] {
            assert_eq!(p.elevation, Some(80.0));
        }
    }
}
