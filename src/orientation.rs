//! Detection of tracks recorded in opposite directions.
//!
//! An out-and-back route logged by two devices may start at opposite ends. Aligning
//! such tracks as-is pairs the start of one with the end of the other, so the
//! comparison pipeline checks orientation first and reverses track 1 when needed.

use crate::error::{check_track, Result, TrackAlignError, TrackId};
use crate::geo_utils::haversine_distance;
use crate::GpsPoint;

/// Decide whether `track2` runs in the opposite direction to `track1`.
///
/// `sample_count` is clamped to the length of the shorter track. For every sample `k`
/// two sums of horizontal distance are accumulated:
///
/// - same direction: `track1[k]` against `track2[k]`
/// - reversed: `track1[k]` against `track2[len - 1 - k]`
///
/// Returns `true` only when the reversed sum is strictly smaller; ties keep the
/// original orientation. All samples contribute, so a misleading first pair is
/// outvoted by the rest.
///
/// Errors with [`TrackAlignError::InvalidSampleCount`] when the clamped count is 0.
///
/// # Example
/// ```
/// use track_aligner::{GpsPoint, is_reversed};
///
/// let out = vec![GpsPoint::new(0.0, 0.0), GpsPoint::new(0.0, 1.0)];
/// let back = vec![GpsPoint::new(0.0, 1.0), GpsPoint::new(0.0, 0.0)];
///
/// assert!(is_reversed(&out, &back, 2).unwrap());
/// assert!(!is_reversed(&out, &out, 2).unwrap());
/// ```
pub fn is_reversed(track1: &[GpsPoint], track2: &[GpsPoint], sample_count: usize) -> Result<bool> {
    check_track(track1, TrackId::First)?;
    check_track(track2, TrackId::Second)?;

    let samples = sample_count.min(track1.len()).min(track2.len());
    if samples == 0 {
        return Err(TrackAlignError::InvalidSampleCount);
    }

    let last = track2.len() - 1;
    let (same, reversed) = track1[..samples].iter().enumerate().fold(
        (0.0, 0.0),
        |(same, reversed), (k, p)| {
            (
                same + haversine_distance(p, &track2[k]),
                reversed + haversine_distance(p, &track2[last - k]),
            )
        },
    );

    Ok(reversed < same)
}
