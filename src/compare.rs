//! End-to-end comparison of two tracks.
//!
//! Runs the preprocessing and alignment steps in order:
//!
//! 1. Detect whether the tracks were recorded in opposite directions and, if so,
//!    reverse a copy of track 1.
//! 2. Optionally redistribute both tracks to an even spacing.
//! 3. Align and compute the similarity ratio.
//!
//! Caller data is never modified; the preprocessed tracks are returned alongside the
//! alignment so they can be drawn or exported.

use log::debug;

use crate::alignment::{align, alignment_similarity, matrix_cells, Alignment};
use crate::error::{check_track, Result, TrackAlignError, TrackId};
use crate::geo_utils::polyline_length;
use crate::orientation::is_reversed;
use crate::redistribute::redistribute;
use crate::{AlignConfig, GpsPoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of comparing two tracks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackComparison {
    /// Track 1 was reversed before alignment
    pub reversed: bool,
    /// Track 1 after reversal and redistribution
    pub track1: Vec<GpsPoint>,
    /// Track 2 after redistribution
    pub track2: Vec<GpsPoint>,
    pub alignment: Alignment,
    /// Fraction of alignment columns that are matches (0.0 - 1.0)
    pub similarity: f64,
}

/// Orient and optionally redistribute both tracks.
fn preprocess(
    track1: &[GpsPoint],
    track2: &[GpsPoint],
    config: &AlignConfig,
) -> Result<(bool, Vec<GpsPoint>, Vec<GpsPoint>)> {
    config.validate()?;
    check_track(track1, TrackId::First)?;
    check_track(track2, TrackId::Second)?;

    let reversed = is_reversed(track1, track2, config.reversal_sample_count)?;
    let mut points1: Vec<GpsPoint> = if reversed {
        debug!("Track 1 runs opposite to track 2, reversing it");
        track1.iter().rev().copied().collect()
    } else {
        track1.to_vec()
    };
    let mut points2 = track2.to_vec();

    if let Some(spacing) = config.redistribute_spacing {
        points1 = redistribute(&points1, spacing)?;
        points2 = redistribute(&points2, spacing)?;
        debug!(
            "Redistributed every {}m: {} -> {} and {} -> {} points",
            spacing,
            track1.len(),
            points1.len(),
            track2.len(),
            points2.len()
        );
    }

    Ok((reversed, points1, points2))
}

fn check_matrix_size(n: usize, m: usize, config: &AlignConfig) -> Result<()> {
    let cells = matrix_cells(n, m);
    match config.max_matrix_cells {
        Some(limit) if cells > limit => Err(TrackAlignError::MatrixTooLarge { cells, limit }),
        _ => Ok(()),
    }
}

/// Compare two tracks and return their alignment and similarity ratio.
///
/// # Example
/// ```
/// use track_aligner::{GpsPoint, AlignConfig, compare_tracks};
///
/// let track1: Vec<GpsPoint> = (0..10)
///     .map(|i| GpsPoint::new(51.5 + i as f64 * 0.0005, -0.12))
///     .collect();
/// // Same path, recorded with a slight offset
/// let track2: Vec<GpsPoint> = track1
///     .iter()
///     .map(|p| GpsPoint::new(p.latitude, p.longitude + 0.00003))
///     .collect();
///
/// let config = AlignConfig {
///     redistribute_spacing: Some(25.0),
///     ..AlignConfig::from_cutoff(10.0)
/// };
/// let result = compare_tracks(&track1, &track2, &config).unwrap();
/// assert!(!result.reversed);
/// assert_eq!(result.similarity, 1.0);
/// ```
pub fn compare_tracks(
    track1: &[GpsPoint],
    track2: &[GpsPoint],
    config: &AlignConfig,
) -> Result<TrackComparison> {
    let (reversed, points1, points2) = preprocess(track1, track2, config)?;
    check_matrix_size(points1.len(), points2.len(), config)?;

    debug!(
        "Aligning {} x {} points ({:.0}m vs {:.0}m)",
        points1.len(),
        points2.len(),
        polyline_length(&points1),
        polyline_length(&points2)
    );
    let alignment = align(&points1, &points2, config.gap_penalty, config.use_elevation)?;
    let similarity = alignment.similarity()?;
    debug!(
        "Aligned {} columns, {} matched, similarity {:.2}%",
        alignment.len(),
        alignment.matched_count(),
        similarity * 100.0
    );

    Ok(TrackComparison {
        reversed,
        track1: points1,
        track2: points2,
        alignment,
        similarity,
    })
}

/// Similarity ratio only, computed without materializing the score matrix.
///
/// Returns the same value as [`compare_tracks`] for the same input. The matrix size
/// limit does not apply since memory grows with the length of track 2 only.
pub fn compare_similarity(
    track1: &[GpsPoint],
    track2: &[GpsPoint],
    config: &AlignConfig,
) -> Result<f64> {
    let (_, points1, points2) = preprocess(track1, track2, config)?;
    let similarity =
        alignment_similarity(&points1, &points2, config.gap_penalty, config.use_elevation)?;
    debug!(
        "Similarity of {} x {} points: {:.2}%",
        points1.len(),
        points2.len(),
        similarity * 100.0
    );
    Ok(similarity)
}

/// Compare many independent track pairs.
///
/// Each pair gets its own result, so one bad track does not hide the others.
pub fn compare_many(
    pairs: &[(&[GpsPoint], &[GpsPoint])],
    config: &AlignConfig,
) -> Vec<Result<TrackComparison>> {
    pairs
        .iter()
        .map(|(track1, track2)| compare_tracks(track1, track2, config))
        .collect()
}

/// Compare many independent track pairs using parallel processing.
///
/// This is the same as `compare_many` but spreads pairs across the rayon thread pool.
/// Results keep the order of `pairs`.
#[cfg(feature = "parallel")]
pub fn compare_many_parallel(
    pairs: &[(&[GpsPoint], &[GpsPoint])],
    config: &AlignConfig,
) -> Vec<Result<TrackComparison>> {
    use rayon::prelude::*;

    debug!("Comparing {} track pairs in parallel", pairs.len());
    pairs
        .par_iter()
        .map(|(track1, track2)| compare_tracks(track1, track2, config))
        .collect()
}
