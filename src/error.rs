//! Error types for track alignment.
//!
//! Every failure in this crate is a precondition violation: the caller supplied a
//! track, a spacing, or a configuration that the algorithms cannot work with.
//! Nothing here is retryable.

use std::fmt;

use thiserror::Error;

/// Which of the two compared tracks an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackId {
    First,
    Second,
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackId::First => write!(f, "track 1"),
            TrackId::Second => write!(f, "track 2"),
        }
    }
}

/// Errors returned by the alignment engine and its preprocessing steps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackAlignError {
    #[error("{track} has no points")]
    EmptyTrack { track: TrackId },

    #[error("{track} has an invalid coordinate at index {index}")]
    InvalidPoint { track: TrackId, index: usize },

    #[error("redistribution spacing must be a positive number of meters, got {0}")]
    InvalidSpacing(f64),

    #[error("gap penalty must be finite, got {0}")]
    InvalidGapPenalty(f64),

    #[error("orientation detection needs at least one sample pair")]
    InvalidSampleCount,

    #[error("cannot compute similarity of an empty alignment")]
    EmptyAlignment,

    #[error("score matrix of {cells} cells exceeds the limit of {limit}")]
    MatrixTooLarge { cells: usize, limit: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrackAlignError>;

/// Reject empty tracks and tracks containing invalid coordinates.
pub(crate) fn check_track(points: &[crate::GpsPoint], track: TrackId) -> Result<()> {
    if points.is_empty() {
        return Err(TrackAlignError::EmptyTrack { track });
    }
    match points.iter().position(|p| !p.is_valid()) {
        Some(index) => Err(TrackAlignError::InvalidPoint { track, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GpsPoint;

    #[test]
    fn test_error_display() {
        let err = TrackAlignError::InvalidPoint {
            track: TrackId::Second,
            index: 3,
        };
        assert!(err.to_string().contains("track 2"));
        assert!(err.to_string().contains("index 3"));
    }

    #[test]
    fn test_check_track() {
        assert_eq!(
            check_track(&[], TrackId::First),
            Err(TrackAlignError::EmptyTrack { track: TrackId::First })
        );

        let points = vec![GpsPoint::new(51.5, -0.12), GpsPoint::new(f64::NAN, 0.0)];
        assert_eq!(
            check_track(&points, TrackId::Second),
            Err(TrackAlignError::InvalidPoint {
                track: TrackId::Second,
                index: 1
            })
        );

        assert!(check_track(&points[..1], TrackId::First).is_ok());
    }
}
