//! # Track Aligner
//!
//! Point-by-point comparison of two recorded GPS tracks.
//!
//! This library provides:
//! - Geodesic primitives (distance, bearing, point translation)
//! - Even redistribution of track points along their path
//! - Detection of tracks recorded in opposite directions
//! - Needleman-Wunsch alignment with a geodesic cost function
//! - A similarity ratio derived from the alignment
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch comparison with rayon
//! - **`serde`** - Serialize points, configuration and alignment results
//! - **`cli`** - Build the `track-compare` binary for GPX files
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use track_aligner::{GpsPoint, AlignConfig, compare_tracks};
//!
//! let track1 = vec![
//!     GpsPoint::new(51.5074, -0.1278),
//!     GpsPoint::new(51.5080, -0.1290),
//!     GpsPoint::new(51.5090, -0.1300),
//! ];
//!
//! // Same path, recorded the other way round
//! let mut track2 = track1.clone();
//! track2.reverse();
//!
//! let result = compare_tracks(&track1, &track2, &AlignConfig::from_cutoff(10.0)).unwrap();
//! assert!(result.reversed);
//! assert_eq!(result.similarity, 1.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, TrackAlignError, TrackId};

// Geographic utilities (distance, bearing, point translation)
pub mod geo_utils;

// Even spacing of track points
pub mod redistribute;
pub use redistribute::redistribute;

// Opposite-direction detection
pub mod orientation;
pub use orientation::is_reversed;

// Needleman-Wunsch alignment
pub mod alignment;
pub use alignment::{align, alignment_similarity, AlignedPair, Alignment};

// End-to-end comparison of two tracks
pub mod compare;
#[cfg(feature = "parallel")]
pub use compare::compare_many_parallel;
pub use compare::{compare_many, compare_similarity, compare_tracks, TrackComparison};

// ============================================================================
// Core Types
// ============================================================================

/// A GPS sample with latitude, longitude and optional elevation.
///
/// Points are plain values: preprocessing creates new points instead of
/// changing existing ones.
///
/// # Example
/// ```
/// use track_aligner::GpsPoint;
/// let point = GpsPoint::new(51.5074, -0.1278); // London
/// let summit = GpsPoint::with_elevation(45.8326, 6.8652, 4808.0); // Mont Blanc
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub elevation: Option<f64>,
}

impl GpsPoint {
    /// Create a new GPS point without elevation.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Create a new GPS point with elevation.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
            && self.elevation.map_or(true, f64::is_finite)
    }
}

/// Configuration for track comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlignConfig {
    /// Score charged for each point left unmatched.
    /// Conventionally the negated cutoff distance: two points farther apart than
    /// the cutoff are better represented as gaps than as a match.
    /// Default: -10.0 (10 meter cutoff)
    pub gap_penalty: f64,

    /// Include elevation differences in point-to-point distance.
    /// Default: true
    pub use_elevation: bool,

    /// Redistribute both tracks to this spacing (meters) before aligning.
    /// `None` aligns the raw points. Default: None
    pub redistribute_spacing: Option<f64>,

    /// Number of leading points compared when checking for reversed tracks.
    /// Default: 40
    pub reversal_sample_count: usize,

    /// Upper bound on score matrix cells, `(n + 1) * (m + 1)`.
    /// `None` disables the check. Default: None
    pub max_matrix_cells: Option<usize>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            gap_penalty: -10.0,
            use_elevation: true,
            redistribute_spacing: None,
            reversal_sample_count: 40,
            max_matrix_cells: None,
        }
    }
}

impl AlignConfig {
    /// Configuration whose gap penalty is the negated `cutoff_meters`.
    ///
    /// # Example
    /// ```
    /// use track_aligner::AlignConfig;
    /// let config = AlignConfig::from_cutoff(25.0);
    /// assert_eq!(config.gap_penalty, -25.0);
    /// ```
    pub fn from_cutoff(cutoff_meters: f64) -> Self {
        Self {
            gap_penalty: -cutoff_meters,
            ..Self::default()
        }
    }

    /// Check the configuration before any track is touched.
    pub fn validate(&self) -> Result<()> {
        if !self.gap_penalty.is_finite() {
            return Err(TrackAlignError::InvalidGapPenalty(self.gap_penalty));
        }
        if let Some(spacing) = self.redistribute_spacing {
            redistribute::check_spacing(spacing)?;
        }
        if self.reversal_sample_count == 0 {
            return Err(TrackAlignError::InvalidSampleCount);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
