//! Needleman-Wunsch global alignment of two GPS tracks.
//!
//! The classic sequence alignment recurrence is kept as-is; only the substitution score
//! changes. Two points score the negated distance between them, so nearby points are
//! cheap to match and distant ones are cheaper to leave as gaps:
//!
//! ```text
//! F[i][0] = gap * i
//! F[0][j] = gap * j
//! F[i][j] = max(F[i-1][j-1] - dist(a_i, b_j),
//!               F[i-1][j]   + gap,
//!               F[i][j-1]   + gap)
//! ```
//!
//! Backtracking from `F[n][m]` prefers the diagonal (match), then up (point of track 1
//! against a gap), then left (point of track 2 against a gap).
//!
//! [`align`] materializes the full `(n + 1) × (m + 1)` matrix to recover the path.
//! [`alignment_similarity`] only needs the ratio and keeps two rows.

use crate::error::{check_track, Result, TrackAlignError, TrackId};
use crate::geo_utils::distance;
use crate::GpsPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Result Types
// ============================================================================

/// Two co-indexed sequences describing how the points of two tracks correspond.
///
/// At every index either both slots hold a point (a match) or exactly one does (a gap
/// in the other track).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alignment {
    pub aligned1: Vec<Option<GpsPoint>>,
    pub aligned2: Vec<Option<GpsPoint>>,
    /// Final cell of the score matrix
    pub score: f64,
}

/// One column of an [`Alignment`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignedPair {
    /// Points from both tracks describe the same place
    Matched(GpsPoint, GpsPoint),
    /// Point of track 1 with no counterpart in track 2
    OnlyFirst(GpsPoint),
    /// Point of track 2 with no counterpart in track 1
    OnlySecond(GpsPoint),
}

impl Alignment {
    pub fn len(&self) -> usize {
        self.aligned1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }

    /// Number of indices where both tracks contribute a point.
    pub fn matched_count(&self) -> usize {
        self.aligned1
            .iter()
            .zip(&self.aligned2)
            .filter(|(a, b)| a.is_some() && b.is_some())
            .count()
    }

    /// Iterate over the alignment column by column.
    pub fn pairs(&self) -> impl Iterator<Item = AlignedPair> + '_ {
        self.aligned1
            .iter()
            .zip(&self.aligned2)
            .filter_map(|pair| match pair {
                (Some(a), Some(b)) => Some(AlignedPair::Matched(*a, *b)),
                (Some(a), None) => Some(AlignedPair::OnlyFirst(*a)),
                (None, Some(b)) => Some(AlignedPair::OnlySecond(*b)),
                (None, None) => None,
            })
    }

    /// Fraction of alignment columns that are matches, in `[0, 1]`.
    pub fn similarity(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(TrackAlignError::EmptyAlignment);
        }
        Ok(self.matched_count() as f64 / self.len() as f64)
    }
}

// ============================================================================
// Score Matrix
// ============================================================================

/// Row-major `(n + 1) × (m + 1)` score matrix.
struct ScoreMatrix {
    cols: usize,
    cells: Vec<f64>,
}

impl ScoreMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![0.0; rows * cols],
        }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.cells[i * self.cols + j] = value;
    }
}

/// Number of cells the score matrix needs for tracks of `n` and `m` points.
pub(crate) fn matrix_cells(n: usize, m: usize) -> usize {
    n.saturating_add(1).saturating_mul(m.saturating_add(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Diagonal,
    Up,
    Left,
}

/// Which neighbour an interior cell's score came from.
///
/// `score` is the max of the three candidates and the candidates are recomputed with
/// the same operations as during the fill, so exact comparison is sound.
#[inline]
fn predecessor(score: f64, diagonal: f64, up: f64) -> Step {
    if score == diagonal {
        Step::Diagonal
    } else if score == up {
        Step::Up
    } else {
        Step::Left
    }
}

fn check_inputs(track1: &[GpsPoint], track2: &[GpsPoint], gap_penalty: f64) -> Result<()> {
    check_track(track1, TrackId::First)?;
    check_track(track2, TrackId::Second)?;
    if !gap_penalty.is_finite() {
        return Err(TrackAlignError::InvalidGapPenalty(gap_penalty));
    }
    Ok(())
}

// ============================================================================
// Alignment
// ============================================================================

/// Align two tracks point by point.
///
/// `gap_penalty` is added once per unmatched point and is usually negative; with
/// `use_elevation` the match cost includes elevation differences.
///
/// Both tracks must contain at least one valid point.
///
/// # Example
/// ```
/// use track_aligner::{GpsPoint, align};
///
/// let track1 = vec![GpsPoint::new(0.0, 0.0), GpsPoint::new(0.0, 1.0), GpsPoint::new(0.0, 2.0)];
/// let track2 = vec![GpsPoint::new(0.0, 0.0), GpsPoint::new(0.0, 2.0)];
///
/// let alignment = align(&track1, &track2, -1.0, false).unwrap();
/// assert_eq!(alignment.aligned2, vec![Some(track2[0]), None, Some(track2[1])]);
/// assert!((alignment.similarity().unwrap() - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn align(
    track1: &[GpsPoint],
    track2: &[GpsPoint],
    gap_penalty: f64,
    use_elevation: bool,
) -> Result<Alignment> {
    check_inputs(track1, track2, gap_penalty)?;

    let similarity = |a: &GpsPoint, b: &GpsPoint| -distance(a, b, use_elevation);
    let (n, m) = (track1.len(), track2.len());

    let mut f = ScoreMatrix::new(n + 1, m + 1);
    for i in 1..=n {
        f.set(i, 0, f.get(i - 1, 0) + gap_penalty);
    }
    for j in 1..=m {
        f.set(0, j, f.get(0, j - 1) + gap_penalty);
    }
    for i in 1..=n {
        let a = &track1[i - 1];
        for j in 1..=m {
            let matched = f.get(i - 1, j - 1) + similarity(a, &track2[j - 1]);
            let deleted = f.get(i - 1, j) + gap_penalty;
            let inserted = f.get(i, j - 1) + gap_penalty;
            f.set(i, j, matched.max(deleted.max(inserted)));
        }
    }

    let mut aligned1 = Vec::with_capacity(n + m);
    let mut aligned2 = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);

    while i > 0 || j > 0 {
        let step = if i == 0 {
            Step::Left
        } else if j == 0 {
            Step::Up
        } else {
            predecessor(
                f.get(i, j),
                f.get(i - 1, j - 1) + similarity(&track1[i - 1], &track2[j - 1]),
                f.get(i - 1, j) + gap_penalty,
            )
        };

        match step {
            Step::Diagonal => {
                aligned1.push(Some(track1[i - 1]));
                aligned2.push(Some(track2[j - 1]));
                i -= 1;
                j -= 1;
            }
            Step::Up => {
                aligned1.push(Some(track1[i - 1]));
                aligned2.push(None);
                i -= 1;
            }
            Step::Left => {
                aligned1.push(None);
                aligned2.push(Some(track2[j - 1]));
                j -= 1;
            }
        }
    }

    aligned1.reverse();
    aligned2.reverse();

    Ok(Alignment {
        aligned1,
        aligned2,
        score: f.get(n, m),
    })
}

/// Per-cell summary of the backtracking path that ends in that cell.
#[derive(Debug, Clone, Copy)]
struct PathTally {
    score: f64,
    matched: usize,
    length: usize,
}

impl PathTally {
    fn extend(self, score: f64, matched: bool) -> Self {
        Self {
            score,
            matched: self.matched + usize::from(matched),
            length: self.length + 1,
        }
    }
}

/// Similarity ratio of the alignment [`align`] would produce, in `O(m)` memory.
///
/// Each cell carries the match count and length of the path backtracking would take
/// from it, using the same predecessor priority, so the result equals
/// `align(..)?.similarity()` exactly without materializing the matrix.
pub fn alignment_similarity(
    track1: &[GpsPoint],
    track2: &[GpsPoint],
    gap_penalty: f64,
    use_elevation: bool,
) -> Result<f64> {
    check_inputs(track1, track2, gap_penalty)?;

    let similarity = |a: &GpsPoint, b: &GpsPoint| -distance(a, b, use_elevation);
    let m = track2.len();
    let origin = PathTally {
        score: 0.0,
        matched: 0,
        length: 0,
    };

    let mut prev = Vec::with_capacity(m + 1);
    prev.push(origin);
    for j in 1..=m {
        let left: PathTally = prev[j - 1];
        prev.push(left.extend(left.score + gap_penalty, false));
    }
    let mut curr = prev.clone();

    for a in track1 {
        curr[0] = prev[0].extend(prev[0].score + gap_penalty, false);
        for j in 1..=m {
            let diagonal = prev[j - 1].score + similarity(a, &track2[j - 1]);
            let up = prev[j].score + gap_penalty;
            let left = curr[j - 1].score + gap_penalty;
            let score = diagonal.max(up.max(left));

            curr[j] = match predecessor(score, diagonal, up) {
                Step::Diagonal => prev[j - 1].extend(score, true),
                Step::Up => prev[j].extend(score, false),
                Step::Left => curr[j - 1].extend(score, false),
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let tally = prev[m];
    if tally.length == 0 {
        return Err(TrackAlignError::EmptyAlignment);
    }
    Ok(tally.matched as f64 / tally.length as f64)
}

// ============================================================================
// Tests
// ============================================================================
