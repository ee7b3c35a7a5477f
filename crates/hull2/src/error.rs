//! Precondition violations reported by the hull routines.

use thiserror::Error;

/// Input rejected by a hull or sampling routine.
///
/// These are all caller errors; nothing here is transient or worth retrying.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HullError {
    /// Fewer points than the algorithm needs.
    #[error("need at least {needed} points, got {got}")]
    TooFewPoints {
        /// Minimum accepted point count.
        needed: usize,
        /// Point count that was passed in.
        got: usize,
    },
    /// A coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFinite {
        /// Input index of the offending point.
        index: usize,
    },
    /// Three input points lie on one line.
    #[error("points {a}, {b} and {c} are collinear")]
    Collinear { a: usize, b: usize, c: usize },
    /// A point ended up with more than two hull neighbours.
    #[error("point {index} has more than two hull edges (duplicate or collinear input)")]
    DegenerateEdges { index: usize },
    /// Subset sampling needs at least one strip.
    #[error("strip count must be at least 1")]
    NoStrips,
    /// All points share one x coordinate, so strips have no width.
    #[error("point set has zero x-extent")]
    ZeroWidth,
}

/// Minimum point count accepted by every hull entry point.
pub(crate) const MIN_POINTS: usize = 3;

/// Shared entry check: enough points, all finite.
pub(crate) fn check_input(points: &[nalgebra::Vector2<f64>]) -> Result<(), HullError> {
    if points.len() < MIN_POINTS {
        return Err(HullError::TooFewPoints {
            needed: MIN_POINTS,
            got: points.len(),
        });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(HullError::NonFinite { index });
    }
    Ok(())
}
