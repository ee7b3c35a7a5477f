//! Strip sampling for approximate hulls.
//!
//! The x-range is cut into `k` equal-width vertical strips. Keeping the two
//! x-extremes plus the lowest and highest point of every strip gives at most
//! `2k + 2` points whose hull approximates the full hull from the inside.

use std::collections::{BTreeSet, HashSet};

use crate::error::{check_input, HullError};
use crate::geom::{cmp_x, Hull, Point, PointKey};

/// Lowest and highest point of one strip, by input index.
#[derive(Clone, Copy, Debug, Default)]
struct Strip {
    min_y: Option<usize>,
    max_y: Option<usize>,
}

impl Strip {
    fn offer(&mut self, i: usize, points: &[Point]) {
        let y = points[i].y;
        if self.min_y.map_or(true, |m| y < points[m].y) {
            self.min_y = Some(i);
        }
        if self.max_y.map_or(true, |m| y > points[m].y) {
            self.max_y = Some(i);
        }
    }
}

/// Reduce `points` to the x-extremes plus the per-strip y-extremes.
///
/// The result is a subset of the input in input order, without repeats.
/// Empty strips contribute nothing.
///
/// Errors: the usual input checks, `NoStrips` for `strip_count == 0`, and
/// `ZeroWidth` when every point has the same x.
pub fn sample_subset(points: &[Point], strip_count: usize) -> Result<Vec<Point>, HullError> {
    check_input(points)?;
    if strip_count == 0 {
        return Err(HullError::NoStrips);
    }

    let min_x = (0..points.len())
        .min_by(|&a, &b| cmp_x(&points[a], &points[b]))
        .ok_or(HullError::ZeroWidth)?;
    let max_x = (0..points.len())
        .max_by(|&a, &b| cmp_x(&points[a], &points[b]))
        .ok_or(HullError::ZeroWidth)?;
    let dx = points[max_x].x - points[min_x].x;
    if dx <= 0.0 {
        return Err(HullError::ZeroWidth);
    }
    let strip_dx = dx / strip_count as f64;

    let mut strips = vec![Strip::default(); strip_count];
    for i in 0..points.len() {
        if i == min_x || i == max_x {
            continue;
        }
        let offset = ((points[i].x - points[min_x].x) / strip_dx).floor();
        // ties with the max-x point land exactly on the right edge
        let s = (offset as usize).min(strip_count - 1);
        strips[s].offer(i, points);
    }

    let mut picked = BTreeSet::new();
    picked.insert(min_x);
    picked.insert(max_x);
    for strip in &strips {
        picked.extend(strip.min_y);
        picked.extend(strip.max_y);
    }
    Ok(picked.into_iter().map(|i| points[i]).collect())
}

/// Check a sampling run: every sampled point is an input point, and every
/// vertex of the approximate hull is a vertex of the exact hull.
pub fn validate_subset(points: &[Point], sample: &[Point], hull: &Hull, approx: &Hull) -> bool {
    let inputs: HashSet<PointKey> = points.iter().copied().map(PointKey).collect();
    let vertices: HashSet<PointKey> = hull.points().iter().copied().map(PointKey).collect();
    sample.iter().all(|p| inputs.contains(&PointKey(*p)))
        && approx
            .points()
            .iter()
            .all(|p| vertices.contains(&PointKey(*p)))
}
