//! Torch: hull from four monotone staircases.
//!
//! After sorting by x, the west (first), east (last), south and north points
//! split the plane into quadrants. Scanning from west or east toward south or
//! north and keeping every point that improves the running y extreme gives four
//! staircases. Joined clockwise (W→N, N→E, E→S, S→W) they form a simple polygon
//! containing the hull vertices; deleting concave vertices until none remain
//! leaves the hull.

use crate::chain::convexify_cycle;
use crate::error::{check_input, HullError};
use crate::geom::{clockwise_triangle, cmp_x, cmp_y, Hull, Point};

/// Indices (into the x-sorted points) where the running y extreme improves,
/// walking `range` in order and starting at `from`.
fn staircase(
    sorted: &[Point],
    from: usize,
    range: impl Iterator<Item = usize>,
    improves: impl Fn(f64, f64) -> bool,
) -> Vec<usize> {
    let mut steps = vec![from];
    let mut best = sorted[from].y;
    for i in range {
        if improves(sorted[i].y, best) {
            best = sorted[i].y;
            steps.push(i);
        }
    }
    steps
}

/// Hull via quadrant staircases plus convexification.
///
/// Three points are returned as their clockwise triangle.
pub fn torch_hull(points: &[Point]) -> Result<Hull, HullError> {
    check_input(points)?;
    if points.len() == 3 {
        return Ok(clockwise_triangle(points));
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(cmp_x);
    let west = 0;
    let east = sorted.len() - 1;
    let south = (0..sorted.len())
        .min_by(|&a, &b| cmp_y(&sorted[a], &sorted[b]))
        .unwrap_or(west);
    let north = (0..sorted.len())
        .max_by(|&a, &b| cmp_y(&sorted[a], &sorted[b]))
        .unwrap_or(west);

    let lower = |y: f64, best: f64| y <= best;
    let higher = |y: f64, best: f64| y >= best;
    let south_west = staircase(&sorted, west, west + 1..=south, lower);
    let south_east = staircase(&sorted, east, (south..east).rev(), lower);
    let north_west = staircase(&sorted, west, west + 1..=north, higher);
    let north_east = staircase(&sorted, east, (north..east).rev(), higher);

    // Each staircase ends on the extreme the next one starts from; drop one copy.
    let mut cycle = Vec::with_capacity(
        north_west.len() + north_east.len() + south_east.len() + south_west.len(),
    );
    cycle.extend(north_west[..north_west.len() - 1].iter().map(|&i| sorted[i]));
    cycle.extend(north_east[1..].iter().rev().map(|&i| sorted[i]));
    cycle.extend(south_east[..south_east.len() - 1].iter().map(|&i| sorted[i]));
    cycle.extend(south_west[1..].iter().rev().map(|&i| sorted[i]));

    Ok(Hull::from_vertices(convexify_cycle(cycle)))
}
