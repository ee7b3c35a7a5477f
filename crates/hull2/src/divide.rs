//! Divide-and-conquer hull with tangent merging.
//!
//! Points are sorted on `(x, y)` and split in half recursively; a slice of at
//! most one point is its own hull. Two neighbouring sub-hulls `A` (left) and
//! `B` (right) are joined along their common upper and lower tangents.
//!
//! Tangent search
//! - Start at the lexicographically largest vertex of `A` and the smallest of
//!   `B`. The split is lexicographic, so a shared x coordinate is fine: the two
//!   halves are still separated by a (slightly tilted) line.
//! - Upper tangent: move `A` counter-clockwise or `B` clockwise while the next
//!   vertex lies strictly left of the directed line `a → b`. Lower tangent: the
//!   mirror image, strictly right.
//! - Only orientation tests are used, so vertical candidate segments need no
//!   special case. Ties stop the walk.
//!
//! Recursion depth is `log2(n)`.

use crate::error::{check_input, HullError};
use crate::geom::{clockwise_triangle, cmp_xy, side, Hull, Point};

/// Hull by recursive halving on `(x, y)`.
///
/// Three points are returned as their clockwise triangle.
pub fn divide_and_conquer_hull(points: &[Point]) -> Result<Hull, HullError> {
    check_input(points)?;
    if points.len() == 3 {
        return Ok(clockwise_triangle(points));
    }
    let mut sorted = points.to_vec();
    sorted.sort_by(cmp_xy);
    Ok(Hull::from_vertices(hull_of_sorted(&sorted)))
}

fn hull_of_sorted(sorted: &[Point]) -> Vec<Point> {
    if sorted.len() <= 1 {
        return sorted.to_vec();
    }
    let half = sorted.len() / 2;
    let a = hull_of_sorted(&sorted[..half]);
    let b = hull_of_sorted(&sorted[half..]);
    merge(&a, &b)
}

/// Index one step clockwise (hulls are stored clockwise).
#[inline]
fn cw(i: usize, len: usize) -> usize {
    (i + 1) % len
}

#[inline]
fn ccw(i: usize, len: usize) -> usize {
    (i + len - 1) % len
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Upper,
    Lower,
}

/// A common tangent: vertex `a` of the left hull, vertex `b` of the right hull.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Tangent {
    pub a: usize,
    pub b: usize,
    /// Number of index moves the search made.
    pub steps: usize,
}

/// Largest index of `a` and smallest index of `b` in `(x, y)` order.
fn starting_pair(a: &[Point], b: &[Point]) -> (usize, usize) {
    let rightmost = a
        .iter()
        .enumerate()
        .max_by(|(_, p), (_, q)| cmp_xy(p, q))
        .map_or(0, |(i, _)| i);
    let leftmost = b
        .iter()
        .enumerate()
        .min_by(|(_, p), (_, q)| cmp_xy(p, q))
        .map_or(0, |(j, _)| j);
    (rightmost, leftmost)
}

/// Find the upper or lower common tangent of two separated clockwise hulls.
pub(crate) fn tangent(a: &[Point], b: &[Point], side_kind: Side) -> Tangent {
    let (mut i, mut j) = starting_pair(a, b);
    let (step_a, step_b): (fn(usize, usize) -> usize, fn(usize, usize) -> usize) = match side_kind
    {
        Side::Upper => (ccw, cw),
        Side::Lower => (cw, ccw),
    };
    // strictly outside the current candidate line
    let outside = |from: Point, to: Point, p: Point| match side_kind {
        Side::Upper => side(from, to, p) > 0.0,
        Side::Lower => side(from, to, p) < 0.0,
    };

    // each vertex is passed at most once on a convex input
    let limit = a.len() + b.len();
    let mut steps = 0;
    while steps < limit {
        let next_i = step_a(i, a.len());
        let next_j = step_b(j, b.len());
        if outside(a[i], b[j], a[next_i]) {
            i = next_i;
        } else if outside(a[i], b[j], b[next_j]) {
            j = next_j;
        } else {
            break;
        }
        steps += 1;
    }
    Tangent { a: i, b: j, steps }
}

/// Join two clockwise hulls, `a` entirely left of `b`, into one clockwise hull.
pub(crate) fn merge(a: &[Point], b: &[Point]) -> Vec<Point> {
    debug_assert!(!a.is_empty() && !b.is_empty());
    let upper = tangent(a, b, Side::Upper);
    let lower = tangent(a, b, Side::Lower);

    let mut hull = Vec::with_capacity(a.len() + b.len());
    let mut i = lower.a;
    while i != upper.a {
        hull.push(a[i]);
        i = cw(i, a.len());
    }
    hull.push(a[upper.a]);
    let mut j = upper.b;
    while j != lower.b {
        hull.push(b[j]);
        j = cw(j, b.len());
    }
    hull.push(b[lower.b]);
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::side;
    use nalgebra::{vector, Vector2};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Random strictly convex clockwise polygon on a circle, starting at a random vertex.
    fn circle_polygon(rng: &mut StdRng, center: Point, radius: f64, n: usize) -> Vec<Point> {
        let mut angles: Vec<f64> = (0..n)
            .map(|_| rng.gen::<f64>() * std::f64::consts::TAU)
            .collect();
        // decreasing angle = clockwise
        angles.sort_by(|a, b| b.total_cmp(a));
        angles.dedup();
        let mut poly: Vec<Point> = angles
            .into_iter()
            .map(|t| center + Vector2::new(t.cos(), t.sin()) * radius)
            .collect();
        let k = rng.gen_range(0..poly.len());
        poly.rotate_left(k);
        poly
    }

    #[test]
    fn tangent_search_terminates_on_random_pairs() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let na = rng.gen_range(1..=16);
            let nb = rng.gen_range(1..=16);
            let ra = rng.gen_range(0.5..2.0);
            let rb = rng.gen_range(0.5..2.0);
            let gap = rng.gen_range(0.1..3.0);
            let ca = vector![0.0, rng.gen_range(-3.0..3.0)];
            let cb = vector![ra + rb + gap, rng.gen_range(-3.0..3.0)];
            let a = circle_polygon(&mut rng, ca, ra, na);
            let b = circle_polygon(&mut rng, cb, rb, nb);

            for side_kind in [Side::Upper, Side::Lower] {
                let t = tangent(&a, &b, side_kind);
                assert!(t.steps <= a.len() + b.len(), "steps {} for {}+{}", t.steps, a.len(), b.len());
                // every vertex lies on the outer side of the tangent line or on it
                let (p, q) = (a[t.a], b[t.b]);
                for &x in a.iter().chain(b.iter()) {
                    let s = side(p, q, x);
                    match side_kind {
                        Side::Upper => assert!(s <= 1e-9, "vertex above upper tangent: {s}"),
                        Side::Lower => assert!(s >= -1e-9, "vertex below lower tangent: {s}"),
                    }
                }
            }
        }
    }

    #[test]
    fn merge_two_triangles() {
        let a = vec![vector![0.0, 0.0], vector![1.0, 3.0], vector![2.0, 1.0]];
        let b = vec![vector![4.0, 0.5], vector![5.0, 4.0], vector![6.0, 0.0]];
        let merged = Hull::from_vertices(merge(&a, &b));
        let expected = Hull::from_vertices(vec![
            vector![0.0, 0.0],
            vector![1.0, 3.0],
            vector![5.0, 4.0],
            vector![6.0, 0.0],
        ]);
        assert!(merged.is_rotation_of(&expected), "{merged:?}");
    }

    #[test]
    fn merge_single_points_builds_segment_then_triangle() {
        let seg = merge(&[vector![0.0, 0.0]], &[vector![1.0, -1.0]]);
        assert_eq!(seg.len(), 2);
        let tri = Hull::from_vertices(merge(&seg, &[vector![2.0, 0.0]]));
        assert_eq!(tri.len(), 3);
        assert!(tri.is_clockwise());
    }

    #[test]
    fn tilted_square_drops_interior_point() {
        let pts = [
            vector![0.0, 1.0],
            vector![3.0, 2.0],
            vector![4.0, 0.0],
            vector![5.0, 4.0],
            vector![1.0, 5.0],
        ];
        let hull = divide_and_conquer_hull(&pts).unwrap();
        let expected = Hull::from_vertices(vec![
            vector![0.0, 1.0],
            vector![1.0, 5.0],
            vector![5.0, 4.0],
            vector![4.0, 0.0],
        ]);
        assert!(hull.is_rotation_of(&expected), "{hull:?}");
        assert!(hull.is_strictly_convex());
    }

    #[test]
    fn shared_x_columns_keep_every_vertex() {
        // the first split leaves the column x = 0 on the left, x = 3 on the right
        let pts = [
            vector![3.0, 4.0],
            vector![0.0, 3.0],
            vector![1.0, 1.0],
            vector![3.0, 0.0],
            vector![0.0, 0.0],
        ];
        let hull = divide_and_conquer_hull(&pts).unwrap();
        let expected = Hull::from_vertices(vec![
            vector![0.0, 0.0],
            vector![0.0, 3.0],
            vector![3.0, 4.0],
            vector![3.0, 0.0],
        ]);
        assert!(hull.is_rotation_of(&expected), "{hull:?}");
    }

    #[test]
    fn merge_across_vertical_segments() {
        let a = merge(&[vector![0.0, 0.0]], &[vector![0.0, 2.0]]);
        let tri = Hull::from_vertices(merge(&a, &[vector![1.0, 1.0]]));
        let expected = Hull::from_vertices(vec![
            vector![0.0, 0.0],
            vector![0.0, 2.0],
            vector![1.0, 1.0],
        ]);
        assert!(tri.is_rotation_of(&expected), "{tri:?}");
        assert!(tri.is_clockwise());
    }

    #[test]
    fn triangle_input() {
        let pts = [vector![0.0, 0.0], vector![2.0, 0.0], vector![1.0, 2.0]];
        let hull = divide_and_conquer_hull(&pts).unwrap();
        let expected = Hull::from_vertices(vec![
            vector![0.0, 0.0],
            vector![1.0, 2.0],
            vector![2.0, 0.0],
        ]);
        assert!(hull.is_rotation_of(&expected));
    }
}
