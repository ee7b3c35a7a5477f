//! Akl–Toussaint: discard points inside the quadrilateral of axis extremes.
//!
//! The extremes (min x, max y, max x, min y; clockwise, duplicates removed) span
//! a convex "kill zone". A point strictly inside it is a convex combination of
//! hull vertices and cannot be on the hull. What survives is either handed to
//! another algorithm (`*_on_filtered`) or finished directly: each kill-zone
//! edge bounds a region outside it, and the hull inside that region is a convex
//! chain from one extreme to the next.

use crate::chain::convexify_chain;
use crate::divide::divide_and_conquer_hull;
use crate::error::{check_input, HullError};
use crate::geom::{clockwise_triangle, cmp_x, cmp_y, side, Hull, Point};
use crate::naive::naive_hull;
use crate::torch::torch_hull;

/// Clockwise polygon on the axis-extreme points.
#[derive(Clone, Debug)]
pub(crate) struct KillZone {
    vertices: Vec<Point>,
}

impl KillZone {
    /// Caller guarantees `points` is non-empty.
    pub(crate) fn from_points(points: &[Point]) -> Self {
        // min_by keeps the first minimum, max_by the last maximum.
        let x_min = points.iter().min_by(|a, b| cmp_x(a, b));
        let x_max = points.iter().max_by(|a, b| cmp_x(a, b));
        let y_min = points.iter().min_by(|a, b| cmp_y(a, b));
        let y_max = points.iter().max_by(|a, b| cmp_y(a, b));

        let mut vertices: Vec<Point> = Vec::with_capacity(4);
        for p in [x_min, y_max, x_max, y_min].into_iter().flatten() {
            if !vertices.contains(p) {
                vertices.push(*p);
            }
        }
        Self { vertices }
    }

    pub(crate) fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Directed edges `(from, to)` in clockwise order.
    pub(crate) fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Strictly on the interior side of every edge. Boundary points survive.
    pub(crate) fn kills(&self, p: Point) -> bool {
        self.edges().all(|(from, to)| side(from, to, p) < 0.0)
    }

    pub(crate) fn survivors(&self, points: &[Point]) -> Vec<Point> {
        points.iter().copied().filter(|&p| !self.kills(p)).collect()
    }

    /// Convex hull chain from `from` to `to` through the region outside that edge.
    fn region_chain(survivors: &[Point], from: Point, to: Point) -> Vec<Point> {
        let mut region: Vec<Point> = survivors
            .iter()
            .copied()
            .filter(|&p| side(from, to, p) > 0.0)
            .collect();
        if to.x >= from.x {
            region.sort_by(cmp_x);
        } else {
            region.sort_by(|a, b| cmp_x(b, a));
        }
        let mut path = Vec::with_capacity(region.len() + 2);
        path.push(from);
        path.extend(region);
        path.push(to);
        convexify_chain(&path)
    }
}

/// The Akl–Toussaint heuristic on its own: every point not strictly inside the
/// kill zone, in input order. Always contains the kill-zone vertices, and so
/// every hull vertex.
pub fn akl_toussaint_filter(points: &[Point]) -> Result<Vec<Point>, HullError> {
    check_input(points)?;
    Ok(KillZone::from_points(points).survivors(points))
}

/// Full hull: kill-zone filter, then one convex chain per kill-zone edge.
///
/// Three points are returned as their clockwise triangle without filtering.
pub fn akl_toussaint_hull(points: &[Point]) -> Result<Hull, HullError> {
    check_input(points)?;
    if points.len() == 3 {
        return Ok(clockwise_triangle(points));
    }
    let zone = KillZone::from_points(points);
    let survivors = zone.survivors(points);

    let mut hull = Vec::with_capacity(survivors.len());
    for (from, to) in zone.edges() {
        let chain = KillZone::region_chain(&survivors, from, to);
        // `to` opens the next region's chain
        hull.extend_from_slice(&chain[..chain.len() - 1]);
    }
    Ok(Hull::from_vertices(hull))
}

/// Filter, then [`naive_hull`] on the survivors.
pub fn naive_on_filtered(points: &[Point]) -> Result<Hull, HullError> {
    naive_hull(&akl_toussaint_filter(points)?)
}

/// Filter, then [`divide_and_conquer_hull`] on the survivors.
pub fn divide_and_conquer_on_filtered(points: &[Point]) -> Result<Hull, HullError> {
    divide_and_conquer_hull(&akl_toussaint_filter(points)?)
}

/// Filter, then [`torch_hull`] on the survivors.
pub fn torch_on_filtered(points: &[Point]) -> Result<Hull, HullError> {
    torch_hull(&akl_toussaint_filter(points)?)
}
