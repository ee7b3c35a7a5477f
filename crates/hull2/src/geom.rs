//! Planar primitives shared by every hull algorithm.
//!
//! - `Point`: plain `Vector2<f64>`; equality is exact float equality.
//! - `determinant`, `dot`, `normal`: the three products all side tests reduce to.
//! - `turn` / `orientation`: sign of the turn at the middle of three points.
//! - `Hull`: clockwise vertex cycle with the checks the harness needs.
//!
//! Sign conventions (y axis up)
//! - `determinant(u, v) > 0` when `v` is counter-clockwise from `u`.
//! - `dot(normal(v), w) > 0` when `w` lies left of the direction `v`.
//! - `turn(a, b, c) < 0` is a clockwise (right) turn at `b`.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use nalgebra::Vector2;

/// A point (or a displacement) in the plane.
pub type Point = Vector2<f64>;

/// Determinant of the matrix `[u | v]`: twice the signed area spanned by `u`, `v`.
#[inline]
pub fn determinant(u: Point, v: Point) -> f64 {
    u.x * v.y - u.y * v.x
}

#[inline]
pub fn dot(u: Point, v: Point) -> f64 {
    u.x * v.x + u.y * v.y
}

/// `v` rotated a quarter turn counter-clockwise.
#[inline]
pub fn normal(v: Point) -> Point {
    Vector2::new(-v.y, v.x)
}

/// `determinant(b - a, c - b)`: negative for a clockwise turn at `b`.
#[inline]
pub fn turn(a: Point, b: Point, c: Point) -> f64 {
    determinant(b - a, c - b)
}

/// Turn direction at the middle of three points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Classify the turn `a → b → c`. Exact: zero only for exactly collinear input.
#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let s = turn(a, b, c);
    if s < 0.0 {
        Orientation::Clockwise
    } else if s > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// Which side of the directed line `from → to` the point `p` is on
/// (`> 0` left, `< 0` right, `0` on the line).
#[inline]
pub(crate) fn side(from: Point, to: Point, p: Point) -> f64 {
    dot(normal(to - from), p - from)
}

/// Total order on x; ties are left as `Equal` (stable sorts keep input order).
#[inline]
pub(crate) fn cmp_x(a: &Point, b: &Point) -> Ordering {
    a.x.total_cmp(&b.x)
}

/// Lexicographic order on `(x, y)`.
#[inline]
pub(crate) fn cmp_xy(a: &Point, b: &Point) -> Ordering {
    cmp_x(a, b).then_with(|| a.y.total_cmp(&b.y))
}

#[inline]
pub(crate) fn cmp_y(a: &Point, b: &Point) -> Ordering {
    a.y.total_cmp(&b.y)
}

/// Hashable view of a point, keyed on the exact bit patterns of both coordinates.
///
/// `-0.0` is folded into `0.0` so that keys agree with `==`. Inputs are assumed finite.
#[derive(Clone, Copy, Debug)]
pub struct PointKey(pub Point);

impl PointKey {
    #[inline]
    fn bits(&self) -> (u64, u64) {
        // `+ 0.0` maps -0.0 to 0.0 and leaves everything else alone.
        ((self.0.x + 0.0).to_bits(), (self.0.y + 0.0).to_bits())
    }
}

impl PartialEq for PointKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for PointKey {}

impl Hash for PointKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl From<Point> for PointKey {
    fn from(p: Point) -> Self {
        Self(p)
    }
}

/// Convex hull as a clockwise cycle of input points.
///
/// Invariants (for hulls returned by this crate):
/// - Every vertex is one of the input points, bit-for-bit.
/// - Vertices run clockwise; the start vertex is unspecified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hull {
    points: Vec<Point>,
}

impl Hull {
    /// Wrap a vertex cycle without checking it.
    #[inline]
    pub fn from_vertices(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Vertex cycle in clockwise order.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Twice the signed area (shoelace); negative for clockwise cycles.
    pub fn signed_area2(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| determinant(self.points[i], self.points[(i + 1) % n]))
            .sum()
    }

    /// True if the cycle winds clockwise. Cycles with fewer than 3 vertices never do.
    pub fn is_clockwise(&self) -> bool {
        self.points.len() >= 3 && self.signed_area2() < 0.0
    }

    /// Every cyclic triple turns strictly clockwise.
    pub fn is_strictly_convex(&self) -> bool {
        let n = self.points.len();
        n >= 3
            && (0..n).all(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                let c = self.points[(i + 2) % n];
                turn(a, b, c) < 0.0
            })
    }

    /// Same vertices in the same cyclic order, possibly starting elsewhere.
    pub fn is_rotation_of(&self, other: &Hull) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let Some(first) = self.points.first() else {
            return true;
        };
        let Some(offset) = other.points.iter().position(|p| p == first) else {
            return false;
        };
        let n = other.len();
        self.points
            .iter()
            .enumerate()
            .all(|(i, p)| *p == other.points[(offset + i) % n])
    }

    #[inline]
    pub fn contains_vertex(&self, p: Point) -> bool {
        self.points.iter().any(|q| *q == p)
    }
}

impl AsRef<[Point]> for Hull {
    fn as_ref(&self) -> &[Point] {
        &self.points
    }
}

impl From<Hull> for Vec<Point> {
    fn from(h: Hull) -> Self {
        h.points
    }
}

/// Reorder three points clockwise (no-op if they already are).
pub(crate) fn clockwise_triangle(points: &[Point]) -> Hull {
    let mut tri = points.to_vec();
    if turn(tri[0], tri[1], tri[2]) > 0.0 {
        tri.reverse();
    }
    Hull::from_vertices(tri)
}
