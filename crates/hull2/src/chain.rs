//! Concave-vertex deletion for open chains and closed cycles.
//!
//! A triple `(p, q, r)` is concave when it turns counter-clockwise
//! (`turn(p, q, r) > 0`); the middle vertex `q` is then deleted. Collinear
//! triples are kept. Both routines are stack scans in the style of Graham's
//! scan: every vertex is pushed once and popped at most once per pass.

use crate::geom::{turn, Point};

#[inline]
fn push_convex(stack: &mut Vec<Point>, p: Point) {
    while stack.len() >= 2 && turn(stack[stack.len() - 2], stack[stack.len() - 1], p) > 0.0 {
        stack.pop();
    }
    stack.push(p);
}

/// Delete concave vertices of an open chain until none remain.
///
/// The endpoints always survive. For a chain sorted along one axis this is one
/// half of Andrew's monotone chain.
pub fn convexify_chain(chain: &[Point]) -> Vec<Point> {
    let mut stack = Vec::with_capacity(chain.len());
    for &p in chain {
        push_convex(&mut stack, p);
    }
    stack
}

/// Delete concave vertices of a closed cycle until no cyclic triple is concave.
///
/// Each pass scans once around the cycle and then checks the seam at the start
/// vertex; passes repeat until one deletes nothing. A convex cycle comes back
/// unchanged.
pub fn convexify_cycle(mut cycle: Vec<Point>) -> Vec<Point> {
    loop {
        let before = cycle.len();
        if before < 3 {
            return cycle;
        }
        let mut stack = Vec::with_capacity(before + 1);
        for &p in cycle.iter().chain(std::iter::once(&cycle[0])) {
            push_convex(&mut stack, p);
        }
        // drop the closing copy of the start vertex
        stack.pop();
        let n = stack.len();
        if n >= 3 && turn(stack[n - 1], stack[0], stack[1]) > 0.0 {
            stack.remove(0);
        }
        cycle = stack;
        if cycle.len() == before {
            return cycle;
        }
    }
}

/// No cyclic triple turns counter-clockwise.
pub fn is_convex_cycle(cycle: &[Point]) -> bool {
    let n = cycle.len();
    (0..n).all(|i| turn(cycle[i], cycle[(i + 1) % n], cycle[(i + 2) % n]) <= 0.0)
}
