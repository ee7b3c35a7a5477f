//! Brute-force hull: test every pair as a candidate edge.
//!
//! For each pair `(u, v)` all other points are classified by the side of the
//! line `uv` they fall on. If one side is empty, `uv` is a hull edge. Edges go
//! into an index-based adjacency table (each hull point has exactly two hull
//! neighbours in general position), which is then walked once around.
//!
//! O(n³). Only meant as the reference the faster algorithms are checked against.

use crate::error::{check_input, HullError};
use crate::geom::{dot, normal, turn, Hull, Point};

/// Up to two hull neighbours of one input point, by input index.
#[derive(Clone, Copy, Debug, Default)]
struct Neighbours([Option<usize>; 2]);

impl Neighbours {
    fn link(&mut self, other: usize, me: usize) -> Result<(), HullError> {
        match self.0 {
            [None, _] => self.0[0] = Some(other),
            [Some(_), None] => self.0[1] = Some(other),
            [Some(_), Some(_)] => return Err(HullError::DegenerateEdges { index: me }),
        }
        Ok(())
    }

    fn is_linked(&self) -> bool {
        self.0[0].is_some()
    }

    /// The neighbour that is not `prev`.
    fn other_than(&self, prev: usize) -> Option<usize> {
        self.0.iter().flatten().copied().find(|&k| k != prev)
    }
}

/// Hull by exhaustive edge testing.
///
/// Errors
/// - `TooFewPoints` / `NonFinite` for malformed input.
/// - `Collinear` as soon as a third point lies exactly on a candidate edge line
///   (this includes duplicated points).
/// - `DegenerateEdges` if the edge set is not a single cycle.
pub fn naive_hull(points: &[Point]) -> Result<Hull, HullError> {
    check_input(points)?;
    let n = points.len();

    let mut graph = vec![Neighbours::default(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            let u = points[i];
            let nrm = normal(points[j] - u);
            let mut positive = 0usize;
            let mut negative = 0usize;
            for (k, &p) in points.iter().enumerate() {
                if k == i || k == j {
                    continue;
                }
                let d = dot(nrm, p - u);
                if d > 0.0 {
                    positive += 1;
                } else if d < 0.0 {
                    negative += 1;
                } else {
                    return Err(HullError::Collinear { a: i, b: j, c: k });
                }
            }
            if positive == 0 || negative == 0 {
                graph[i].link(j, i)?;
                graph[j].link(i, j)?;
            }
        }
    }

    let start = graph
        .iter()
        .position(Neighbours::is_linked)
        .ok_or(HullError::DegenerateEdges { index: 0 })?;
    let mut hull = Vec::new();
    let mut prev = start;
    let mut cur = start;
    loop {
        hull.push(points[cur]);
        let next = graph[cur]
            .other_than(prev)
            .ok_or(HullError::DegenerateEdges { index: cur })?;
        prev = cur;
        cur = next;
        if cur == start {
            break;
        }
        if hull.len() > n {
            return Err(HullError::DegenerateEdges { index: cur });
        }
    }
    if hull.len() < 3 {
        return Err(HullError::DegenerateEdges { index: start });
    }

    if turn(hull[0], hull[1], hull[2]) > 0.0 {
        hull.reverse();
    }
    Ok(Hull::from_vertices(hull))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn square_with_center_point() {
        let pts = [
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![4.0, 4.0],
            vector![0.0, 4.0],
            vector![2.0, 1.0],
        ];
        let hull = naive_hull(&pts).unwrap();
        let expected = Hull::from_vertices(vec![
            vector![0.0, 4.0],
            vector![4.0, 4.0],
            vector![4.0, 0.0],
            vector![0.0, 0.0],
        ]);
        assert!(hull.is_rotation_of(&expected));
        assert!(hull.is_strictly_convex());
    }

    #[test]
    fn triangle_comes_back_clockwise() {
        let pts = [vector![0.0, 0.0], vector![2.0, 0.0], vector![1.0, 2.0]];
        let hull = naive_hull(&pts).unwrap();
        assert_eq!(hull.len(), 3);
        assert!(hull.is_clockwise());
    }

    #[test]
    fn collinear_input_is_reported() {
        let pts = [
            vector![0.0, 0.0],
            vector![1.0, 1.0],
            vector![2.0, 2.0],
            vector![0.0, 3.0],
        ];
        assert!(matches!(
            naive_hull(&pts),
            Err(HullError::Collinear { .. })
        ));
    }

    #[test]
    fn duplicate_point_is_reported() {
        let pts = [
            vector![0.0, 0.0],
            vector![0.0, 0.0],
            vector![2.0, 0.5],
            vector![1.0, 3.0],
        ];
        assert!(naive_hull(&pts).is_err());
    }

    #[test]
    fn too_few_points() {
        let pts = [vector![0.0, 0.0], vector![1.0, 0.5]];
        assert_eq!(
            naive_hull(&pts),
            Err(HullError::TooFewPoints { needed: 3, got: 2 })
        );
    }
}
