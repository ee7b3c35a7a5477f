//! Planar convex hulls, several ways.
//!
//! Every entry point takes a point set and returns a freshly allocated
//! clockwise [`Hull`]. Nothing is cached between calls.
//!
//! Algorithms
//! - [`naive_hull`]: O(n³) edge test; the oracle the others are checked against.
//! - [`divide_and_conquer_hull`]: `(x, y)`-sorted split, tangent merge.
//! - [`akl_toussaint_hull`]: kill-quadrilateral filter plus regional convex chains.
//! - [`torch_hull`]: four monotone staircases, then convexification.
//! - [`sample_subset`]: strip sampling for approximate hulls.
//!
//! Preconditions
//! - At least 3 points, finite coordinates, no three points collinear.
//!   Violations of the first two are reported as [`HullError`]; collinear input is
//!   only detected by the naive hull and is otherwise unsupported.

pub mod akl_toussaint;
pub mod algorithm;
pub mod chain;
pub mod divide;
pub mod error;
pub mod geom;
pub mod naive;
pub mod pointgen;
pub mod sample;
pub mod torch;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use akl_toussaint::{
    akl_toussaint_filter, akl_toussaint_hull, divide_and_conquer_on_filtered, naive_on_filtered,
    torch_on_filtered,
};
pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use chain::{convexify_chain, convexify_cycle, is_convex_cycle};
pub use divide::divide_and_conquer_hull;
pub use error::HullError;
pub use geom::{determinant, dot, normal, orientation, turn, Hull, Orientation, Point, PointKey};
pub use naive::naive_hull;
pub use sample::{sample_subset, validate_subset};
pub use torch::torch_hull;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::pointgen::{generate_points, GenCfg, ReplayToken};
    pub use crate::{
        akl_toussaint_hull, divide_and_conquer_hull, naive_hull, sample_subset, torch_hull,
        Algorithm, Hull, HullError, Point,
    };
}
