//! Name-addressable registry of the hull algorithms.
//!
//! Used by harnesses that time or cross-check algorithms by name.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::akl_toussaint::{
    akl_toussaint_hull, divide_and_conquer_on_filtered, naive_on_filtered, torch_on_filtered,
};
use crate::divide::divide_and_conquer_hull;
use crate::error::HullError;
use crate::geom::{Hull, Point};
use crate::naive::naive_hull;
use crate::torch::torch_hull;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Naive,
    DivideAndConquer,
    AklToussaint,
    Torch,
    NaiveOnFiltered,
    DivideAndConquerOnFiltered,
    TorchOnFiltered,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown algorithm `{0}` (expected one of: naive, divide_and_conquer, akl_toussaint, torch, naive_akl_toussaint, divide_and_conquer_akl_toussaint, torch_akl_toussaint)")]
pub struct ParseAlgorithmError(pub String);

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Naive,
        Algorithm::DivideAndConquer,
        Algorithm::AklToussaint,
        Algorithm::Torch,
        Algorithm::NaiveOnFiltered,
        Algorithm::DivideAndConquerOnFiltered,
        Algorithm::TorchOnFiltered,
    ];

    /// Stable snake_case name; filtered variants carry an `_akl_toussaint` suffix.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Naive => "naive",
            Algorithm::DivideAndConquer => "divide_and_conquer",
            Algorithm::AklToussaint => "akl_toussaint",
            Algorithm::Torch => "torch",
            Algorithm::NaiveOnFiltered => "naive_akl_toussaint",
            Algorithm::DivideAndConquerOnFiltered => "divide_and_conquer_akl_toussaint",
            Algorithm::TorchOnFiltered => "torch_akl_toussaint",
        }
    }

    /// Cubic algorithms; harnesses cap their input sizes.
    pub fn is_cubic(self) -> bool {
        matches!(self, Algorithm::Naive | Algorithm::NaiveOnFiltered)
    }

    pub fn compute(self, points: &[Point]) -> Result<Hull, HullError> {
        match self {
            Algorithm::Naive => naive_hull(points),
            Algorithm::DivideAndConquer => divide_and_conquer_hull(points),
            Algorithm::AklToussaint => akl_toussaint_hull(points),
            Algorithm::Torch => torch_hull(points),
            Algorithm::NaiveOnFiltered => naive_on_filtered(points),
            Algorithm::DivideAndConquerOnFiltered => divide_and_conquer_on_filtered(points),
            Algorithm::TorchOnFiltered => torch_on_filtered(points),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!("Divide-And-Conquer".parse::<Algorithm>(), Ok(Algorithm::DivideAndConquer));
        assert!("quickhull".parse::<Algorithm>().is_err());
    }
}
