//! Supporting public types used by the region boolean operations.

use crate::core::traits::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the orientation of a closed contour.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContourOrientation {
    /// Negative signed area, a hole under the region convention.
    Clockwise,
    /// Positive (or zero) signed area, filled space under the region convention.
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Boolean operation to apply between two regions.
pub enum BooleanOp {
    /// Union of the regions.
    Or,
    /// Intersection of the regions.
    And,
    /// First region with the second removed.
    Not,
    /// Exclusive OR (symmetric difference) between the regions.
    Xor,
}

/// Options for region boolean operations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct BooleanOptions<T> {
    /// Fuzzy comparison epsilon used for determining if two positions are equal and whether a
    /// point lies on a boundary.
    pub pos_equal_eps: T,
    /// Fuzzy comparison epsilon used for determining if two positions are equal when stitching
    /// pieces together into closed contours.
    pub slice_join_eps: T,
    /// Sine of the angle below which two segments are treated as parallel, also used when
    /// removing collinear vertexes from results.
    pub collinear_eps: T,
    /// Contours (and whole results) with an absolute area below this value are treated as empty
    /// so floating point slivers are not reported as geometry.
    pub empty_area_eps: T,
}

impl<T> BooleanOptions<T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            pos_equal_eps: T::from_f64_lossy(1e-5),
            slice_join_eps: T::from_f64_lossy(1e-4),
            collinear_eps: T::from_f64_lossy(1e-9),
            empty_area_eps: T::from_f64_lossy(1e-4),
        }
    }
}

impl<T> Default for BooleanOptions<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
