use super::FuzzyOrd;
use static_aabb2d_index::IndexableNum;

/// Real number type the geometry kernel is generic over (`f32` or `f64`).
///
/// The `IndexableNum` bound lets contour edges be loaded directly into a
/// [StaticAABB2DIndex](static_aabb2d_index::StaticAABB2DIndex).
pub trait Real:
    num_traits::real::Real + FuzzyOrd + std::default::Default + std::fmt::Debug + IndexableNum + 'static
{
    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn half() -> Self {
        Self::one() / Self::two()
    }

    /// Convert an `f64` constant into `Self`.
    ///
    /// # Panics
    ///
    /// Panics if the value is not representable, which cannot happen for the finite constants
    /// used throughout the crate.
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap()
    }
}

impl Real for f32 {
    #[inline]
    fn two() -> Self {
        2.0f32
    }

    #[inline]
    fn half() -> Self {
        0.5f32
    }
}

impl Real for f64 {
    #[inline]
    fn two() -> Self {
        2.0f64
    }

    #[inline]
    fn half() -> Self {
        0.5f64
    }
}
