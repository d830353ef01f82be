use super::Point;
use crate::core::math::vec2;
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis aligned box given by its top left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Bounds {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn from_aabb(aabb: &AABB<f64>) -> Self {
        Bounds::new(
            aabb.min_x,
            aabb.min_y,
            aabb.max_x - aabb.min_x,
            aabb.max_y - aabb.min_y,
        )
    }

    /// Smallest bounds containing all `points`, `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                vec2(min.x.min(p.x), min.y.min(p.y)),
                vec2(max.x.max(p.x), max.y.max(p.y)),
            )
        });

        Some(Bounds::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        vec2(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest bounds containing both boxes.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// True if the boxes overlap or are within `eps` of touching.
    pub fn overlaps(&self, other: &Bounds, eps: f64) -> bool {
        self.x <= other.right() + eps
            && other.x <= self.right() + eps
            && self.y <= other.bottom() + eps
            && other.y <= self.bottom() + eps
    }
}
