use crate::core::math::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point in path space.
pub type Point = Vector2<f64>;

/// Drawing instruction of a [SubPath](super::SubPath). Coordinates are absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CubicCurveTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    ClosePath,
}

impl PathSegment {
    /// End point of the segment, `None` for [PathSegment::ClosePath].
    #[inline]
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(p),
            PathSegment::CubicCurveTo { to, .. } => Some(to),
            PathSegment::ClosePath => None,
        }
    }

    /// True for segments that draw geometry (lines and curves).
    #[inline]
    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            PathSegment::LineTo(_) | PathSegment::CubicCurveTo { .. }
        )
    }

    /// Apply `f` to every point of the segment (control points included).
    pub fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(Point) -> Point,
    {
        match *self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(f(p)),
            PathSegment::LineTo(p) => PathSegment::LineTo(f(p)),
            PathSegment::CubicCurveTo { ctrl1, ctrl2, to } => PathSegment::CubicCurveTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            PathSegment::ClosePath => PathSegment::ClosePath,
        }
    }
}
