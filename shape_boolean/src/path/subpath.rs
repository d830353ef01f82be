use super::{cubic_extents, flatten_cubic, write, Bounds, FlattenOptions, PathSegment, Point};
use crate::polygon::Contour;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sequence of segments beginning with exactly one move.
///
/// The first segment is always [PathSegment::MoveTo], later segments are only lines and curves.
/// Closure is tracked by a flag rather than a trailing [PathSegment::ClosePath] segment,
/// [SubPath::iter] yields the close segment for closed subpaths.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubPath {
    segments: Vec<PathSegment>,
    closed: bool,
}

impl SubPath {
    /// Start a new open subpath at `start`.
    #[inline]
    pub fn new(start: Point) -> Self {
        SubPath {
            segments: vec![PathSegment::MoveTo(start)],
            closed: false,
        }
    }

    /// Closed subpath through the points of `contour`, `None` if the contour has no points.
    pub fn from_contour(contour: &Contour<f64>) -> Option<Self> {
        let (first, rest) = contour.points.split_first()?;
        let mut result = SubPath::new(*first);
        for &p in rest {
            result.line_to(p);
        }
        result.close();
        Some(result)
    }

    #[inline]
    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.segments.push(PathSegment::LineTo(to));
        self
    }

    #[inline]
    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Self {
        self.segments
            .push(PathSegment::CubicCurveTo { ctrl1, ctrl2, to });
        self
    }

    /// Mark the subpath closed.
    #[inline]
    pub fn close(&mut self) -> &mut Self {
        self.closed = true;
        self
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Segments of the subpath, starting with the move (close excluded).
    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// All segments including a trailing [PathSegment::ClosePath] if closed.
    pub fn iter(&self) -> impl Iterator<Item = PathSegment> + '_ {
        self.segments
            .iter()
            .copied()
            .chain(self.closed.then_some(PathSegment::ClosePath))
    }

    pub fn start_point(&self) -> Point {
        match self.segments[0] {
            PathSegment::MoveTo(p) => p,
            // constructors only ever place a move first
            _ => unreachable!("subpath does not begin with a move"),
        }
    }

    pub fn current_point(&self) -> Point {
        self.segments
            .iter()
            .rev()
            .find_map(|s| s.end_point())
            .unwrap_or_else(|| self.start_point())
    }

    /// Number of line and curve segments.
    #[inline]
    pub fn drawing_segment_count(&self) -> usize {
        self.segments.len() - 1
    }

    /// New subpath with `f` applied to every point, closure preserved.
    pub fn map_points<F>(&self, f: F) -> SubPath
    where
        F: Fn(Point) -> Point,
    {
        SubPath {
            segments: self.segments.iter().map(|s| s.map_points(&f)).collect(),
            closed: self.closed,
        }
    }

    pub fn translate(&self, x_offset: f64, y_offset: f64) -> SubPath {
        self.map_points(|p| Point::new(p.x + x_offset, p.y + y_offset))
    }

    /// Tight bounds of the drawn geometry (curve extrema included).
    pub fn bounds(&self) -> Bounds {
        let mut points = Vec::with_capacity(self.segments.len() * 2);
        let mut current = self.start_point();
        for s in self.segments.iter() {
            match *s {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => points.push(p),
                PathSegment::CubicCurveTo { ctrl1, ctrl2, to } => {
                    let (min, max) = cubic_extents(current, ctrl1, ctrl2, to);
                    points.push(min);
                    points.push(max);
                }
                PathSegment::ClosePath => {}
            }

            current = s.end_point().unwrap_or(current);
        }

        Bounds::from_points(points).unwrap_or_default()
    }

    /// Flatten the subpath into a closed contour (open subpaths are closed implicitly, as they
    /// are when filled).
    pub fn to_contour(&self, options: &FlattenOptions) -> Contour<f64> {
        let mut points = Vec::with_capacity(self.segments.len());
        let mut current = self.start_point();
        points.push(current);
        for s in self.segments.iter().skip(1) {
            match *s {
                PathSegment::LineTo(p) | PathSegment::MoveTo(p) => points.push(p),
                PathSegment::CubicCurveTo { ctrl1, ctrl2, to } => {
                    flatten_cubic(current, ctrl1, ctrl2, to, options, &mut points)
                }
                PathSegment::ClosePath => {}
            }

            current = s.end_point().unwrap_or(current);
        }

        Contour::from_points(points)
    }

    /// Absolute SVG path data for the subpath.
    pub fn to_path_data(&self, decimal_places: u32) -> String {
        write::write_subpath(self, decimal_places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;

    #[test]
    fn build_and_query() {
        let mut s = SubPath::new(vec2(0.0, 0.0));
        s.line_to(vec2(10.0, 0.0))
            .cubic_to(vec2(10.0, 5.0), vec2(5.0, 10.0), vec2(0.0, 10.0))
            .close();
        assert!(s.is_closed());
        assert_eq!(s.drawing_segment_count(), 2);
        assert_fuzzy_eq!(s.current_point(), vec2(0.0, 10.0));
        assert_eq!(s.iter().last(), Some(PathSegment::ClosePath));
    }

    #[test]
    fn to_contour_flattens_curves() {
        let mut s = SubPath::new(vec2(0.0, 0.0));
        s.line_to(vec2(10.0, 0.0))
            .cubic_to(vec2(10.0, 5.0), vec2(5.0, 10.0), vec2(0.0, 10.0))
            .close();
        let c = s.to_contour(&FlattenOptions::new());
        assert!(c.vertex_count() > 3);
        assert!(c.area() > 50.0 && c.area() < 100.0);
    }

    #[test]
    fn bounds_of_curve_use_extrema() {
        let mut s = SubPath::new(vec2(0.0, 0.0));
        s.cubic_to(vec2(0.0, 10.0), vec2(10.0, 10.0), vec2(10.0, 0.0));
        let b = s.bounds();
        assert_fuzzy_eq!(b.height, 7.5);
        assert_fuzzy_eq!(b.width, 10.0);
    }

    #[test]
    fn contour_round_trip_closes() {
        let c = contour![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)];
        let s = SubPath::from_contour(&c).unwrap();
        assert!(s.is_closed());
        assert_eq!(s.drawing_segment_count(), 2);
        assert!(SubPath::from_contour(&Contour::new()).is_none());
    }
}
