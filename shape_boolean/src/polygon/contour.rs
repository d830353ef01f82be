use super::ContourOrientation;
use crate::core::{
    math::{dist_squared, is_left, line_seg_closest_point, midpoint, Vector2},
    traits::Real,
};
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed polygon made of straight edges.
///
/// The last point implicitly connects back to the first point, the first point is never repeated
/// at the end.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contour<T = f64> {
    pub points: Vec<Vector2<T>>,
}

impl<T> Contour<T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Contour { points: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Contour {
            points: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn from_points(points: Vec<Vector2<T>>) -> Self {
        Contour { points }
    }

    /// Add a point to the end of the contour.
    #[inline]
    pub fn add(&mut self, x: T, y: T) {
        self.points.push(Vector2::new(x, y));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<Vector2<T>> {
        self.points.last().copied()
    }

    /// Iterate the edges of the contour as `(start, end)` pairs, including the closing edge.
    pub fn iter_segments(&self) -> impl Iterator<Item = (Vector2<T>, Vector2<T>)> + '_ {
        let n = self.points.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed area of the contour using the shoelace formula. Positive for counter clockwise
    /// contours (y-up frame), negative for clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shape_boolean::contour;
    /// # use shape_boolean::polygon::*;
    /// let ccw: Contour<f64> = contour![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    /// assert!((ccw.area() - 4.0).abs() < 1e-12);
    /// assert!((ccw.reversed().area() + 4.0).abs() < 1e-12);
    /// ```
    pub fn area(&self) -> T {
        if self.points.len() < 3 {
            return T::zero();
        }

        let mut double_total_area = T::zero();
        for (v1, v2) in self.iter_segments() {
            double_total_area = double_total_area + v1.x * v2.y - v1.y * v2.x;
        }

        double_total_area / T::two()
    }

    /// Orientation from the sign of [Contour::area]. Zero area contours report counter
    /// clockwise.
    pub fn orientation(&self) -> ContourOrientation {
        if self.area() < T::zero() {
            ContourOrientation::Clockwise
        } else {
            ContourOrientation::CounterClockwise
        }
    }

    /// Axis aligned bounding box of the contour, `None` if it has no points.
    pub fn extents(&self) -> Option<AABB<T>> {
        let first = self.points.first()?;
        let mut result = AABB::new(first.x, first.y, first.x, first.y);
        for p in self.points.iter().skip(1) {
            if p.x < result.min_x {
                result.min_x = p.x;
            } else if p.x > result.max_x {
                result.max_x = p.x;
            }

            if p.y < result.min_y {
                result.min_y = p.y;
            } else if p.y > result.max_y {
                result.max_y = p.y;
            }
        }

        Some(result)
    }

    /// Winding number of the contour around `point`. Points on the boundary give an unspecified
    /// but consistent result, use [Contour::distance_to_boundary] first when that matters.
    pub fn winding_number(&self, point: Vector2<T>) -> i32 {
        if self.points.len() < 3 {
            return 0;
        }

        let mut winding = 0;
        for (v1, v2) in self.iter_segments() {
            if v1.y <= point.y {
                if v2.y > point.y && is_left(v1, v2, point) {
                    // left and upward crossing
                    winding += 1;
                }
            } else if v2.y <= point.y && !is_left(v1, v2, point) {
                // right and downward crossing
                winding -= 1;
            }
        }

        winding
    }

    /// Shortest distance from `point` to any edge of the contour.
    pub fn distance_to_boundary(&self, point: Vector2<T>) -> T {
        let mut min_dist_sq = <T as num_traits::real::Real>::max_value();
        for (v1, v2) in self.iter_segments() {
            let closest = line_seg_closest_point(v1, v2, point);
            let d = dist_squared(closest, point);
            if d < min_dist_sq {
                min_dist_sq = d;
            }
        }

        min_dist_sq.sqrt()
    }

    /// Returns true if `other` lies inside this contour (non-zero winding).
    ///
    /// Probe points are taken from the vertexes and edge midpoints of `other`, the first probe not
    /// within `boundary_eps` of this contour's boundary decides the result. Returns false if every
    /// probe is on the boundary.
    pub fn contains_contour(&self, other: &Contour<T>, boundary_eps: T) -> bool {
        let probes = other
            .points
            .iter()
            .copied()
            .chain(other.iter_segments().map(|(v1, v2)| midpoint(v1, v2)));

        for probe in probes {
            if self.distance_to_boundary(probe) > boundary_eps {
                return self.winding_number(probe) != 0;
            }
        }

        false
    }

    /// Reverse the direction of the contour in place.
    #[inline]
    pub fn invert_direction_mut(&mut self) {
        self.points.reverse();
    }

    /// Returns a copy with the direction reversed.
    #[inline]
    pub fn reversed(&self) -> Self {
        let mut result = self.clone();
        result.invert_direction_mut();
        result
    }

    /// Returns a copy oriented counter clockwise (positive area).
    pub fn normalized_positive(&self) -> Self {
        match self.orientation() {
            ContourOrientation::Clockwise => self.reversed(),
            ContourOrientation::CounterClockwise => self.clone(),
        }
    }

    #[inline]
    pub fn translate_mut(&mut self, x_offset: T, y_offset: T) {
        for p in self.points.iter_mut() {
            p.x = p.x + x_offset;
            p.y = p.y + y_offset;
        }
    }

    /// Remove consecutive points that are within `pos_equal_eps` of each other, including the last
    /// point if it repeats the first. Returns `None` if no points were removed.
    pub fn remove_repeat_pos(&self, pos_equal_eps: T) -> Option<Self> {
        if self.points.len() < 2 {
            return None;
        }

        let mut result: Option<Self> = None;
        let mut prev_pos = self.points[0];
        for (i, &p) in self.points.iter().enumerate().skip(1) {
            if p.fuzzy_eq_eps(prev_pos, pos_equal_eps) {
                // repeat position, remove by not adding to result
                result.get_or_insert_with(|| Contour::from_points(self.points[..i].to_vec()));
            } else {
                if let Some(ref mut r) = result {
                    r.points.push(p);
                }
                prev_pos = p;
            }
        }

        let first = self.points[0];
        let last_is_repeat = {
            let current = result.as_ref().unwrap_or(self);
            current.points.len() > 1
                && current
                    .last()
                    .map_or(false, |l| l.fuzzy_eq_eps(first, pos_equal_eps))
        };

        if last_is_repeat {
            result.get_or_insert_with(|| self.clone()).points.pop();
        }

        result
    }

    /// Remove points where the contour continues straight on or doubles straight back on itself.
    ///
    /// A point is removed when the sine of the turn angle at it is below `collinear_eps` or when
    /// either adjacent edge is shorter than `pos_equal_eps`. Runs until no more points are
    /// removed. Returns `None` if nothing was removed.
    pub fn remove_collinear(&self, collinear_eps: T, pos_equal_eps: T) -> Option<Self> {
        let mut points = self.points.clone();
        let mut removed_any = false;

        loop {
            let n = points.len();
            if n < 3 {
                break;
            }

            let mut keep = vec![true; n];
            let mut removed = false;
            let mut prev_kept = n - 1;
            for i in 0..n {
                let next = (i + 1) % n;
                if next == prev_kept || !keep[next] {
                    prev_kept = i;
                    continue;
                }

                let a = points[prev_kept];
                let b = points[i];
                let c = points[next];
                let ab = b - a;
                let bc = c - b;
                let ab_len = ab.length();
                let bc_len = bc.length();

                let degenerate = ab_len < pos_equal_eps || bc_len < pos_equal_eps;
                let straight =
                    !degenerate && (ab.perp_dot(bc) / (ab_len * bc_len)).abs() < collinear_eps;

                if degenerate || straight {
                    keep[i] = false;
                    removed = true;
                } else {
                    prev_kept = i;
                }
            }

            if !removed {
                break;
            }

            removed_any = true;
            points = points
                .into_iter()
                .zip(keep)
                .filter_map(|(p, k)| if k { Some(p) } else { None })
                .collect();
        }

        if removed_any {
            Some(Contour::from_points(points))
        } else {
            None
        }
    }

    /// Douglas Peucker simplification of the closed contour, points closer than `tolerance` to the
    /// simplified outline are dropped. Contours with fewer than 4 points are returned unchanged.
    pub fn simplified(&self, tolerance: T) -> Self {
        let n = self.points.len();
        if n < 4 {
            return self.clone();
        }

        // split the ring at the first point and the point farthest from it
        let first = self.points[0];
        let mut far_index = 0;
        let mut far_dist = T::zero();
        for (i, &p) in self.points.iter().enumerate().skip(1) {
            let d = dist_squared(first, p);
            if d > far_dist {
                far_dist = d;
                far_index = i;
            }
        }

        if far_index == 0 {
            return self.clone();
        }

        let mut keep = vec![false; n + 1];
        keep[0] = true;
        keep[far_index] = true;
        keep[n] = true;

        // index n refers back to the first point
        let at = |i: usize| self.points[i % n];
        let mut stack = vec![(0, far_index), (far_index, n)];
        while let Some((start, end)) = stack.pop() {
            if end <= start + 1 {
                continue;
            }

            let (p0, p1) = (at(start), at(end));
            let mut max_dist = T::zero();
            let mut max_index = start;
            for i in (start + 1)..end {
                let p = at(i);
                let d = dist_squared(line_seg_closest_point(p0, p1, p), p);
                if d > max_dist {
                    max_dist = d;
                    max_index = i;
                }
            }

            if max_dist.sqrt() > tolerance {
                keep[max_index] = true;
                stack.push((start, max_index));
                stack.push((max_index, end));
            }
        }

        let points: Vec<_> = (0..n).filter(|&i| keep[i]).map(|i| self.points[i]).collect();
        if points.len() < 3 {
            return self.clone();
        }

        Contour::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;

    fn square(size: f64) -> Contour {
        contour![(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)]
    }

    #[test]
    fn area_and_orientation() {
        let c = square(3.0);
        assert_fuzzy_eq!(c.area(), 9.0);
        assert_eq!(c.orientation(), ContourOrientation::CounterClockwise);
        assert_eq!(c.reversed().orientation(), ContourOrientation::Clockwise);
        assert_fuzzy_eq!(c.reversed().normalized_positive().area(), 9.0);
    }

    #[test]
    fn winding_number_sign_follows_direction() {
        let c = square(2.0);
        assert_eq!(c.winding_number(vec2(1.0, 1.0)), 1);
        assert_eq!(c.reversed().winding_number(vec2(1.0, 1.0)), -1);
        assert_eq!(c.winding_number(vec2(3.0, 1.0)), 0);
    }

    #[test]
    fn extents_cover_points() {
        let c = contour![(1.0, -1.0), (4.0, 2.0), (-2.0, 3.0)];
        let e = c.extents().unwrap();
        assert_fuzzy_eq!(e.min_x, -2.0);
        assert_fuzzy_eq!(e.min_y, -1.0);
        assert_fuzzy_eq!(e.max_x, 4.0);
        assert_fuzzy_eq!(e.max_y, 3.0);
        assert!(Contour::<f64>::new().extents().is_none());
    }

    #[test]
    fn remove_repeat_pos_drops_duplicates_and_closing_point() {
        let c = contour![
            (0.0, 0.0),
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (1.0, 1.0 + 1e-9),
            (0.0, 0.0)
        ];
        let r = c.remove_repeat_pos(1e-5).unwrap();
        assert_eq!(r.vertex_count(), 3);
        assert!(square(1.0).remove_repeat_pos(1e-5).is_none());
    }

    #[test]
    fn remove_collinear_drops_straight_and_spike_points() {
        let c = contour![
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (2.0, 3.0),
            (2.0, 2.5),
            (0.0, 2.0)
        ];
        let r = c.remove_collinear(1e-9, 1e-5).unwrap();
        assert_eq!(r.vertex_count(), 4);
        assert_fuzzy_eq!(r.area(), c.area());
        assert!(square(1.0).remove_collinear(1e-9, 1e-5).is_none());
    }

    #[test]
    fn contains_contour_uses_interior_probe() {
        let outer = square(10.0);
        let inner = contour![(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)];
        let touching = contour![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        let outside = contour![(20.0, 20.0), (24.0, 20.0), (24.0, 24.0)];
        assert!(outer.contains_contour(&inner, 1e-5));
        assert!(outer.contains_contour(&touching, 1e-5));
        assert!(!outer.contains_contour(&outside, 1e-5));
    }

    #[test]
    fn simplified_removes_small_wiggles() {
        let c = contour![
            (0.0, 0.0),
            (5.0, 0.01),
            (10.0, 0.0),
            (10.0, 10.0),
            (5.0, 10.02),
            (0.0, 10.0)
        ];
        let s = c.simplified(0.25);
        assert_eq!(s.vertex_count(), 4);
        assert!(s.area().fuzzy_eq_eps(100.0, 1e-9));
    }

    #[test]
    fn distance_to_boundary() {
        let c = square(4.0);
        assert_fuzzy_eq!(c.distance_to_boundary(vec2(1.0, 2.0)), 1.0);
        assert_fuzzy_eq!(c.distance_to_boundary(vec2(6.0, 2.0)), 2.0);
    }
}
