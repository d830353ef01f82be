use super::Vector2;
use crate::core::traits::Real;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use shape_boolean::core::math::*;
/// assert_eq!(min_max(8, 4), (4, 8));
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Distance squared between the points `p0` and `p1`.
#[inline]
pub fn dist_squared<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    let d = p0 - p1;
    d.dot(d)
}

/// Midpoint of a line segment defined by `p0` to `p1`.
#[inline]
pub fn midpoint<T>(p0: Vector2<T>, p1: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    Vector2::new((p0.x + p1.x) * T::half(), (p0.y + p1.y) * T::half())
}

/// Returns the point on the line segment going from `p0` to `p1` at parametric value `t`.
#[inline]
pub fn point_from_parametric<T>(p0: Vector2<T>, p1: Vector2<T>, t: T) -> Vector2<T>
where
    T: Real,
{
    p0 + (p1 - p0).scale(t)
}

/// Parametric value of the orthogonal projection of `point` onto the line through `p0` and `p1`.
///
/// Unlike a direct ratio of coordinates this is well defined for points slightly off the line,
/// which is the normal state of affairs for computed intersection points. Returns zero for a
/// degenerate (zero length) segment.
///
/// # Examples
///
/// ```
/// # use shape_boolean::core::math::*;
/// let t: f64 = project_parametric(vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(2.5, 0.001));
/// assert!((t - 0.25).abs() < 1e-12);
/// ```
#[inline]
pub fn project_parametric<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> T
where
    T: Real,
{
    let v = p1 - p0;
    let len_sq = v.length_squared();
    if len_sq.fuzzy_eq_zero() {
        return T::zero();
    }

    (point - p0).dot(v) / len_sq
}

/// Returns the closest point on the line segment from `p0` to `p1` to the `point` given.
#[inline]
pub fn line_seg_closest_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    let t = project_parametric(p0, p1, point);
    if t <= T::zero() {
        return p0;
    }

    if t >= T::one() {
        return p1;
    }

    point_from_parametric(p0, p1, t)
}

/// Returns true if `point` is left of the direction vector `p1 - p0` (counter clockwise side in
/// a y-up frame).
///
/// # Examples
///
/// ```
/// # use shape_boolean::core::math::*;
/// let p0 = vec2(1.0, 1.0);
/// let p1 = vec2(2.0, 2.0);
/// assert!(is_left(p0, p1, vec2(0.0, 1.0)));
/// assert!(!is_left(p0, p1, vec2(1.0, 0.0)));
/// ```
#[inline]
pub fn is_left<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> bool
where
    T: Real,
{
    (p1 - p0).perp_dot(point - p0) > T::zero()
}

/// Signed turn angle in radians going from direction `incoming` to direction `outgoing`, in the
/// range `(-PI, PI]`. Positive values turn counter clockwise.
#[inline]
pub fn turn_angle<T>(incoming: Vector2<T>, outgoing: Vector2<T>) -> T
where
    T: Real,
{
    incoming.perp_dot(outgoing).atan2(incoming.dot(outgoing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn closest_point_clamps_to_segment() {
        let p0 = vec2(0.0, 0.0);
        let p1 = vec2(4.0, 0.0);
        assert!(line_seg_closest_point(p0, p1, vec2(-3.0, 1.0)).fuzzy_eq(p0));
        assert!(line_seg_closest_point(p0, p1, vec2(9.0, -1.0)).fuzzy_eq(p1));
        assert!(line_seg_closest_point(p0, p1, vec2(1.0, 2.0)).fuzzy_eq(vec2(1.0, 0.0)));
    }

    #[test]
    fn turn_angle_sign() {
        let east = vec2(1.0, 0.0);
        let north = vec2(0.0, 1.0);
        assert!(turn_angle(east, north).fuzzy_eq(FRAC_PI_2));
        assert!(turn_angle(north, east).fuzzy_eq(-FRAC_PI_2));
        assert!(turn_angle(east, east).fuzzy_eq(0.0));
    }
}
