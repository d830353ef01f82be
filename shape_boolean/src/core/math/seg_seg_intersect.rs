use super::{point_from_parametric, project_parametric, Vector2};
use crate::core::traits::Real;

/// Result of intersecting two line segments.
#[derive(Debug, Copy, Clone)]
pub enum SegSegIntr<T>
where
    T: Real,
{
    /// Segments do not touch.
    NoIntersect,
    /// Segments touch or cross at a single point.
    Point {
        /// Parametric value of the point along the first segment.
        seg1_t: T,
        /// Parametric value of the point along the second segment.
        seg2_t: T,
    },
    /// Segments are collinear and share a stretch of positive length.
    Overlapping {
        /// Parametric range of the shared stretch along the first segment (`seg1_t0 < seg1_t1`).
        seg1_t0: T,
        seg1_t1: T,
        /// Parametric values along the second segment of the points at `seg1_t0` and `seg1_t1`
        /// respectively (may be decreasing if the segments run in opposite directions).
        seg2_t0: T,
        seg2_t1: T,
    },
}

/// Finds the intersect between segment `v1->v2` and segment `u1->u2`.
///
/// `pos_equal_eps` is a distance: points closer than it are the same point and a segment within
/// it of a line is on that line. `collinear_eps` is compared against the sine of the angle
/// between the segments to decide whether they are parallel. Both parametric results are clamped
/// to `[0, 1]`.
///
/// Degenerate (zero length) segments never intersect; callers remove repeat vertexes before
/// building edges.
///
/// # Examples
///
/// ```
/// # use shape_boolean::core::math::*;
/// let r: SegSegIntr<f64> = seg_seg_intr(vec2(0.0, 0.0), vec2(2.0, 2.0), vec2(0.0, 2.0), vec2(2.0, 0.0), 1e-5, 1e-9);
/// match r {
///     SegSegIntr::Point { seg1_t, seg2_t } => {
///         assert!((seg1_t - 0.5).abs() < 1e-12);
///         assert!((seg2_t - 0.5).abs() < 1e-12);
///     }
///     _ => unreachable!("expected a crossing"),
/// }
/// ```
pub fn seg_seg_intr<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
    pos_equal_eps: T,
    collinear_eps: T,
) -> SegSegIntr<T>
where
    T: Real,
{
    use SegSegIntr::*;

    let v = v2 - v1;
    let u = u2 - u1;
    let seg1_length = v.length();
    let seg2_length = u.length();
    if seg1_length < pos_equal_eps || seg2_length < pos_equal_eps {
        return NoIntersect;
    }

    let clamp01 = |t: T| num_traits::clamp(t, T::zero(), T::one());
    let w = v1 - u1;
    let v_pdot_u = v.perp_dot(u);

    if (v_pdot_u / (seg1_length * seg2_length)).abs() > collinear_eps {
        // not parallel, solve for the single crossing point
        let seg1_t = u.perp_dot(w) / v_pdot_u;
        let seg2_t = v.perp_dot(w) / v_pdot_u;
        // compare at a length scale so the epsilon is a distance for both segments
        if !(seg1_t * seg1_length).fuzzy_in_range_eps(T::zero(), seg1_length, pos_equal_eps)
            || !(seg2_t * seg2_length).fuzzy_in_range_eps(T::zero(), seg2_length, pos_equal_eps)
        {
            return NoIntersect;
        }

        return Point {
            seg1_t: clamp01(seg1_t),
            seg2_t: clamp01(seg2_t),
        };
    }

    // parallel, check distance between the carrying lines
    let line_dist = v.perp_dot(w).abs() / seg1_length;
    if line_dist > pos_equal_eps {
        return NoIntersect;
    }

    // collinear, project the second segment onto the first
    let (lo, hi) = super::min_max(
        project_parametric(v1, v2, u1),
        project_parametric(v1, v2, u2),
    );
    let seg1_t0 = num_traits::real::Real::max(lo, T::zero());
    let seg1_t1 = num_traits::real::Real::min(hi, T::one());
    let shared_length = (seg1_t1 - seg1_t0) * seg1_length;

    if shared_length < -pos_equal_eps {
        return NoIntersect;
    }

    if shared_length <= pos_equal_eps {
        // end to end touch
        let seg1_t = clamp01((seg1_t0 + seg1_t1) * T::half());
        let point = point_from_parametric(v1, v2, seg1_t);
        return Point {
            seg1_t,
            seg2_t: clamp01(project_parametric(u1, u2, point)),
        };
    }

    let p0 = point_from_parametric(v1, v2, seg1_t0);
    let p1 = point_from_parametric(v1, v2, seg1_t1);
    Overlapping {
        seg1_t0,
        seg1_t1,
        seg2_t0: clamp01(project_parametric(u1, u2, p0)),
        seg2_t1: clamp01(project_parametric(u1, u2, p1)),
    }
}
