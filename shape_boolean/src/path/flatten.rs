use super::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how cubic curves are approximated by line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct FlattenOptions {
    /// Maximum distance between the curve and its line segment approximation.
    pub tolerance: f64,
    /// Upper bound on the number of line segments a single curve is split into.
    pub max_segments_per_curve: usize,
}

impl FlattenOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            tolerance: 0.1,
            max_segments_per_curve: 64,
        }
    }
}

impl Default for FlattenOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Point on the cubic bezier at parametric value `t`.
#[inline]
pub fn cubic_point(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    p0.scale(a) + c1.scale(b) + c2.scale(c) + p3.scale(d)
}

/// Number of line segments needed to keep a cubic within `options.tolerance` of its
/// approximation, derived from the largest second difference of the control polygon.
///
/// # Examples
///
/// ```
/// # use shape_boolean::path::*;
/// # use shape_boolean::core::math::vec2;
/// let options = FlattenOptions::new();
/// // control points on a straight line need a single segment
/// let (p0, c1, c2, p3) = (vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(2.0, 0.0), vec2(3.0, 0.0));
/// let n = cubic_segment_count(p0, c1, c2, p3, &options);
/// assert_eq!(n, 1);
/// ```
pub fn cubic_segment_count(
    p0: Point,
    c1: Point,
    c2: Point,
    p3: Point,
    options: &FlattenOptions,
) -> usize {
    let dd1 = (p0 - c1.scale(2.0) + c2).length();
    let dd2 = (c1 - c2.scale(2.0) + p3).length();
    let dd = dd1.max(dd2);
    let max_count = options.max_segments_per_curve.max(1);
    if !(dd.is_finite() && options.tolerance > 0.0) {
        return max_count;
    }

    let count = (0.75 * dd / options.tolerance).sqrt().ceil();
    if count <= 1.0 {
        1
    } else if count >= max_count as f64 {
        max_count
    } else {
        count as usize
    }
}

/// Flatten a cubic bezier, pushing the approximation points onto `out`. The start point `p0` is
/// not pushed, the end point `p3` always is.
pub fn flatten_cubic(
    p0: Point,
    c1: Point,
    c2: Point,
    p3: Point,
    options: &FlattenOptions,
    out: &mut Vec<Point>,
) {
    let count = cubic_segment_count(p0, c1, c2, p3, options);
    for i in 1..count {
        let t = i as f64 / count as f64;
        out.push(cubic_point(p0, c1, c2, p3, t));
    }

    out.push(p3);
}

/// Tight axis aligned extents of a cubic bezier as `(min, max)` corner points.
pub fn cubic_extents(p0: Point, c1: Point, c2: Point, p3: Point) -> (Point, Point) {
    let mut min = Point::new(p0.x.min(p3.x), p0.y.min(p3.y));
    let mut max = Point::new(p0.x.max(p3.x), p0.y.max(p3.y));

    // roots of the derivative per axis give the interior extrema
    let axis_roots = |a: f64, b: f64, c: f64, d: f64| -> Vec<f64> {
        let qa = -a + 3.0 * b - 3.0 * c + d;
        let qb = 2.0 * (a - 2.0 * b + c);
        let qc = b - a;
        let mut roots = Vec::with_capacity(2);
        if qa.abs() < 1e-12 {
            if qb.abs() > 1e-12 {
                roots.push(-qc / qb);
            }
        } else {
            let disc = qb * qb - 4.0 * qa * qc;
            if disc >= 0.0 {
                let s = disc.sqrt();
                roots.push((-qb + s) / (2.0 * qa));
                roots.push((-qb - s) / (2.0 * qa));
            }
        }

        roots.retain(|&t| t > 0.0 && t < 1.0);
        roots
    };

    let roots = axis_roots(p0.x, c1.x, c2.x, p3.x)
        .into_iter()
        .chain(axis_roots(p0.y, c1.y, c2.y, p3.y));
    for t in roots {
        let p = cubic_point(p0, c1, c2, p3, t);
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }

    (min, max)
}
