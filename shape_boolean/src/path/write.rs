//! SVG path data serialization.

use super::{CompoundPath, PathSegment, Point, SubPath};
use crate::polygon::Contour;
use std::fmt::Write;

/// Format `value` rounded to `decimal_places` with trailing zeros stripped. Values that round to
/// zero are written as `0` (no negative zero).
///
/// # Examples
///
/// ```
/// # use shape_boolean::path::write::format_number;
/// assert_eq!(format_number(1.23456, 3), "1.235");
/// assert_eq!(format_number(2.5000, 3), "2.5");
/// assert_eq!(format_number(-0.0001, 3), "0");
/// assert_eq!(format_number(10.0, 3), "10");
/// assert_eq!(format_number(1e306, 3).len(), 307);
/// ```
pub fn format_number(value: f64, decimal_places: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let factor = 10f64.powi(decimal_places as i32);
    let scaled = value * factor;
    let rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    };
    if rounded == 0.0 {
        return "0".to_string();
    }

    let mut s = format!("{:.*}", decimal_places as usize, rounded);
    if s.contains('.') {
        let trimmed_len = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed_len);
    }

    s
}

fn push_command(out: &mut String, command: char, points: &[Point], decimal_places: u32) {
    if !out.is_empty() {
        out.push(' ');
    }

    out.push(command);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // writing to a String cannot fail
        let _ = write!(
            out,
            "{} {}",
            format_number(p.x, decimal_places),
            format_number(p.y, decimal_places)
        );
    }
}

/// Absolute path data for a subpath (`M`, `L`, `C`, `Z`).
pub fn write_subpath(subpath: &SubPath, decimal_places: u32) -> String {
    let mut out = String::new();
    write_subpath_into(&mut out, subpath, decimal_places);
    out
}

fn write_subpath_into(out: &mut String, subpath: &SubPath, decimal_places: u32) {
    for segment in subpath.iter() {
        match segment {
            PathSegment::MoveTo(p) => push_command(out, 'M', &[p], decimal_places),
            PathSegment::LineTo(p) => push_command(out, 'L', &[p], decimal_places),
            PathSegment::CubicCurveTo { ctrl1, ctrl2, to } => {
                push_command(out, 'C', &[ctrl1, ctrl2, to], decimal_places)
            }
            PathSegment::ClosePath => push_command(out, 'Z', &[], decimal_places),
        }
    }
}

/// Absolute path data for every subpath of the compound, one move per subpath.
pub fn write_compound(compound: &CompoundPath, decimal_places: u32) -> String {
    let mut out = String::new();
    for subpath in compound.subpaths.iter() {
        write_subpath_into(&mut out, subpath, decimal_places);
    }
    out
}

/// Absolute `M`/`L`/`Z` path data for a contour.
pub fn write_contour_absolute(contour: &Contour<f64>, decimal_places: u32) -> String {
    let mut out = String::new();
    for (i, p) in contour.points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        push_command(&mut out, command, &[*p], decimal_places);
    }

    if !out.is_empty() {
        push_command(&mut out, 'Z', &[], decimal_places);
    }

    out
}

/// Relative `m`/`l`/`h`/`v`/`z` path data for a contour.
///
/// Deltas are taken between coordinates already rounded to `decimal_places` so rounding does not
/// accumulate along the contour. Points that round onto the previous point are skipped.
pub fn write_contour_relative(contour: &Contour<f64>, decimal_places: u32) -> String {
    let factor = 10f64.powi(decimal_places as i32);
    let round = |v: f64| (v * factor).round() / factor;
    let fmt = |v: f64| format_number(v, decimal_places);

    let mut out = String::new();
    let mut prev: Option<(f64, f64)> = None;
    for p in contour.points.iter() {
        let current = (round(p.x), round(p.y));
        match prev {
            None => {
                let _ = write!(out, "m{} {}", fmt(current.0), fmt(current.1));
            }
            Some(prev) => {
                let dx = round(current.0 - prev.0);
                let dy = round(current.1 - prev.1);
                if dx == 0.0 && dy == 0.0 {
                    continue;
                }

                let _ = if dy == 0.0 {
                    write!(out, " h{}", fmt(dx))
                } else if dx == 0.0 {
                    write!(out, " v{}", fmt(dy))
                } else {
                    write!(out, " l{} {}", fmt(dx), fmt(dy))
                };
            }
        }

        prev = Some(current);
    }

    if !out.is_empty() {
        out.push_str(" z");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(0.0004, 3), "0");
        assert_eq!(format_number(-0.0006, 3), "-0.001");
        assert_eq!(format_number(100.0, 3), "100");
        assert_eq!(format_number(-12.3400001, 3), "-12.34");
        assert_eq!(format_number(1.5, 0), "2");
    }

    #[test]
    fn subpath_absolute() {
        let mut s = SubPath::new(vec2(0.0, 0.0));
        s.line_to(vec2(10.0, 0.0))
            .cubic_to(vec2(10.0, 5.5), vec2(5.0, 10.0), vec2(0.0, 10.0))
            .close();
        assert_eq!(
            write_subpath(&s, 3),
            "M0 0 L10 0 C10 5.5 5 10 0 10 Z"
        );
    }

    #[test]
    fn contour_forms() {
        let c = contour![(1.0, 1.0), (11.0, 1.0), (11.0, 6.0), (1.0, 1.0004)];
        assert_eq!(write_contour_absolute(&c, 3), "M1 1 L11 1 L11 6 L1 1 Z");
        assert_eq!(write_contour_relative(&c, 3), "m1 1 h10 v5 l-10 -5 z");
    }
}
