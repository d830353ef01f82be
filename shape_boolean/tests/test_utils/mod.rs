#![allow(dead_code)]

use shape_boolean::{
    core::traits::FuzzyEq,
    path::{parse_path_data, CompoundPath, FlattenOptions},
    polygon::Region,
    shape::Shape,
};

/// Control point distance factor for approximating a quarter circle with a cubic curve.
pub const CIRCLE_KAPPA: f64 = 0.552_284_749_830_793_4;

/// Absolute path data for an axis aligned rectangle.
pub fn rect_path(x: f64, y: f64, width: f64, height: f64) -> String {
    format!(
        "M{} {} L{} {} L{} {} L{} {} Z",
        x,
        y,
        x + width,
        y,
        x + width,
        y + height,
        x,
        y + height
    )
}

/// Absolute path data for a circle made of four cubic curves.
pub fn circle_path(cx: f64, cy: f64, r: f64) -> String {
    let k = r * CIRCLE_KAPPA;
    format!(
        "M{} {} C{} {} {} {} {} {} C{} {} {} {} {} {} C{} {} {} {} {} {} C{} {} {} {} {} {} Z",
        cx + r,
        cy,
        cx + r,
        cy + k,
        cx + k,
        cy + r,
        cx,
        cy + r,
        cx - k,
        cy + r,
        cx - r,
        cy + k,
        cx - r,
        cy,
        cx - r,
        cy - k,
        cx - k,
        cy - r,
        cx,
        cy - r,
        cx + k,
        cy - r,
        cx + r,
        cy - k,
        cx + r,
        cy
    )
}

pub fn rect_shape(id: &str, x: f64, y: f64, width: f64, height: f64) -> Shape {
    Shape::new(id).with_path(rect_path(x, y, width, height))
}

pub fn circle_shape(id: &str, cx: f64, cy: f64, r: f64) -> Shape {
    Shape::new(id).with_path(circle_path(cx, cy, r))
}

/// Filled region of path data (all subpaths, non-zero winding).
pub fn path_data_region(d: &str) -> Region<f64> {
    let subpaths = parse_path_data(d).expect("path data parses");
    CompoundPath::from_subpaths(subpaths).to_region(&FlattenOptions::new())
}

/// Absolute filled area of path data.
pub fn path_data_area(d: &str) -> f64 {
    path_data_region(d).area().abs()
}

/// Number of move commands (either case) in path data.
pub fn move_count(d: &str) -> usize {
    d.chars().filter(|c| matches!(c, 'M' | 'm')).count()
}

/// Number of close commands (either case) in path data.
pub fn close_count(d: &str) -> usize {
    d.chars().filter(|c| matches!(c, 'Z' | 'z')).count()
}

/// Check the output contract invariants on sanitized path data.
pub fn assert_output_contract(d: &str, max_bytes: usize) {
    assert_eq!(move_count(d), 1, "expected exactly one move in '{d}'");
    assert!(d.len() <= max_bytes, "path data is {} bytes", d.len());
    let closed = close_count(d) == 1 || {
        let subpaths = parse_path_data(d).expect("path data parses");
        subpaths[0]
            .start_point()
            .fuzzy_eq_eps(subpaths[0].current_point(), 1e-3)
    };
    assert!(closed, "path data is not closed: '{d}'");
}

/// Fuzzy compare areas with a tolerance relative to their magnitude.
pub fn areas_match(a: f64, b: f64, rel_eps: f64) -> bool {
    a.fuzzy_eq_eps(b, rel_eps * a.abs().max(b.abs()).max(1.0))
}
