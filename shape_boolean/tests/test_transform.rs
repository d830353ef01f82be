mod test_utils;

use shape_boolean::{
    assert_fuzzy_eq,
    core::{math::vec2, traits::FuzzyEq},
    path::{parse_path_data, Bounds, SubPath},
    shape::{Placement, Shape, Size, ViewBox},
    transform::{transform, transform_shape, ShapeTransform, TransformMode, SNAP_GRID},
};
use test_utils::rect_path;

fn raw_rect(x: f64, y: f64, w: f64, h: f64) -> SubPath {
    parse_path_data(&rect_path(x, y, w, h)).unwrap().remove(0)
}

fn assert_bounds_fuzzy_eq(actual: Bounds, expected: Bounds) {
    let eps = 1e-9;
    assert!(
        actual.x.fuzzy_eq_eps(expected.x, eps)
            && actual.y.fuzzy_eq_eps(expected.y, eps)
            && actual.width.fuzzy_eq_eps(expected.width, eps)
            && actual.height.fuzzy_eq_eps(expected.height, eps),
        "expected: {expected:?}, got: {actual:?}"
    );
}

#[test]
fn no_placement_or_viewbox_is_identity() {
    let raw = raw_rect(3.0, 4.0, 10.0, 5.0);
    assert_eq!(transform(&raw, None, None, None), raw);
    assert_eq!(
        transform(&raw, None, None, Some(Size::new(100.0, 100.0))),
        raw
    );
}

#[test]
fn scale_then_translate() {
    let raw = raw_rect(10.0, 10.0, 40.0, 20.0);
    let viewbox = ViewBox::new(0.0, 0.0, 100.0, 100.0);
    let placement = Placement::new(300.0, 200.0, 0.0);
    let placed = transform(
        &raw,
        Some(&placement),
        Some(&viewbox),
        Some(Size::new(50.0, 200.0)),
    );
    // scale (0.5, 2), top left of the scaled bounds lands on the placement
    assert_bounds_fuzzy_eq(placed.bounds(), Bounds::new(300.0, 200.0, 20.0, 40.0));
}

#[test]
fn zero_viewbox_dimension_scales_by_one() {
    let raw = raw_rect(0.0, 0.0, 10.0, 10.0);
    let placed = transform(
        &raw,
        Some(&Placement::new(0.0, 0.0, 0.0)),
        Some(&ViewBox::new(0.0, 0.0, 0.0, 20.0)),
        Some(Size::new(50.0, 40.0)),
    );
    assert_bounds_fuzzy_eq(placed.bounds(), Bounds::new(0.0, 0.0, 10.0, 20.0));
    assert!(placed.bounds().width.is_finite());
}

#[test]
fn rotation_about_display_center() {
    let raw = raw_rect(0.0, 0.0, 10.0, 10.0);
    let placement = Placement::new(100.0, 100.0, 90.0);
    let placed = transform(
        &raw,
        Some(&placement),
        Some(&ViewBox::new(0.0, 0.0, 10.0, 10.0)),
        Some(Size::new(10.0, 10.0)),
    );
    // square rotated a quarter turn about its own center occupies the same box
    assert_bounds_fuzzy_eq(placed.bounds(), Bounds::new(100.0, 100.0, 10.0, 10.0));
    // the start corner moves from the top left to the top right (y down, clockwise)
    assert_fuzzy_eq!(placed.start_point(), vec2(110.0, 100.0), 1e-9);
}

#[test]
fn rotation_uses_display_box_not_geometry_box() {
    // geometry occupies only the left half of the display box
    let raw = raw_rect(0.0, 0.0, 5.0, 10.0);
    let placed = transform(
        &raw,
        Some(&Placement::new(0.0, 0.0, 180.0)),
        Some(&ViewBox::new(0.0, 0.0, 10.0, 10.0)),
        Some(Size::new(10.0, 10.0)),
    );
    // half turn about (5, 5) moves it to the right half
    assert_bounds_fuzzy_eq(placed.bounds(), Bounds::new(5.0, 0.0, 5.0, 10.0));
}

#[test]
fn translation_only_mode_snaps_and_skips_rotation() {
    let raw = raw_rect(0.0, 0.0, 3.0, 3.0);
    let t = ShapeTransform::for_geometry(
        &raw.bounds(),
        Some(&Placement::new(10.00001234, 20.0, 45.0)),
        Some(&ViewBox::new(0.0, 0.0, 3.0, 3.0)),
        Some(Size::new(1.0, 1.0)),
        TransformMode::TranslationOnly,
    );
    assert!(!t.is_rotated());
    assert_eq!(t.snap_grid, Some(SNAP_GRID));
    let placed = t.apply_subpath(&raw);
    assert_eq!(placed.start_point(), vec2(10.0, 20.0));
    assert_bounds_fuzzy_eq(placed.bounds(), Bounds::new(10.0, 20.0, 1.0, 1.0));
}

#[test]
fn shape_subpaths_keep_their_layout() {
    let shape = Shape::new("s")
        .with_path(rect_path(0.0, 0.0, 10.0, 10.0))
        .with_path(rect_path(20.0, 0.0, 10.0, 10.0))
        .with_placement(Placement::new(100.0, 50.0, 0.0));
    let raw: Vec<SubPath> = shape
        .subpaths
        .iter()
        .flat_map(|s| parse_path_data(&s.d).unwrap())
        .collect();
    let placed = transform_shape(&shape, &raw, TransformMode::Full);
    assert_eq!(placed.len(), 2);
    assert_bounds_fuzzy_eq(placed[0].bounds(), Bounds::new(100.0, 50.0, 10.0, 10.0));
    assert_bounds_fuzzy_eq(placed[1].bounds(), Bounds::new(120.0, 50.0, 10.0, 10.0));
}
