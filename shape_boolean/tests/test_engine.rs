mod test_utils;

use shape_boolean::{
    engine::{build, execute, EngineOptions, Operation, OperationResult},
    error::BooleanError,
    path::{parse_path_data, CompoundPath},
};
use test_utils::{areas_match, circle_path, rect_path};

fn compound(d: &str) -> CompoundPath {
    let options = EngineOptions::new();
    build("test", parse_path_data(d).unwrap(), &options).unwrap()
}

fn area(result: &OperationResult) -> f64 {
    result.area(&EngineOptions::new().flatten)
}

fn operand_pairs() -> Vec<(&'static str, CompoundPath, CompoundPath)> {
    vec![
        (
            "overlapping rectangles",
            compound(&rect_path(0.0, 0.0, 10.0, 10.0)),
            compound(&rect_path(5.0, 5.0, 10.0, 10.0)),
        ),
        (
            "overlapping circles",
            compound(&circle_path(50.0, 50.0, 50.0)),
            compound(&circle_path(110.0, 60.0, 40.0)),
        ),
        (
            "circle and rectangle",
            compound(&circle_path(0.0, 0.0, 20.0)),
            compound(&rect_path(-7.0, -30.0, 14.0, 60.0)),
        ),
        (
            "disjoint rectangles",
            compound(&rect_path(0.0, 0.0, 1.0, 1.0)),
            compound(&rect_path(200.0, 0.0, 1.0, 1.0)),
        ),
    ]
}

#[test]
fn union_is_commutative() {
    let options = EngineOptions::new();
    for (name, a, b) in operand_pairs() {
        let ab = execute(Operation::Union, &a, &b, &options).unwrap();
        let ba = execute(Operation::Union, &b, &a, &options).unwrap();
        assert!(areas_match(area(&ab), area(&ba), 1e-9), "{name}");
        assert_eq!(ab.parts().len(), ba.parts().len(), "{name}");
    }
}

#[test]
fn complement_law() {
    let options = EngineOptions::new();
    for (name, a, b) in operand_pairs() {
        let union = area(&execute(Operation::Union, &a, &b, &options).unwrap());
        let intersect = area(&execute(Operation::Intersect, &a, &b, &options).unwrap());
        let expected = a.area(&options.flatten) + b.area(&options.flatten) - intersect;
        assert!(
            areas_match(union, expected, 1e-6),
            "{name}: union {union}, expected {expected}"
        );
    }
}

#[test]
fn fragment_completeness() {
    let options = EngineOptions::new();
    for (name, a, b) in operand_pairs() {
        let union = area(&execute(Operation::Union, &a, &b, &options).unwrap());
        let fragments = execute(Operation::Fragment, &a, &b, &options).unwrap();
        assert!(
            areas_match(area(&fragments), union, 1e-6),
            "{name}: fragments {}, union {union}",
            area(&fragments)
        );
    }
}

#[test]
fn fragment_parts_of_overlapping_rectangles() {
    let options = EngineOptions::new();
    let a = compound(&rect_path(0.0, 0.0, 10.0, 10.0));
    let b = compound(&rect_path(5.0, 5.0, 10.0, 10.0));
    let result = execute(Operation::Fragment, &a, &b, &options).unwrap();
    let mut areas: Vec<f64> = result
        .parts()
        .iter()
        .map(|p| p.area(&options.flatten))
        .collect();
    areas.sort_by(|x, y| x.partial_cmp(y).unwrap());
    assert_eq!(areas.len(), 3);
    assert!(areas_match(areas[0], 25.0, 1e-9));
    assert!(areas_match(areas[1], 75.0, 1e-9));
    assert!(areas_match(areas[2], 75.0, 1e-9));
}

#[test]
fn fragment_of_disjoint_shapes_keeps_originals() {
    let options = EngineOptions::new();
    let a = compound(&rect_path(0.0, 0.0, 1.0, 1.0));
    let b = compound(&rect_path(5.0, 0.0, 1.0, 1.0));
    match execute(Operation::Fragment, &a, &b, &options).unwrap() {
        OperationResult::Fragments(parts) => assert_eq!(parts, vec![a, b]),
        other => panic!("expected two fragments, got {other:?}"),
    }
}

#[test]
fn identical_circles_intersect_to_one_circle() {
    let options = EngineOptions::new();
    let a = compound(&circle_path(50.0, 50.0, 50.0));
    let b = compound(&circle_path(50.0, 50.0, 50.0));
    let result = execute(Operation::Intersect, &a, &b, &options).unwrap();
    assert!(matches!(result, OperationResult::Single(_)));
    assert!(areas_match(area(&result), a.area(&options.flatten), 1e-6));
    // close to the true circle area
    assert!(areas_match(area(&result), std::f64::consts::PI * 2500.0, 5e-3));
}

#[test]
fn disjoint_intersect_is_empty() {
    let options = EngineOptions::new();
    let a = compound(&circle_path(0.0, 0.0, 10.0));
    let b = compound(&circle_path(100.0, 0.0, 10.0));
    let result = execute(Operation::Intersect, &a, &b, &options).unwrap();
    assert_eq!(result, OperationResult::Empty);
}

#[test]
fn disjoint_union_is_disconnected() {
    let options = EngineOptions::new();
    let a = compound(&rect_path(0.0, 0.0, 1.0, 1.0));
    let b = compound(&rect_path(200.0, 0.0, 1.0, 1.0));
    let result = execute(Operation::Union, &a, &b, &options).unwrap();
    assert!(result.is_disconnected());
    assert_eq!(result.parts().len(), 2);
}

#[test]
fn exclude_of_identical_shapes_fails() {
    let options = EngineOptions::new();
    let a = compound(&rect_path(0.0, 0.0, 10.0, 10.0));
    let err = execute(Operation::Exclude, &a, &a.clone(), &options).unwrap_err();
    assert!(matches!(
        err,
        BooleanError::OperationFailed {
            operation: Operation::Exclude,
            ..
        }
    ));
}

#[test]
fn exclude_of_overlapping_rectangles() {
    let options = EngineOptions::new();
    let a = compound(&rect_path(0.0, 0.0, 10.0, 10.0));
    let b = compound(&rect_path(5.0, 5.0, 10.0, 10.0));
    let result = execute(Operation::Exclude, &a, &b, &options).unwrap();
    assert!(areas_match(area(&result), 150.0, 1e-9));
}

#[test]
fn subtract_contained_shape_keeps_hole() {
    let options = EngineOptions::new();
    let a = compound(&rect_path(0.0, 0.0, 20.0, 20.0));
    let b = compound(&circle_path(10.0, 10.0, 5.0));
    let result = execute(Operation::Subtract, &a, &b, &options).unwrap();
    match &result {
        OperationResult::Single(c) => assert_eq!(c.subpath_count(), 2),
        other => panic!("expected a single region with a hole, got {other:?}"),
    }
    let expected = 400.0 - b.area(&options.flatten);
    assert!(areas_match(area(&result), expected, 1e-6));
}

#[test]
fn subtract_covering_shape_is_empty() {
    let options = EngineOptions::new();
    let a = compound(&rect_path(5.0, 5.0, 5.0, 5.0));
    let b = compound(&rect_path(0.0, 0.0, 20.0, 20.0));
    let result = execute(Operation::Subtract, &a, &b, &options).unwrap();
    assert!(result.is_empty());
}

#[test]
fn build_merges_multi_subpath_shape() {
    let options = EngineOptions::new();
    let d = format!(
        "{} {}",
        rect_path(0.0, 0.0, 10.0, 10.0),
        rect_path(8.0, 0.0, 10.0, 10.0)
    );
    let merged = build("shape", parse_path_data(&d).unwrap(), &options).unwrap();
    assert_eq!(merged.subpath_count(), 1);
    assert!(areas_match(merged.area(&options.flatten), 180.0, 1e-9));
}
