use clap::Parser;
use serde_json::Value;
use shape_boolean::Operation;
use shape_boolean_cli::{parse_request, run_request, Args};

const REQUEST: &str = r##"{
    "shapes": [
        { "id": "a", "subpaths": [{ "d": "M0 0 L10 0 L10 10 L0 10 Z" }] },
        {
            "id": "b",
            "subpaths": [{ "d": "M0 0 L10 0 L10 10 L0 10 Z", "fillColor": "#00ff00" }],
            "placement": { "x": 5, "y": 5 }
        }
    ],
    "operation": "intersect",
    "style": { "fillColor": "#ff0000" }
}"##;

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["shape-boolean"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn parses_request() {
    let request = parse_request(REQUEST).unwrap();
    assert_eq!(request.operation, Operation::Intersect);
    assert_eq!(request.shapes.len(), 2);
    assert_eq!(request.shapes[1].placement.unwrap().x, 5.0);
    assert_eq!(request.shapes[1].placement.unwrap().rotation_degrees, 0.0);
    assert_eq!(
        request.shapes[1].subpaths[0].fill_color.as_deref(),
        Some("#00ff00")
    );
    assert_eq!(request.style.fill_color, "#ff0000");
}

#[test]
fn style_defaults_when_missing() {
    let request = parse_request(r#"{ "shapes": [], "operation": "union" }"#).unwrap();
    assert_eq!(request.style.fill_color, "#000000");
}

#[test]
fn rejects_unknown_operation() {
    assert!(parse_request(r#"{ "shapes": [], "operation": "merge" }"#).is_err());
}

#[test]
fn runs_intersect() {
    let request = parse_request(REQUEST).unwrap();
    let json = run_request(&args(&[]), request).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "shape");
    assert_eq!(value["frame"]["left"], 5);
    assert_eq!(value["frame"]["top"], 5);
    assert_eq!(value["frame"]["width"], 5);
    assert_eq!(value["frame"]["height"], 5);
    assert_eq!(value["paths"][0]["fill"]["color"], "#ff0000");
    let d = value["paths"][0]["d"].as_str().unwrap();
    assert!(d.starts_with('M'));
    assert!(d.ends_with('Z'));
    assert_eq!(d.matches('M').count(), 1);
}

#[test]
fn operation_flag_overrides_request() {
    let request = parse_request(REQUEST).unwrap();
    let json = run_request(&args(&["--operation", "union"]), request).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["frame"]["width"], 15);
    assert_eq!(value["frame"]["height"], 15);
}

#[test]
fn pretty_output_is_multiline() {
    let request = parse_request(REQUEST).unwrap();
    let json = run_request(&args(&["--pretty"]), request).unwrap();
    assert!(json.contains('\n'));
}

#[test]
fn flags_map_to_options() {
    let options = args(&["--max-path-bytes", "512", "--no-rectangle-fallback"]).combine_options();
    assert_eq!(options.sanitize.max_path_bytes, 512);
    assert!(!options.sanitize.rectangle_fallback);

    let options = args(&[]).combine_options();
    assert_eq!(options.sanitize.max_path_bytes, 2048);
    assert!(options.sanitize.rectangle_fallback);
}

#[test]
fn engine_errors_are_reported() {
    let mut request = parse_request(REQUEST).unwrap();
    request.shapes.pop();
    let err = run_request(&args(&[]), request).unwrap_err();
    assert!(format!("{err:#}").contains("expected two shapes"));
}
