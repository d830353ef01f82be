mod test_utils;

use shape_boolean::{
    core::math::vec2,
    error::SanitizeError,
    path::SubPath,
    sanitize::{
        sanitize, sanitize_subpath, Closure, ExtractionStrategy, MoveCheck, Repair,
        SanitizeOptions, SanitizeStage, Sanitizer,
    },
};
use test_utils::assert_output_contract;

const INPUTS: &[&str] = &[
    "M0 0 L10 0 L10 10 Z",
    "M0.12345 0 L10.0004 0 L10 10",
    "M0 0 Q5 5 10 0 L10 10 Z",
    "M0 0 L1 1 Z M10 10 L20 10 L20 20 L10 20 Z",
    "m10 10 l5 0 0 5 z m1 1 l1 0",
    "M0 0 M5 5",
    "M0 0 L5 5 # L0 5 Z",
    "M 1e2 0 L 100 1e2 L 0 100 z",
    "M0 0 A5 5 0 0 1 10 0 L10 10 Z",
    "M0,0 C0,5.5 4.5,10 10,10 S20,5 20,0",
    "M0 0 L5 0 L5 5 L0.0004 0",
    "M-0.0002 3 H10 V-4.99999 T1 1",
    "M0.0002 0 L10 0 L10 10 L0.0006 0",
    "M1e306 0 L10 0 L10 10 Z",
    "M0 0 L10 0 - L10 10 + Z",
];

fn options() -> SanitizeOptions {
    SanitizeOptions::new()
}

#[test]
fn sanitize_is_idempotent() {
    for input in INPUTS {
        let once = sanitize(input, &options()).unwrap();
        let twice = sanitize(&once.d, &options()).unwrap();
        assert_eq!(once.d, twice.d, "input: '{input}'");
    }
}

#[test]
fn sanitize_is_deterministic() {
    for input in INPUTS {
        assert_eq!(
            sanitize(input, &options()),
            sanitize(input, &options()),
            "input: '{input}'"
        );
    }
}

#[test]
fn output_contract_holds() {
    for input in INPUTS {
        let result = sanitize(input, &options()).unwrap();
        assert_output_contract(&result.d, options().max_path_bytes);
    }
}

#[test]
fn keeps_richer_subpath() {
    let result = sanitize(
        "M0 0 L1 0 L1 1 Z M100 100 L200 100 L200 200 L100 200 Z",
        &options(),
    )
    .unwrap();
    assert_eq!(result.d, "M100 100 L200 100 L200 200 L100 200 Z");
    assert_eq!(
        result.repairs,
        vec![Repair::SubpathExtracted {
            strategy: ExtractionStrategy::BestScore,
            discarded_moves: 1
        }]
    );
}

#[test]
fn oversized_path_is_rejected() {
    let mut d = String::from("M0 0");
    for i in 0..300 {
        d.push_str(&format!(" L{i}.123 {}.456", i * 2));
    }
    d.push_str(" Z");
    assert!(d.len() > 2048);

    let failure = Sanitizer::new(options()).run(&d).unwrap_err();
    assert_eq!(failure.stage, SanitizeStage::SizeLimit);
    assert!(matches!(
        failure.source,
        SanitizeError::PathTooComplex { limit: 2048, .. }
    ));
    assert!(matches!(
        sanitize(&d, &options()),
        Err(SanitizeError::PathTooComplex { .. })
    ));
}

#[test]
fn size_limit_is_configurable() {
    let mut opts = options();
    opts.max_path_bytes = 12;
    assert_eq!(
        sanitize("M0 0 L10 0 L10 10 Z", &opts),
        Err(SanitizeError::PathTooComplex {
            size: 19,
            limit: 12
        })
    );
}

#[test]
fn missing_move_is_fatal() {
    for input in ["L0 0 L1 1 Z", "", "  ", "3 4 M0 0 L1 1"] {
        let failure = Sanitizer::new(options()).run(input).unwrap_err();
        assert_eq!(failure.stage, SanitizeStage::MoveCheck, "input: '{input}'");
        assert_eq!(failure.source, SanitizeError::MissingMoveCommand);
    }
}

#[test]
fn unsupported_commands_are_fatal() {
    let failure = Sanitizer::new(options())
        .run("M0 0 L10 0 X5 5 L0 10 Z")
        .unwrap_err();
    assert_eq!(failure.stage, SanitizeStage::Whitelist);
    assert_eq!(
        failure.source,
        SanitizeError::UnsupportedCommand {
            found: "X".to_string()
        }
    );
}

#[test]
fn quadratic_curves_are_removed() {
    let result = sanitize("M0 0 Q5 5 10 0 L10 10 T20 20 Z", &options()).unwrap();
    assert_eq!(result.d, "M0 0 L10 10 Z");
    assert!(result
        .repairs
        .contains(&Repair::QuadraticRemoved { count: 2 }));
}

#[test]
fn closure_is_appended() {
    let result = sanitize("M0 0 L10 0 L10 10", &options()).unwrap();
    assert_eq!(result.d, "M0 0 L10 0 L10 10 Z");
    assert_eq!(result.repairs, vec![Repair::CloseAppended]);
}

#[test]
fn numbers_are_normalized() {
    let result = sanitize("M0.00049 -0.0004 L10.12349 0 L5.5000 7.10 Z", &options()).unwrap();
    assert_eq!(result.d, "M0 0 L10.123 0 L5.5 7.1 Z");
}

#[test]
fn stray_symbols_are_stripped() {
    let result = sanitize("M0 0 L10 0 ; L10 10 Z", &options()).unwrap();
    assert_eq!(result.d, "M0 0 L10 0 L10 10 Z");
    assert!(result
        .repairs
        .contains(&Repair::CharactersStripped { count: 1 }));
}

#[test]
fn endpoints_rounded_apart_are_closed() {
    let once = sanitize("M0.0002 0 L10 0 L10 10 L0.0006 0", &options()).unwrap();
    assert_eq!(once.d, "M0 0 L10 0 L10 10 L0.001 0 Z");
    assert!(once.repairs.contains(&Repair::CloseAppended));

    let twice = sanitize(&once.d, &options()).unwrap();
    assert_eq!(twice.d, once.d);
}

#[test]
fn large_numbers_are_kept() {
    let result = sanitize("M1e306 0 L10 0 L10 10 Z", &options()).unwrap();
    assert!(!result.d.contains("inf"));
    let x: f64 = result.d[1..].split(' ').next().unwrap().parse().unwrap();
    assert_eq!(x, 1e306);
    assert_output_contract(&result.d, 2048);
}

#[test]
fn non_finite_numbers_are_rejected() {
    let result = sanitize("M1e400 0 L10 0 L10 10 Z", &options());
    assert!(matches!(
        result,
        Err(SanitizeError::UnsupportedCommand { .. })
    ));
}

#[test]
fn stray_signs_are_dropped() {
    let result = sanitize("M0 0 L10 0 - L10 10 + Z", &options()).unwrap();
    assert_eq!(result.d, "M0 0 L10 0 L10 10 Z");
    assert!(result
        .repairs
        .contains(&Repair::CharactersStripped { count: 2 }));
}

#[test]
fn minimal_rectangle_fallback() {
    let result = sanitize("M0 0 M5 5 M7 7", &options()).unwrap();
    assert_eq!(result.d, "M0 0 L100 0 L100 100 L0 100 Z");
    assert!(result.used_rectangle_fallback());

    let mut opts = options();
    opts.rectangle_fallback = false;
    let failure = Sanitizer::new(opts).run("M0 0 M5 5 M7 7").unwrap_err();
    assert_eq!(failure.stage, SanitizeStage::SingleSubpath);
    assert_eq!(failure.source, SanitizeError::NoUsableSubpath);
}

#[test]
fn relative_subpath_extracted_from_middle() {
    let result = sanitize("M0 0 L1 0 Z m10 10 l10 0 0 10 -10 0 z", &options()).unwrap();
    assert_eq!(result.d, "M10 10 l10 0 0 10 -10 0 z");
    assert_output_contract(&result.d, 2048);
}

#[test]
fn custom_stage_list() {
    let sanitizer = Sanitizer::with_stages(options(), vec![Box::new(MoveCheck), Box::new(Closure)]);
    let result = sanitizer.run("M0 0 Q1 1 2 2 L5 5").unwrap();
    assert_eq!(result.d, "M0 0 Q1 1 2 2 L5 5 Z");
}

#[test]
fn sanitize_subpath_writes_absolute_data() {
    let mut s = SubPath::new(vec2(0.0, 0.0));
    s.line_to(vec2(10.0, 0.0))
        .cubic_to(vec2(10.0, 5.0), vec2(5.0, 10.0), vec2(0.0, 10.0))
        .close();
    let result = sanitize_subpath(&s, &options()).unwrap();
    assert_eq!(result.d, "M0 0 L10 0 C10 5 5 10 0 10 Z");
    assert!(result.repairs.is_empty());
}
