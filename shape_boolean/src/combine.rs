//! End to end combination of two shapes: parse, transform, build, operate, resolve.

use crate::{
    engine::{build, execute, EngineOptions, Operation, OperationResult},
    error::BooleanError,
    path::{parse_path_data, Bounds, CompoundPath, SubPath},
    resolve::{resolve, Descriptor, ResolveOptions},
    sanitize::SanitizeOptions,
    shape::{Shape, Style},
    transform::{transform_shape, TransformMode},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for [combine].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct CombineOptions {
    pub engine: EngineOptions,
    pub sanitize: SanitizeOptions,
    /// Simplification tolerance of the secondary export.
    pub secondary_tolerance: f64,
    /// Re-run a union or subtract on translation only geometry when a contiguous result was
    /// expected but the result is disconnected.
    pub retry_disconnected: bool,
}

impl CombineOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            engine: EngineOptions::new(),
            sanitize: SanitizeOptions::new(),
            secondary_tolerance: 0.25,
            retry_disconnected: true,
        }
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            engine: self.engine,
            sanitize: self.sanitize,
            secondary_tolerance: self.secondary_tolerance,
        }
    }
}

impl Default for CombineOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Two shapes, the operation between them and the style of the result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombineRequest {
    pub shapes: Vec<Shape>,
    pub operation: Operation,
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: Style,
}

impl CombineRequest {
    pub fn run(&self, options: &CombineOptions) -> Result<Descriptor, BooleanError> {
        combine(&self.shapes, self.operation, &self.style, options)
    }
}

/// Parse all path data of a shape. Path data that fails to parse is skipped.
pub fn parse_shape(shape: &Shape) -> Vec<SubPath> {
    let mut result = Vec::new();
    for (i, subpath) in shape.subpaths.iter().enumerate() {
        if subpath.d.trim().is_empty() {
            continue;
        }

        match parse_path_data(&subpath.d) {
            Ok(parsed) => result.extend(parsed),
            Err(e) => log::warn!("shape '{}': skipping path {i}: {e}", shape.id),
        }
    }

    result
}

/// World space compound path of a shape.
pub fn prepare_shape(
    shape: &Shape,
    mode: TransformMode,
    options: &EngineOptions,
) -> Result<CompoundPath, BooleanError> {
    let raw = parse_shape(shape);
    let placed = transform_shape(shape, &raw, mode);
    build(&shape.id, placed, options)
}

fn validate(shapes: &[Shape]) -> Result<(&Shape, &Shape), BooleanError> {
    let (a, b) = match shapes {
        [a, b] => (a, b),
        _ => {
            return Err(BooleanError::input(format!(
                "expected two shapes, got {}",
                shapes.len()
            )))
        }
    };

    for shape in [a, b] {
        if shape.has_no_path_data() {
            return Err(BooleanError::input(format!(
                "shape '{}' has no path data",
                shape.id
            )));
        }
    }

    Ok((a, b))
}

/// True if both operands are single connected regions with overlapping bounds.
fn expects_contiguous(a: &CompoundPath, b: &CompoundPath, options: &EngineOptions) -> bool {
    let single = |c: &CompoundPath| {
        c.to_region(&options.flatten)
            .components(options.boolean.pos_equal_eps)
            .len()
            == 1
    };

    match (a.bounds(), b.bounds()) {
        (Some(ba), Some(bb)) => {
            ba.overlaps(&bb, options.boolean.pos_equal_eps) && single(a) && single(b)
        }
        _ => false,
    }
}

fn retry_translation_only(
    a: &Shape,
    b: &Shape,
    operation: Operation,
    options: &EngineOptions,
) -> Result<OperationResult, BooleanError> {
    let ta = prepare_shape(a, TransformMode::TranslationOnly, options)?;
    let tb = prepare_shape(b, TransformMode::TranslationOnly, options)?;
    execute(operation, &ta, &tb, options)
}

/// Combine two shapes with `operation` and resolve the result into an output descriptor.
///
/// # Examples
///
/// ```
/// # use shape_boolean::combine::*;
/// # use shape_boolean::engine::Operation;
/// # use shape_boolean::shape::*;
/// let a = Shape::new("a").with_path("M0 0 L10 0 L10 10 L0 10 Z");
/// let b = Shape::new("b").with_path("M5 5 L15 5 L15 15 L5 15 Z");
/// let result = combine(&[a, b], Operation::Intersect, &Style::fill("#ff0000"), &CombineOptions::new()).unwrap();
/// let shape = &result.shapes()[0];
/// assert_eq!((shape.frame.left, shape.frame.top, shape.frame.width, shape.frame.height), (5, 5, 5, 5));
/// ```
pub fn combine(
    shapes: &[Shape],
    operation: Operation,
    style: &Style,
    options: &CombineOptions,
) -> Result<Descriptor, BooleanError> {
    let (shape_a, shape_b) = validate(shapes)?;
    let engine = &options.engine;
    let a = prepare_shape(shape_a, TransformMode::Full, engine)?;
    let b = prepare_shape(shape_b, TransformMode::Full, engine)?;

    let mut result = execute(operation, &a, &b, engine)?;

    let retry_applies = options.retry_disconnected
        && matches!(operation, Operation::Union | Operation::Subtract)
        && result.is_disconnected()
        && !shape_a.is_rotated()
        && !shape_b.is_rotated()
        && expects_contiguous(&a, &b, engine);
    if retry_applies {
        log::debug!("{operation}: unexpected disconnected result, retrying with translation only");
        let retried = retry_translation_only(shape_a, shape_b, operation, engine)?;
        if matches!(retried, OperationResult::Single(_)) {
            result = retried;
        } else {
            log::warn!("{operation}: result is still disconnected after retry, accepting it");
        }
    }

    let placeholder_bounds = match (a.bounds(), b.bounds()) {
        (Some(ba), Some(bb)) => ba.union(&bb),
        (Some(bounds), None) | (None, Some(bounds)) => bounds,
        (None, None) => Bounds::default(),
    };

    resolve(
        &result,
        operation,
        &placeholder_bounds,
        style,
        &options.resolve_options(),
    )
}
