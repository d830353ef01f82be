use super::{EngineOptions, Operation, OperationResult};
use crate::{
    error::BooleanError,
    path::CompoundPath,
    polygon::{BooleanOp, Region},
};

/// Connected components of `region` whose area is not below the empty area epsilon.
pub fn significant_components(region: &Region<f64>, options: &EngineOptions) -> Vec<Region<f64>> {
    region
        .components(options.boolean.pos_equal_eps)
        .into_iter()
        .filter(|c| c.area().abs() >= options.boolean.empty_area_eps)
        .collect()
}

fn classify(region: &Region<f64>, options: &EngineOptions) -> OperationResult {
    let parts = significant_components(region, options)
        .iter()
        .map(CompoundPath::from_region)
        .collect();
    OperationResult::from_parts(parts)
}

/// Run `op` between two compound paths.
///
/// Empty intersections (and subtractions) are returned as [OperationResult::Empty], an empty
/// exclude or fragment result is an error. Results made up of several disjoint regions are
/// returned as [OperationResult::Fragments] for every operation.
pub fn execute(
    op: Operation,
    a: &CompoundPath,
    b: &CompoundPath,
    options: &EngineOptions,
) -> Result<OperationResult, BooleanError> {
    let ra = a.to_region(&options.flatten);
    let rb = b.to_region(&options.flatten);
    log::trace!(
        "{op}: {} and {} contour(s)",
        ra.contour_count(),
        rb.contour_count()
    );

    let boolean = |r1: &Region<f64>, r2: &Region<f64>, bool_op| {
        r1.boolean_opt(r2, bool_op, &options.boolean)
    };

    match op {
        Operation::Union => Ok(classify(&boolean(&ra, &rb, BooleanOp::Or), options)),
        Operation::Intersect => Ok(classify(&boolean(&ra, &rb, BooleanOp::And), options)),
        Operation::Subtract => Ok(classify(&boolean(&ra, &rb, BooleanOp::Not), options)),
        Operation::Exclude => {
            let result = classify(&boolean(&ra, &rb, BooleanOp::Xor), options);
            if result.is_empty() {
                return Err(BooleanError::operation_failed(
                    op,
                    "the shapes cover the same area, nothing is left to exclude",
                ));
            }
            Ok(result)
        }
        Operation::Fragment => fragment(a, b, &ra, &rb, options),
    }
}

fn fragment(
    a: &CompoundPath,
    b: &CompoundPath,
    ra: &Region<f64>,
    rb: &Region<f64>,
    options: &EngineOptions,
) -> Result<OperationResult, BooleanError> {
    let eps = options.boolean.empty_area_eps;
    let intersection = ra.boolean_opt(rb, BooleanOp::And, &options.boolean);

    let parts: Vec<CompoundPath> = if intersection.area().abs() < eps {
        log::debug!("fragment: shapes do not intersect, keeping both as they are");
        [(a, ra), (b, rb)]
            .into_iter()
            .filter(|(_, r)| r.area().abs() >= eps)
            .map(|(c, _)| c.clone())
            .collect()
    } else {
        let a_only = ra.boolean_opt(rb, BooleanOp::Not, &options.boolean);
        let b_only = rb.boolean_opt(ra, BooleanOp::Not, &options.boolean);
        [a_only, b_only, intersection]
            .iter()
            .flat_map(|r| significant_components(r, options))
            .map(|r| CompoundPath::from_region(&r))
            .collect()
    };

    if parts.is_empty() {
        return Err(BooleanError::operation_failed(
            Operation::Fragment,
            "no fragment with a usable area was produced",
        ));
    }

    log::trace!("fragment: {} part(s)", parts.len());
    Ok(OperationResult::from_parts(parts))
}
