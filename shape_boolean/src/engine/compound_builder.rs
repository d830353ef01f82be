use super::EngineOptions;
use crate::{
    error::BooleanError,
    path::{CompoundPath, SubPath},
    polygon::{BooleanOp, Region},
};

/// Merge the world space subpaths of one shape into a single compound path.
///
/// Subpaths enclosing less than `empty_area_eps` are ignored. A single remaining subpath is
/// returned unchanged, several are folded left to right with a union of their filled areas.
/// Fails with [BooleanError::NoGeometry] if nothing remains.
pub fn build(
    shape_id: &str,
    subpaths: Vec<SubPath>,
    options: &EngineOptions,
) -> Result<CompoundPath, BooleanError> {
    let eps = options.boolean.empty_area_eps;
    let mut usable: Vec<(SubPath, Region<f64>)> = subpaths
        .into_iter()
        .filter_map(|s| {
            let region = Region::from_filled_contour(&s.to_contour(&options.flatten));
            if region.area().abs() < eps {
                log::debug!("shape '{shape_id}': ignoring subpath without area");
                None
            } else {
                Some((s, region))
            }
        })
        .collect();

    if usable.len() <= 1 {
        return match usable.pop() {
            Some((s, _)) => Ok(CompoundPath::from_subpaths(vec![s])),
            None => Err(BooleanError::NoGeometry {
                shape_id: shape_id.to_string(),
            }),
        };
    }

    let mut iter = usable.into_iter().map(|(_, r)| r);
    let first = iter.next().unwrap_or_default();
    let merged = iter.fold(first, |acc, r| {
        acc.boolean_opt(&r, BooleanOp::Or, &options.boolean)
    });
    log::trace!(
        "shape '{shape_id}': merged subpaths into {} contour(s)",
        merged.contour_count()
    );

    if merged.area().abs() < eps {
        return Err(BooleanError::NoGeometry {
            shape_id: shape_id.to_string(),
        });
    }

    Ok(CompoundPath::from_region(&merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    fn square(x: f64, y: f64, size: f64) -> SubPath {
        let mut s = SubPath::new(vec2(x, y));
        s.line_to(vec2(x + size, y))
            .line_to(vec2(x + size, y + size))
            .line_to(vec2(x, y + size))
            .close();
        s
    }

    #[test]
    fn empty_input_is_no_geometry() {
        let err = build("a", Vec::new(), &EngineOptions::new()).unwrap_err();
        assert_eq!(
            err,
            BooleanError::NoGeometry {
                shape_id: "a".to_string()
            }
        );
    }

    #[test]
    fn single_subpath_unchanged() {
        let s = square(0.0, 0.0, 10.0);
        let c = build("a", vec![s.clone()], &EngineOptions::new()).unwrap();
        assert_eq!(c.subpaths, vec![s]);
    }

    #[test]
    fn overlapping_subpaths_are_merged() {
        let options = EngineOptions::new();
        let c = build(
            "a",
            vec![square(0.0, 0.0, 10.0), square(5.0, 5.0, 10.0)],
            &options,
        )
        .unwrap();
        assert_eq!(c.subpath_count(), 1);
        assert!((c.area(&options.flatten) - 175.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_subpaths_are_ignored() {
        let mut line = SubPath::new(vec2(0.0, 0.0));
        line.line_to(vec2(10.0, 0.0));
        let c = build("a", vec![line.clone(), square(0.0, 0.0, 1.0)], &EngineOptions::new());
        assert_eq!(c.unwrap().subpath_count(), 1);
        assert!(build("a", vec![line], &EngineOptions::new()).is_err());
    }
}
