//! Turns operation results into output shape descriptors.
//!
//! Every disjoint region of a result becomes one sanitized shape. A single region is emitted as a
//! plain shape at its world bounds; several regions are emitted as a group whose children are
//! positioned relative to the group's bounds.
mod descriptor;
pub mod export;

pub use descriptor::*;

use crate::{
    engine::{significant_components, EngineOptions, Operation, OperationResult},
    error::{BooleanError, SanitizeError},
    path::Bounds,
    polygon::Region,
    sanitize::{SanitizeOptions, SanitizedPath, Sanitizer, StageFailure},
    shape::{Style, ViewBox},
};
use export::{primary_path_data, secondary_path_data, ExportRepresentation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zero area path used for empty results.
pub const PLACEHOLDER_PATH: &str = "M0 0 L0 0 Z";

/// Options for [resolve].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ResolveOptions {
    pub engine: EngineOptions,
    pub sanitize: SanitizeOptions,
    /// Simplification tolerance of the secondary export.
    pub secondary_tolerance: f64,
}

impl ResolveOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            engine: EngineOptions::new(),
            sanitize: SanitizeOptions::new(),
            secondary_tolerance: 0.25,
        }
    }
}

impl Default for ResolveOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves results of one operation with one style.
pub struct Resolver<'a> {
    operation: Operation,
    style: &'a Style,
    options: &'a ResolveOptions,
    sanitizer: Sanitizer,
}

impl<'a> Resolver<'a> {
    pub fn new(operation: Operation, style: &'a Style, options: &'a ResolveOptions) -> Self {
        Resolver {
            operation,
            style,
            options,
            sanitizer: Sanitizer::new(options.sanitize),
        }
    }

    fn sanitize_error(&self, failure: StageFailure) -> BooleanError {
        BooleanError::Sanitize {
            operation: self.operation,
            stage: failure.stage,
            source: failure.source,
        }
    }

    /// Sanitize the primary export of a region, falling back once to the secondary export for
    /// failures a different representation can fix. If the fallback fails too the original
    /// failure is returned.
    pub fn sanitize_region(
        &self,
        region: &Region<f64>,
    ) -> Result<(SanitizedPath, ExportRepresentation), BooleanError> {
        let decimals = self.options.sanitize.decimal_places;
        let failure = match self.sanitizer.run(&primary_path_data(region, decimals)) {
            Ok(sanitized) => return Ok((sanitized, ExportRepresentation::Primary)),
            Err(failure) => failure,
        };

        if !matches!(
            failure.source,
            SanitizeError::PathTooComplex { .. } | SanitizeError::UnsupportedCommand { .. }
        ) {
            return Err(self.sanitize_error(failure));
        }

        log::debug!(
            "{}: primary export failed ({failure}), trying secondary export",
            self.operation
        );
        let secondary = secondary_path_data(
            region,
            decimals,
            self.options.secondary_tolerance,
            self.options.engine.boolean.pos_equal_eps,
        );
        match self.sanitizer.run(&secondary) {
            Ok(sanitized) => Ok((sanitized, ExportRepresentation::Secondary)),
            Err(_) => Err(self.sanitize_error(failure)),
        }
    }

    fn shape(&self, d: String, viewbox: ViewBox, frame: Frame) -> ShapeDescriptor {
        ShapeDescriptor {
            paths: vec![PathDescriptor {
                d,
                fill: Fill {
                    color: self.style.fill_color.clone(),
                },
                stroke: self.style.stroke.clone(),
            }],
            viewbox,
            frame,
        }
    }

    /// Shape for one region moved to the local origin, framed at `frame_origin` relative
    /// coordinates (world bounds if `None`).
    fn region_shape(
        &self,
        region: &Region<f64>,
        bounds: &Bounds,
        frame_origin: Option<&Bounds>,
    ) -> Result<ShapeDescriptor, BooleanError> {
        let holes = region.hole_count();
        if holes > 0 {
            log::warn!(
                "{}: region has {holes} hole(s), only its outer outline is emitted",
                self.operation
            );
        }

        let mut local = region.clone();
        local.translate_mut(-bounds.x, -bounds.y);
        let (sanitized, representation) = self.sanitize_region(&local)?;
        if !sanitized.repairs.is_empty() {
            log::debug!(
                "{}: {:?} export needed repairs {:?}",
                self.operation,
                representation,
                sanitized.repairs
            );
        }

        let frame = match frame_origin {
            Some(origin) => Frame::relative_to(bounds, origin),
            None => Frame::from_bounds(bounds),
        };

        Ok(self.shape(
            sanitized.d,
            ViewBox::new(0.0, 0.0, bounds.width, bounds.height),
            frame,
        ))
    }

    /// Zero area shape covering `bounds`.
    pub fn placeholder(&self, bounds: &Bounds) -> Result<ShapeDescriptor, BooleanError> {
        let sanitized = self
            .sanitizer
            .run(PLACEHOLDER_PATH)
            .map_err(|f| self.sanitize_error(f))?;
        Ok(self.shape(
            sanitized.d,
            ViewBox::new(0.0, 0.0, bounds.width, bounds.height),
            Frame::from_bounds(bounds),
        ))
    }

    /// Resolve `result`. `placeholder_bounds` is used for empty results.
    pub fn resolve(
        &self,
        result: &OperationResult,
        placeholder_bounds: &Bounds,
    ) -> Result<Descriptor, BooleanError> {
        let engine = &self.options.engine;
        let regions: Vec<(Region<f64>, Bounds)> = result
            .parts()
            .iter()
            .flat_map(|part| significant_components(&part.to_region(&engine.flatten), engine))
            .filter_map(|r| {
                let bounds = Bounds::from_aabb(&r.extents()?);
                Some((r, bounds))
            })
            .collect();

        match regions.len() {
            0 => {
                log::debug!("{}: empty result, emitting placeholder", self.operation);
                Ok(Descriptor::Shape(self.placeholder(placeholder_bounds)?))
            }
            1 => {
                let (region, bounds) = &regions[0];
                Ok(Descriptor::Shape(self.region_shape(region, bounds, None)?))
            }
            n => {
                let group_bounds = regions
                    .iter()
                    .map(|(_, b)| *b)
                    .reduce(|acc, b| acc.union(&b))
                    .unwrap_or_default();
                log::debug!("{}: {n} disjoint regions, emitting group", self.operation);
                let children = regions
                    .iter()
                    .map(|(region, bounds)| self.region_shape(region, bounds, Some(&group_bounds)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Descriptor::Group(GroupDescriptor {
                    frame: Frame::from_bounds(&group_bounds),
                    children,
                }))
            }
        }
    }
}

/// Resolve an operation result into a shape or group descriptor.
///
/// Empty results become a zero area placeholder covering `placeholder_bounds`.
pub fn resolve(
    result: &OperationResult,
    operation: Operation,
    placeholder_bounds: &Bounds,
    style: &Style,
    options: &ResolveOptions,
) -> Result<Descriptor, BooleanError> {
    Resolver::new(operation, style, options).resolve(result, placeholder_bounds)
}
