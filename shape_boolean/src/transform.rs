//! Maps raw shape geometry into the shared world space.
//!
//! The steps are applied in a fixed order: scale (viewbox to display size, about the origin),
//! translate (scaled bounds top left onto the placement position), rotate (about the center of
//! the placed display box).

use crate::{
    core::math::{vec2, Vector2},
    path::{Bounds, Point, SubPath},
    shape::{Placement, Shape, Size, ViewBox},
};

/// Grid coordinates are snapped to in [TransformMode::TranslationOnly].
pub const SNAP_GRID: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformMode {
    /// Scale, translate and rotate.
    #[default]
    Full,
    /// Scale and translate only, with coordinates snapped to [SNAP_GRID].
    TranslationOnly,
}

/// Resolved transform for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTransform {
    pub scale: Vector2<f64>,
    pub translation: Vector2<f64>,
    /// Clockwise on screen (y down).
    pub rotation_radians: f64,
    pub pivot: Point,
    pub snap_grid: Option<f64>,
}

impl ShapeTransform {
    pub fn identity() -> Self {
        ShapeTransform {
            scale: vec2(1.0, 1.0),
            translation: Vector2::zero(),
            rotation_radians: 0.0,
            pivot: Vector2::zero(),
            snap_grid: None,
        }
    }

    /// Transform for geometry with bounds `raw_bounds` (in viewbox space).
    ///
    /// Without placement and viewbox the transform is the identity. A zero viewbox dimension
    /// scales that axis by 1.
    pub fn for_geometry(
        raw_bounds: &Bounds,
        placement: Option<&Placement>,
        viewbox: Option<&ViewBox>,
        display_size: Option<Size>,
        mode: TransformMode,
    ) -> Self {
        let mut result = ShapeTransform::identity();
        if mode == TransformMode::TranslationOnly {
            result.snap_grid = Some(SNAP_GRID);
        }

        if placement.is_none() && viewbox.is_none() {
            return result;
        }

        result.scale = scale_factors(viewbox, display_size);
        let scaled = scaled_bounds(raw_bounds, result.scale);

        let placement = match placement {
            Some(p) => p,
            None => return result,
        };

        result.translation = vec2(placement.x - scaled.x, placement.y - scaled.y);

        if mode == TransformMode::Full && placement.is_rotated() {
            let display = display_size
                .or_else(|| viewbox.map(|vb| Size::new(vb.width, vb.height)))
                .unwrap_or(Size::new(scaled.width, scaled.height));
            result.rotation_radians = placement.rotation_degrees.to_radians();
            result.pivot = vec2(
                placement.x + display.width / 2.0,
                placement.y + display.height / 2.0,
            );
        }

        result
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.rotation_radians != 0.0
    }

    pub fn apply(&self, point: Point) -> Point {
        let mut p = point.scale_xy(self.scale.x, self.scale.y) + self.translation;
        if self.is_rotated() {
            p = p.rotate_about(self.pivot, self.rotation_radians);
        }

        match self.snap_grid {
            Some(grid) => p.snap(grid),
            None => p,
        }
    }

    pub fn apply_subpath(&self, subpath: &SubPath) -> SubPath {
        subpath.map_points(|p| self.apply(p))
    }
}

impl Default for ShapeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

fn scale_factors(viewbox: Option<&ViewBox>, display_size: Option<Size>) -> Vector2<f64> {
    let (viewbox, display) = match (viewbox, display_size) {
        (Some(vb), Some(d)) => (vb, d),
        _ => return vec2(1.0, 1.0),
    };

    let axis = |display: f64, extent: f64, name: &str| {
        if extent == 0.0 || !extent.is_finite() || !display.is_finite() {
            log::debug!("viewbox {name} is {extent}, using scale factor 1");
            1.0
        } else {
            display / extent
        }
    };

    vec2(
        axis(display.width, viewbox.width, "width"),
        axis(display.height, viewbox.height, "height"),
    )
}

fn scaled_bounds(raw: &Bounds, scale: Vector2<f64>) -> Bounds {
    let corners = [
        vec2(raw.x, raw.y).scale_xy(scale.x, scale.y),
        vec2(raw.right(), raw.bottom()).scale_xy(scale.x, scale.y),
    ];
    Bounds::from_points(corners).unwrap_or(*raw)
}

/// Transform a single raw subpath into world space.
///
/// # Examples
///
/// ```
/// # use shape_boolean::transform::transform;
/// # use shape_boolean::shape::*;
/// # use shape_boolean::path::*;
/// # use shape_boolean::core::math::vec2;
/// let mut raw = SubPath::new(vec2(0.0, 0.0));
/// raw.line_to(vec2(10.0, 0.0)).line_to(vec2(10.0, 10.0)).close();
/// let placed = transform(
///     &raw,
///     Some(&Placement::new(100.0, 50.0, 0.0)),
///     Some(&ViewBox::new(0.0, 0.0, 10.0, 10.0)),
///     Some(Size::new(20.0, 20.0)),
/// );
/// assert_eq!(placed.bounds(), Bounds::new(100.0, 50.0, 20.0, 20.0));
/// ```
pub fn transform(
    raw_path: &SubPath,
    placement: Option<&Placement>,
    viewbox: Option<&ViewBox>,
    display_size: Option<Size>,
) -> SubPath {
    ShapeTransform::for_geometry(
        &raw_path.bounds(),
        placement,
        viewbox,
        display_size,
        TransformMode::Full,
    )
    .apply_subpath(raw_path)
}

/// Transform all subpaths of a shape together, so that their bounds as a whole are placed and the
/// internal layout is kept.
pub fn transform_shape(shape: &Shape, subpaths: &[SubPath], mode: TransformMode) -> Vec<SubPath> {
    let raw_bounds = match subpaths
        .iter()
        .map(|s| s.bounds())
        .reduce(|acc, b| acc.union(&b))
    {
        Some(b) => b,
        None => return Vec::new(),
    };

    let t = ShapeTransform::for_geometry(
        &raw_bounds,
        shape.placement.as_ref(),
        shape.viewbox.as_ref(),
        shape.display_size(),
        mode,
    );

    subpaths.iter().map(|s| t.apply_subpath(s)).collect()
}
