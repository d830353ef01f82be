//! Input shapes: raw SVG path data plus the placement used to map it into world space.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinate space the raw path data is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        ViewBox {
            top,
            left,
            width,
            height,
        }
    }
}

/// Position of a shape's top left corner and its rotation about its display center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation_degrees: f64,
}

impl Placement {
    #[inline]
    pub fn new(x: f64, y: f64, rotation_degrees: f64) -> Self {
        Placement {
            x,
            y,
            rotation_degrees,
        }
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.rotation_degrees != 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// One raw subpath of a shape with its own style.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ShapeSubPath {
    pub d: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub fill_color: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub stroke_color: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub stroke_width: Option<f64>,
}

impl ShapeSubPath {
    pub fn new(d: impl Into<String>) -> Self {
        ShapeSubPath {
            d: d.into(),
            ..Default::default()
        }
    }
}

/// Shape supplied by the caller. Never modified by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Shape {
    pub id: String,
    pub subpaths: Vec<ShapeSubPath>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub viewbox: Option<ViewBox>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: Option<Placement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_height: Option<f64>,
}

impl Shape {
    pub fn new(id: impl Into<String>) -> Self {
        Shape {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder helper appending an unstyled subpath.
    pub fn with_path(mut self, d: impl Into<String>) -> Self {
        self.subpaths.push(ShapeSubPath::new(d));
        self
    }

    pub fn with_viewbox(mut self, viewbox: ViewBox) -> Self {
        self.viewbox = Some(viewbox);
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_display_size(mut self, width: f64, height: f64) -> Self {
        self.display_width = Some(width);
        self.display_height = Some(height);
        self
    }

    /// Display size if both dimensions are given.
    pub fn display_size(&self) -> Option<Size> {
        match (self.display_width, self.display_height) {
            (Some(width), Some(height)) => Some(Size::new(width, height)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.placement.map_or(false, |p| p.is_rotated())
    }

    /// True if no subpath carries any path data.
    pub fn has_no_path_data(&self) -> bool {
        self.subpaths.iter().all(|s| s.d.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stroke {
    pub weight: f64,
    pub color: String,
}

/// Style applied to every output path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Style {
    pub fill_color: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub stroke: Option<Stroke>,
}

impl Style {
    pub fn fill(color: impl Into<String>) -> Self {
        Style {
            fill_color: color.into(),
            stroke: None,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::fill("#000000")
    }
}
