use crate::{
    path::Bounds,
    shape::{Stroke, ViewBox},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest representable position.
pub const MIN_POSITION: i32 = -32768;
/// Largest representable position.
pub const MAX_POSITION: i32 = 32767;
/// Smallest representable size.
pub const MIN_SIZE: i32 = 1;
/// Largest representable size.
pub const MAX_SIZE: i32 = 32767;

/// Integer placement of an output shape. World coordinates for top level shapes, relative to the
/// group for group children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

fn clamp_to(value: f64, min: i32, max: i32, what: &str) -> i32 {
    let rounded = value.round();
    if rounded.is_nan() {
        log::debug!("{what} is not a number, using {min}");
        return min;
    }

    if rounded < min as f64 || rounded > max as f64 {
        log::debug!("{what} {value} is outside [{min}, {max}], clamping");
    }

    // in range after the clamp so the cast is exact
    rounded.clamp(min as f64, max as f64) as i32
}

impl Frame {
    /// Frame from bounds with positions clamped to [MIN_POSITION, MAX_POSITION] and sizes to
    /// [MIN_SIZE, MAX_SIZE].
    pub fn from_bounds(bounds: &Bounds) -> Self {
        Frame {
            top: clamp_to(bounds.y, MIN_POSITION, MAX_POSITION, "top"),
            left: clamp_to(bounds.x, MIN_POSITION, MAX_POSITION, "left"),
            width: clamp_to(bounds.width, MIN_SIZE, MAX_SIZE, "width"),
            height: clamp_to(bounds.height, MIN_SIZE, MAX_SIZE, "height"),
        }
    }

    /// Frame of `bounds` relative to the top left corner of `origin`.
    pub fn relative_to(bounds: &Bounds, origin: &Bounds) -> Self {
        Frame::from_bounds(&Bounds::new(
            bounds.x - origin.x,
            bounds.y - origin.y,
            bounds.width,
            bounds.height,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fill {
    pub color: String,
}

/// One output path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathDescriptor {
    pub d: String,
    pub fill: Fill,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub stroke: Option<Stroke>,
}

/// Output shape. The paths are in local coordinates starting at the origin of `viewbox`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeDescriptor {
    pub paths: Vec<PathDescriptor>,
    pub viewbox: ViewBox,
    pub frame: Frame,
}

/// Several output shapes placed relative to the group frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupDescriptor {
    pub frame: Frame,
    pub children: Vec<ShapeDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum Descriptor {
    Shape(ShapeDescriptor),
    Group(GroupDescriptor),
}

impl Descriptor {
    /// Shapes in the descriptor, one for a single shape.
    pub fn shapes(&self) -> &[ShapeDescriptor] {
        match self {
            Descriptor::Shape(s) => std::slice::from_ref(s),
            Descriptor::Group(g) => &g.children,
        }
    }

    #[inline]
    pub fn frame(&self) -> Frame {
        match self {
            Descriptor::Shape(s) => s.frame,
            Descriptor::Group(g) => g.frame,
        }
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        matches!(self, Descriptor::Group(_))
    }
}
