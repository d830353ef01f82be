use super::{write, Bounds, FlattenOptions, SubPath};
use crate::polygon::{Contour, Region};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of subpaths treated as one outline.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompoundPath {
    pub subpaths: Vec<SubPath>,
}

impl CompoundPath {
    #[inline]
    pub fn new() -> Self {
        CompoundPath {
            subpaths: Vec::new(),
        }
    }

    #[inline]
    pub fn from_subpaths(subpaths: Vec<SubPath>) -> Self {
        CompoundPath { subpaths }
    }

    /// One closed subpath per contour of the region (hole direction preserved).
    pub fn from_region(region: &Region<f64>) -> Self {
        CompoundPath {
            subpaths: region
                .contours
                .iter()
                .filter_map(SubPath::from_contour)
                .collect(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    #[inline]
    pub fn subpath_count(&self) -> usize {
        self.subpaths.len()
    }

    /// Flatten into a region. Contour directions are kept, except that when the net area is
    /// negative every contour is reversed so filled space has positive area.
    pub fn to_region(&self, options: &FlattenOptions) -> Region<f64> {
        let contours: Vec<Contour<f64>> =
            self.subpaths.iter().map(|s| s.to_contour(options)).collect();
        let mut region = Region::from_contours(contours);
        if region.area() < 0.0 {
            for c in region.contours.iter_mut() {
                c.invert_direction_mut();
            }
        }

        region
    }

    /// Net filled area.
    #[inline]
    pub fn area(&self, options: &FlattenOptions) -> f64 {
        self.to_region(options).area()
    }

    /// Combined bounds of all subpaths, `None` if empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.subpaths
            .iter()
            .map(|s| s.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn translate(&self, x_offset: f64, y_offset: f64) -> CompoundPath {
        CompoundPath {
            subpaths: self
                .subpaths
                .iter()
                .map(|s| s.translate(x_offset, y_offset))
                .collect(),
        }
    }

    /// Absolute SVG path data with one move per subpath.
    pub fn to_path_data(&self, decimal_places: u32) -> String {
        write::write_compound(self, decimal_places)
    }
}
