//! Path data export of result regions.

use crate::{
    path::write::{write_contour_absolute, write_contour_relative},
    polygon::Region,
};

/// Path data representation used for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportRepresentation {
    /// Absolute `M`/`L`/`Z` commands.
    Primary,
    /// Relative commands with decimated vertexes.
    Secondary,
}

/// Absolute path data, one subpath per contour.
pub fn primary_path_data(region: &Region<f64>, decimal_places: u32) -> String {
    region
        .contours
        .iter()
        .map(|c| write_contour_absolute(c, decimal_places))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Relative path data with collinear vertexes removed and each contour simplified with
/// `tolerance`. Contours that collapse are skipped.
pub fn secondary_path_data(
    region: &Region<f64>,
    decimal_places: u32,
    tolerance: f64,
    pos_equal_eps: f64,
) -> String {
    region
        .contours
        .iter()
        .filter_map(|c| {
            let reduced = c.remove_collinear(1e-9, pos_equal_eps);
            let simplified = reduced.as_ref().unwrap_or(c).simplified(tolerance);
            if simplified.vertex_count() < 3 {
                None
            } else {
                Some(write_contour_relative(&simplified, decimal_places))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
