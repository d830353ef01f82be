//! Flattened polygon geometry and the boolean clipping kernel.
//!
//! A [Region] is a set of closed [Contour]s interpreted with the non-zero winding rule: outer
//! boundaries have positive signed area (counter clockwise in a y-up frame) and holes have
//! negative signed area. Boolean operations keep that convention for their results.
pub mod internal;
mod contour;
mod polygon_types;
mod region;

pub use contour::*;
pub use polygon_types::*;
pub use region::*;
