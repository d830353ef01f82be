//! Boolean operations between two SVG path shapes.
//!
//! Shapes are placed in a shared world space ([transform]), each shape's subpaths are merged into
//! one compound path and the requested operation is run on the flattened outlines ([engine],
//! backed by the [polygon] clipping kernel). Results are written back as path data that satisfies
//! a restrictive output format ([sanitize]) and split into one shape per disjoint region
//! ([resolve]). [combine] runs the whole pipeline.
extern crate static_aabb2d_index;

#[macro_use]
mod macros;

pub mod combine;
pub mod core;
pub mod engine;
pub mod error;
pub mod path;
pub mod polygon;
pub mod resolve;
pub mod sanitize;
pub mod shape;
pub mod transform;

pub use combine::{combine, CombineOptions, CombineRequest};
pub use engine::{Operation, OperationResult};
pub use error::{BooleanError, PathParseError, SanitizeError};
pub use resolve::Descriptor;
