//! Path data model: segments, subpaths and compound paths, plus SVG path data parsing, writing and
//! curve flattening.
mod bounds;
mod compound;
mod flatten;
mod parser;
mod segment;
mod subpath;
pub mod write;

pub use bounds::*;
pub use compound::*;
pub use flatten::*;
pub use parser::*;
pub use segment::*;
pub use subpath::*;
