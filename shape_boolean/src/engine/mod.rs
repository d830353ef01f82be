//! Compound path building and the boolean operations between two shapes.
mod compound_builder;
mod execute;
mod operation;

pub use compound_builder::*;
pub use execute::*;
pub use operation::*;
