//! Numeric foundation shared by the path, polygon, and engine modules: fuzzy float comparison
//! traits, a generic real number trait, and 2D vector/segment math.
pub mod math;
pub mod traits;
