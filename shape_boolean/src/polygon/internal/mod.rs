//! Internal implementation details of the region boolean operations. Exposed so the stages can be
//! tested and reused independently, not part of the stable interface.
pub mod region_boolean;
pub mod region_intersects;
