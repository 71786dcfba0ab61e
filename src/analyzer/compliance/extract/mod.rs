//! Extractors for resource data.
//!
//! Helper functions that pull the sub-structures rules care about out of
//! heterogeneous resource shapes.

pub mod container;
pub mod fields;

pub use container::*;
