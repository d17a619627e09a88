//! Pure domain types with minimal dependencies
//!
//! Geometry and scoring live here; nothing in this module touches pixels
//! beyond the unit conversion itself.

pub mod geometry;
pub mod shot;

pub use geometry::*;
pub use shot::*;
