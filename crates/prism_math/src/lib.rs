//! Prism math types.
//!
//! Re-exports glam and adds the small set of geometric helpers shared by the
//! scene and renderer crates.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod camera;
mod interval;
mod ray;
mod transform;

pub use aabb::{Aabb, SlabSpan};
pub use camera::Camera;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;
