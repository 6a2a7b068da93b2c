//! Prism Core - scene data exchanged with external loaders.
//!
//! This crate provides:
//!
//! - **Mesh**: world-space triangle geometry produced by a loader (OBJ,
//!   USD, procedural) and consumed by `prism_renderer::Scene::set_mesh`.
//!
//! # Example
//!
//! ```
//! use prism_core::Mesh;
//! use prism_math::Vec3;
//!
//! let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]).unwrap();
//! assert_eq!(mesh.triangle_count(), 1);
//! ```

pub mod mesh;

// Re-export commonly used types
pub use mesh::{Mesh, MeshError};
