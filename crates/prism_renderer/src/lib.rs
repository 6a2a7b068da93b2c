//! Prism renderer - progressive CPU ray tracing
//!
//! Renders a static scene of spheres, boxes and one triangle mesh by
//! stochastic ray tracing, one scanline per [`RenderContext::update`] call,
//! accumulating samples across passes.
//!
//! ```no_run
//! use prism_renderer::{Lambertian, RenderContext, RenderSettings, Scene, Sphere, Vec3};
//! use std::sync::Arc;
//!
//! let grass = Arc::new(Lambertian::new(Vec3::new(0.1, 0.6, 0.1)));
//! let scene = Scene::new(Sphere::new(Vec3::new(0.0, -1000.5, 0.0), 1000.0, grass)?);
//!
//! let mut ctx = RenderContext::new(RenderSettings::default())?;
//! while !ctx.is_converged() {
//!     ctx.update(&scene);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod aa_box;
mod camera;
mod hittable;
pub mod material;
mod progressive;
mod renderer;
pub mod sampling;
mod scene;
mod settings;
mod sphere;
mod triangle;

pub use aa_box::AaBox;
pub use camera::ViewCamera;
pub use hittable::{HitRecord, Hittable};
pub use material::{Color, Lambertian, Material, Metallic, ScatterResult, SharedMaterial, Transparent};
pub use progressive::{ImageBuffer, RenderContext};
pub use renderer::{color_to_rgba, linear_to_gamma, ray_color, render_pixel, sky_gradient, T_MAX, T_MIN};
pub use scene::{Scene, SceneError};
pub use settings::{ConfigError, RenderSettings};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types that appear in the public API
pub use prism_math::{Aabb, Interval, Mat4, Ray, Vec3, Vec4};
