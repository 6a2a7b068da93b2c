//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use prism_math::{Interval, Vec3};

/// Record of a ray-object intersection.
///
/// The material is borrowed from the primitive that produced the hit; the
/// record itself is transient and lives for one shading step.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection. Unit length for every built-in
    /// primitive; the integrator renormalizes before shading regardless.
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("t", &self.t)
            .field("p", &self.p)
            .field("normal", &self.normal)
            .finish_non_exhaustive()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Hits at `t <= ray_t.min` or `t >= ray_t.max` are never reported, which
    /// keeps rays that start on a surface from hitting it again.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}
