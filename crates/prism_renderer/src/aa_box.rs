//! Axis-aligned box primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Ray, SceneError, SharedMaterial,
};
use prism_math::{Aabb, Interval, Vec3};

/// A solid axis-aligned box given by its center and half extents.
#[derive(Clone)]
pub struct AaBox {
    bounds: Aabb,
    material: SharedMaterial,
}

impl AaBox {
    /// Create a new box. Every half extent must be positive and finite.
    pub fn new(center: Vec3, half_extents: Vec3, material: SharedMaterial) -> Result<Self, SceneError> {
        if !(half_extents.cmpgt(Vec3::ZERO).all() && half_extents.is_finite()) {
            return Err(SceneError::InvalidExtents(half_extents));
        }

        Ok(Self {
            bounds: Aabb::from_center(center, half_extents),
            material,
        })
    }
}

impl Hittable for AaBox {
    /// Slab intersection. Only the entry face counts, so a ray starting
    /// inside the box (or on its surface, heading out) misses it.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let span = self.bounds.slab_span(ray)?;
        if !ray_t.surrounds(span.t_enter) {
            return None;
        }

        let t = span.t_enter;
        let axis = span.enter_axis;

        // Face normal along the slab axis, pointing back toward the origin
        let mut normal = Vec3::ZERO;
        normal[axis] = -ray.direction()[axis].signum();

        Some(HitRecord {
            t,
            p: ray.at(t),
            normal,
            material: self.material.as_ref(),
        })
    }
}
