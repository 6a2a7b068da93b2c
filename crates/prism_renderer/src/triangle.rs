//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    Ray, SceneError, SharedMaterial,
};
use prism_math::{Aabb, Interval, Vec3};

/// Rays this close to parallel with the triangle plane are treated as misses.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A triangle primitive.
#[derive(Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: SharedMaterial,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The face normal follows the winding `cross(v1 - v0, v2 - v0)`.
    /// Zero-area triangles have no normal and are rejected.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: SharedMaterial) -> Result<Self, SceneError> {
        let normal = (v1 - v0).cross(v2 - v0).try_normalize().ok_or(SceneError::DegenerateTriangle)?;

        Ok(Self {
            v0,
            v1,
            v2,
            normal,
            material,
        })
    }

    /// Tight bounds around the three vertices.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_point_cloud([self.v0, self.v1, self.v2])
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        // Check if intersection is outside triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        // Check if intersection is outside triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: self.normal,
            material: self.material.as_ref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use std::sync::Arc;

    fn grey() -> SharedMaterial {
        Arc::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5)))
    }

    // Triangle in XY plane at z=-1, counter-clockwise seen from the origin
    fn facing_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            grey(),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_hit() {
        let tri = facing_triangle();

        // Ray pointing at triangle center
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 1.0).abs() < 0.001);
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
        assert!((rec.normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = facing_triangle();

        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());

        // Plane is hit, but outside the edges
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());

        // Parallel to the plane
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);
        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_triangle_respects_interval() {
        let tri = facing_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(tri.hit(&ray, Interval::new(0.001, 0.9)).is_none());
        assert!(tri.hit(&ray, Interval::new(1.1, 2.0)).is_none());
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let result = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0, grey());
        assert_eq!(result.err(), Some(SceneError::DegenerateTriangle));
    }
}
