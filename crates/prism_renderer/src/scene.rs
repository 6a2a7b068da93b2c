//! Scene aggregate: every primitive the renderer can hit.
//!
//! Intersection is a linear scan in a fixed order (ground, spheres, boxes,
//! mesh). Each collection only sees the range up to the closest hit found so
//! far, so an equal-t hit later in the order never replaces an earlier one.

use crate::{AaBox, HitRecord, Hittable, Ray, SharedMaterial, Sphere, Triangle};
use prism_core::Mesh;
use prism_math::{Aabb, Interval, Vec3};
use thiserror::Error;

/// Errors raised while building scene content.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Box half extents must be positive and finite, got {0}")]
    InvalidExtents(Vec3),

    #[error("Transparency alpha must lie in [0, 1], got {0}")]
    InvalidAlpha(f32),

    #[error("Triangle has zero area")]
    DegenerateTriangle,
}

/// The renderable world.
///
/// Built once at setup and read concurrently by every render worker.
pub struct Scene {
    ground: Sphere,
    spheres: Vec<Sphere>,
    boxes: Vec<AaBox>,
    mesh: Vec<Triangle>,
    mesh_bounds: Aabb,
}

impl Scene {
    /// Create a scene holding only the ground primitive.
    pub fn new(ground: Sphere) -> Self {
        Self {
            ground,
            spheres: Vec::new(),
            boxes: Vec::new(),
            mesh: Vec::new(),
            mesh_bounds: Aabb::EMPTY,
        }
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_box(&mut self, aa_box: AaBox) {
        self.boxes.push(aa_box);
    }

    /// Replace the mesh with the triangles of `mesh`, moved by `offset`, all
    /// sharing `material`.
    ///
    /// Zero-area triangles are skipped. The mesh bounding volume is computed
    /// here from the triangles that were kept. Returns the number of
    /// triangles kept.
    pub fn set_mesh(&mut self, mesh: &Mesh, material: SharedMaterial, offset: Vec3) -> usize {
        self.mesh.clear();
        self.mesh.reserve(mesh.triangle_count());

        let mut skipped = 0;
        for [v0, v1, v2] in mesh.triangles() {
            match Triangle::new(v0 + offset, v1 + offset, v2 + offset, material.clone()) {
                Ok(triangle) => self.mesh.push(triangle),
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            log::warn!("Skipped {} degenerate mesh triangles", skipped);
        }

        self.mesh_bounds = self
            .mesh
            .iter()
            .fold(Aabb::EMPTY, |acc, tri| Aabb::surrounding(&acc, &tri.bounding_box()));

        log::info!(
            "Mesh set: {} triangles, bounds center {:?}, half extents {:?}",
            self.mesh.len(),
            self.mesh_bounds.centroid(),
            self.mesh_bounds.half_extents()
        );

        self.mesh.len()
    }

    /// Bounding volume gating the mesh triangles (empty when there is no mesh).
    pub fn mesh_bounds(&self) -> Aabb {
        self.mesh_bounds
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.len()
    }
}

/// Scan `objects` for hits closer than `range.max`, shrinking the range and
/// replacing `closest` on every strict improvement.
fn scan_nearest<'a, H: Hittable + 'a>(
    objects: impl IntoIterator<Item = &'a H>,
    ray: &Ray,
    range: &mut Interval,
    closest: &mut Option<HitRecord<'a>>,
) {
    for object in objects {
        if let Some(rec) = object.hit(ray, *range) {
            *range = range.with_max(rec.t);
            *closest = Some(rec);
        }
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest = None;
        let mut range = ray_t;

        scan_nearest(std::iter::once(&self.ground), ray, &mut range, &mut closest);
        scan_nearest(&self.spheres, ray, &mut range, &mut closest);
        scan_nearest(&self.boxes, ray, &mut range, &mut closest);

        if !self.mesh_bounds.is_empty() && self.mesh_bounds.hit(ray, range) {
            scan_nearest(&self.mesh, ray, &mut range, &mut closest);
        }

        closest
    }
}
