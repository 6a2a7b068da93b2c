//! Material trait for surface scattering.

use crate::sampling::{gen_f32, near_zero, random_in_hemisphere};
use crate::{hittable::HitRecord, Ray, SceneError};
use prism_math::Vec3;
use rand::RngCore;
use std::sync::Arc;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Material handle shared by every primitive that uses it.
pub type SharedMaterial = Arc<dyn Material>;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Component-wise multiplier applied to the light carried back along
    /// `scattered`.
    pub attenuation: Color,
    /// Outgoing ray, starting at the hit point.
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are stateless; every random draw comes from the `rng` the
/// caller passes in.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let direction = or_normal(rec.normal + random_in_hemisphere(rng, rec.normal), rec.normal);

        front_side(direction, rec.normal).then(|| ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Metallic (perfect mirror) material.
#[derive(Debug, Clone)]
pub struct Metallic {
    albedo: Color,
}

impl Metallic {
    /// Create a new mirror material tinted by `albedo`.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Metallic {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let direction = or_normal(reflect(ray_in.direction().normalize(), rec.normal), rec.normal);

        // Grazing or back-facing reflections are absorbed
        front_side(direction, rec.normal).then(|| ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Partially transmissive material.
///
/// A stylized stand-in for glass: with probability `1 - alpha` the surface
/// acts as a tinted mirror, otherwise the ray continues straight through
/// (no refraction) with a washed-out tint. Never absorbs.
#[derive(Debug, Clone)]
pub struct Transparent {
    albedo: Color,
    alpha: f32,
}

impl Transparent {
    /// Create a new transparent material.
    ///
    /// - `albedo`: tint color
    /// - `alpha`: pass-through probability in [0, 1]
    pub fn new(albedo: Color, alpha: f32) -> Result<Self, SceneError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(SceneError::InvalidAlpha(alpha));
        }
        Ok(Self { albedo, alpha })
    }
}

impl Material for Transparent {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let (attenuation, direction) = if gen_f32(rng) >= self.alpha {
            (self.albedo, reflect(ray_in.direction().normalize(), rec.normal))
        } else {
            (
                (1.0 - self.alpha) * self.albedo + self.alpha * Color::ONE,
                ray_in.direction(),
            )
        };

        Some(ScatterResult {
            attenuation,
            scattered: Ray::new(rec.p, or_normal(direction, rec.normal)),
        })
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Substitute the surface normal for a numerically degenerate direction.
#[inline]
fn or_normal(direction: Vec3, normal: Vec3) -> Vec3 {
    if near_zero(direction) {
        normal
    } else {
        direction
    }
}

#[inline]
fn front_side(direction: Vec3, normal: Vec3) -> bool {
    direction.dot(normal) > 0.0
}
