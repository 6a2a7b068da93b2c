//! Primary ray generation.

use crate::sampling::gen_f32;
use crate::{Ray, RenderSettings};
use prism_math::{Mat4, Mat4Ext, Vec3};
use rand::RngCore;

/// Pinhole camera derived from the render settings for one scanline pass.
///
/// The image plane sits at view-space `z = -1` and spans `[-aspect, aspect]`
/// horizontally and `[-1, 1]` vertically. Rays are built in view space and
/// moved to world space by the inverse view transform.
#[derive(Debug, Clone, Copy)]
pub struct ViewCamera {
    width: u32,
    height: u32,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    world_from_view: Mat4,
}

impl ViewCamera {
    pub fn new(settings: &RenderSettings) -> Self {
        let aspect = settings.aspect_ratio();

        Self {
            width: settings.width,
            height: settings.height,
            lower_left: Vec3::new(-aspect, -1.0, -1.0),
            horizontal: Vec3::new(2.0 * aspect, 0.0, 0.0),
            vertical: Vec3::new(0.0, 2.0, 0.0),
            world_from_view: settings.view.inverse(),
        }
    }

    /// World-space ray through pixel `(x, y)`, jittered uniformly inside the
    /// pixel footprint. Row `y = 0` is the bottom of the image.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let u = (x as f32 + gen_f32(rng)) / self.width as f32;
        let v = (y as f32 + gen_f32(rng)) / self.height as f32;

        let view_ray = Ray::new(
            Vec3::ZERO,
            self.lower_left + u * self.horizontal + v * self.vertical,
        );
        self.world_from_view.transform_ray(&view_ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::Camera;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rays_stay_inside_pixel_footprint() {
        let settings = RenderSettings::default().with_resolution(200, 100);
        let camera = ViewCamera::new(&settings);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let ray = camera.get_ray(0, 0, &mut rng);
            assert_eq!(ray.origin, Vec3::ZERO);
            assert_eq!(ray.direction.z, -1.0);
            // Pixel (0, 0) covers u in [0, 1/200), v in [0, 1/100)
            assert!(ray.direction.x >= -2.0 && ray.direction.x < -2.0 + 4.0 / 200.0 + 1e-6);
            assert!(ray.direction.y >= -1.0 && ray.direction.y < -1.0 + 2.0 / 100.0 + 1e-6);
        }

        let ray = camera.get_ray(199, 99, &mut rng);
        assert!(ray.direction.x > 1.9 && ray.direction.y > 0.9);
    }

    #[test]
    fn test_view_transform_applied() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let view = Camera::new(eye, Vec3::ZERO).view_matrix();
        let settings = RenderSettings::default().with_resolution(64, 64).with_view(view);

        let camera = ViewCamera::new(&settings);
        let mut rng = StdRng::seed_from_u64(12);
        let ray = camera.get_ray(32, 32, &mut rng);

        assert!((ray.origin - eye).length() < 1e-5);
        // Still looking down -z, toward the origin
        assert!(ray.direction.z < 0.0);
        assert!(ray.direction.x.abs() < 0.05 && ray.direction.y.abs() < 0.05);
    }

    #[test]
    fn test_rotated_view() {
        // Looking down -x from the origin
        let view = Camera::new(Vec3::ZERO, Vec3::NEG_X).view_matrix();
        let settings = RenderSettings::default().with_resolution(64, 64).with_view(view);

        let camera = ViewCamera::new(&settings);
        let mut rng = StdRng::seed_from_u64(13);
        let ray = camera.get_ray(32, 32, &mut rng);

        assert!(ray.direction.normalize().dot(Vec3::NEG_X) > 0.99);
    }
}
