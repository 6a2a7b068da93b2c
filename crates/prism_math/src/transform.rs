// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3(), transform_vector3() and
// inverse(); this adds the ray-level helper the camera needs.

use glam::Mat4;
use crate::Ray;

/// Extension trait for Mat4 to provide ray transforms.
pub trait Mat4Ext {
    /// Transform a ray: the origin as a point (w=1), the direction as a
    /// vector (w=0). The direction is not renormalized.
    fn transform_ray(&self, ray: &Ray) -> Ray;
}

impl Mat4Ext for Mat4 {
    fn transform_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.transform_point3(ray.origin),
            self.transform_vector3(ray.direction),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_transform_ray_identity() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(Mat4::IDENTITY.transform_ray(&ray), ray);
    }

    #[test]
    fn test_transform_ray_translation_moves_origin_only() {
        let mat = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let moved = mat.transform_ray(&ray);

        assert_eq!(moved.origin, Vec3::new(10.0, 20.0, 30.0));
        // Translation should NOT affect directions (w=0)
        assert_eq!(moved.direction, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_transform_ray_rotation() {
        use std::f32::consts::PI;

        // 90 degree rotation around Y axis takes -Z to -X
        let mat = Mat4::from_rotation_y(PI / 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rotated = mat.transform_ray(&ray);

        assert!((rotated.direction - Vec3::new(-1.0, 0.0, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_transform_ray_round_trip() {
        let mat = Mat4::from_rotation_x(0.3) * Mat4::from_translation(Vec3::new(1.0, -2.0, 5.0));
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(0.2, -1.0, 0.4));
        let back = mat.inverse().transform_ray(&mat.transform_ray(&ray));

        assert!((back.origin - ray.origin).length() < 0.001);
        assert!((back.direction - ray.direction).length() < 0.001);
    }
}
