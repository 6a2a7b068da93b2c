//! Core path tracing integrator.
//!
//! Recursive, depth-bounded ray tracing with a two-color background
//! gradient and an optional normal visualization mode.

use crate::{Color, Hittable, Ray, RenderSettings, ViewCamera};
use prism_math::Interval;
use rand::RngCore;

/// Hits closer than this are ignored, so scattered rays do not re-hit the
/// surface they leave.
pub const T_MIN: f32 = 0.001;

/// Far limit of every scene query.
pub const T_MAX: f32 = 1000.0;

/// Compute the color seen by a ray.
///
/// `depth_remaining` is consumed by value: each bounce recurses with
/// `depth_remaining - 1`, and a negative budget returns black. A path can
/// therefore scatter at most `max_bounces + 1` times.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth_remaining: i32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    if depth_remaining < 0 {
        return Color::ZERO;
    }

    let Some(mut rec) = world.hit(ray, Interval::new(T_MIN, T_MAX)) else {
        return sky_gradient(ray, settings);
    };

    rec.normal = rec.normal.normalize();
    if settings.show_normals {
        return rec.normal * 0.5 + 0.5;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth_remaining - 1, settings, rng)
        }
        // Absorbed
        None => Color::ZERO,
    }
}

/// Background for rays that escape the scene.
pub fn sky_gradient(ray: &Ray, settings: &RenderSettings) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * settings.ground_color + t * settings.sky_color
}

/// Average `settings.samples` jittered estimates for one pixel.
pub fn render_pixel(
    camera: &ViewCamera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = settings.samples.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, settings.max_bounces, settings, rng);
    }

    pixel_color / samples as f32
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f32| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}
