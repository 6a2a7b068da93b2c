//! Progressive accumulation.
//!
//! One call to [`RenderContext::update`] renders a single scanline, so a host
//! loop can interleave rendering with input handling and display. Samples
//! accumulate across passes into an RGBA buffer whose alpha channel carries
//! the accumulated weight.

use crate::renderer::{color_to_rgba, render_pixel};
use crate::sampling::pixel_rng;
use crate::{Color, ConfigError, RenderSettings, Scene, ViewCamera};
use prism_math::Vec4;
use rayon::prelude::*;

/// Accumulation buffer, row-major with row `y = 0` at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer with every pixel zeroed.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    /// Get the raw accumulated value at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Mutable view of row `y`.
    pub fn row_mut(&mut self, y: u32) -> &mut [Vec4] {
        let start = self.index(0, y);
        &mut self.pixels[start..start + self.width as usize]
    }

    /// Average color at (x, y): the accumulated sum divided by its weight.
    pub fn resolve(&self, x: u32, y: u32) -> Color {
        let pixel = self.get(x, y);
        pixel.truncate() / pixel.w.max(1.0)
    }

    /// Gamma-corrected 8-bit RGBA, top row first, ready for display.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&color_to_rgba(self.resolve(x, y)));
            }
        }
        bytes
    }

    /// The raw float buffer, for uploading as an RGBA32F texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Zero every pixel.
    pub fn clear(&mut self) {
        self.pixels.fill(Vec4::ZERO);
    }

    /// Change dimensions, zeroing the contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Vec4::ZERO);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Settings plus progress counters plus the accumulation buffer.
///
/// The host owns the context, mutates `settings` between ticks, and calls
/// [`update`](Self::update) once per tick.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub settings: RenderSettings,
    /// Completed passes over the image. `-1` marks the blending transition
    /// after [`reset_accumulation`](Self::reset_accumulation).
    pub current_frame: i32,
    /// Scanlines rendered in the current pass
    pub current_line: u32,
    image: ImageBuffer,
}

impl RenderContext {
    pub fn new(settings: RenderSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        log::info!(
            "Render context: {}x{}, {} spp, {} bounces, {} frames",
            settings.width,
            settings.height,
            settings.samples,
            settings.max_bounces,
            settings.max_frames
        );

        Ok(Self {
            image: ImageBuffer::new(settings.width, settings.height),
            settings,
            current_frame: 0,
            current_line: 0,
        })
    }

    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// True once `max_frames` passes have been accumulated.
    pub fn is_converged(&self) -> bool {
        self.current_frame >= self.settings.max_frames
    }

    /// Render the next scanline and advance the progress counters.
    ///
    /// Does nothing while frozen or once converged.
    pub fn update(&mut self, scene: &Scene) {
        if self.settings.freeze || self.is_converged() {
            return;
        }
        if self.settings.width == 0 || self.settings.height == 0 {
            log::warn!(
                "Skipping update for empty resolution {}x{}",
                self.settings.width,
                self.settings.height
            );
            return;
        }

        let height = self.settings.height;
        self.render_scanline(scene, self.current_line % height);

        self.current_line += 1;
        if self.current_line >= height {
            self.current_frame += 1;
            self.current_line %= height;
            log::debug!("Frame {} complete", self.current_frame);
        }
    }

    /// Render row `y` and fold it into the accumulation buffer.
    ///
    /// Columns run in parallel; each pixel draws from its own generator
    /// seeded by `(seed, current_frame, y, x)`. The buffer is first brought
    /// to the configured resolution. Rows outside the image are ignored.
    pub fn render_scanline(&mut self, scene: &Scene, y: u32) {
        self.match_resolution();
        if y >= self.image.height {
            log::warn!("Scanline {} outside image of height {}", y, self.image.height);
            return;
        }

        let settings = &self.settings;
        let frame = self.current_frame;
        let camera = ViewCamera::new(settings);
        let blend_old = settings.smooth_update && frame <= 0;

        log::trace!("Scanline {} of frame {}", y, frame);

        self.image
            .row_mut(y)
            .par_iter_mut()
            .enumerate()
            .for_each(|(x, pixel)| {
                let x = x as u32;
                let mut rng = pixel_rng(settings.seed, frame, y, x);
                let color = render_pixel(&camera, scene, x, y, settings, &mut rng);

                if settings.smooth_update {
                    if blend_old {
                        let old = *pixel;
                        *pixel = (old / old.w.max(1.0)).clamp(Vec4::ZERO, Vec4::ONE);
                    }
                    *pixel += color.extend(1.0);
                } else {
                    *pixel = color.extend(1.0);
                }
            });
    }

    /// Reallocate the buffer if the configured resolution changed.
    fn match_resolution(&mut self) {
        let (width, height) = (self.settings.width, self.settings.height);
        if (self.image.width, self.image.height) != (width, height) {
            log::debug!(
                "Resizing image {}x{} -> {}x{}",
                self.image.width,
                self.image.height,
                width,
                height
            );
            self.image.resize(width, height);
        }
    }

    /// Clear the image and restart from the first scanline. Also unfreezes.
    pub fn reset(&mut self) {
        self.image.resize(self.settings.width, self.settings.height);
        self.current_frame = 0;
        self.current_line = 0;
        self.settings.freeze = false;

        log::info!("Render reset");
    }

    /// Start a new accumulation without clearing the image.
    ///
    /// Used when the camera or scene changed: the next pass blends the old
    /// image in rather than showing a black reset.
    pub fn reset_accumulation(&mut self) {
        self.current_frame = -1;

        log::info!("Accumulation reset at line {}", self.current_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::{SharedMaterial, Sphere, Vec3};
    use std::sync::Arc;

    fn ground_scene() -> Scene {
        let material: SharedMaterial = Arc::new(Lambertian::new(Color::new(0.2, 0.7, 0.2)));
        Scene::new(Sphere::new(Vec3::new(0.0, -1000.5, 0.0), 1000.0, material).unwrap())
    }

    fn small_context() -> RenderContext {
        let settings = RenderSettings::default().with_resolution(8, 4).with_quality(1, 2, 3);
        RenderContext::new(settings).unwrap()
    }

    #[test]
    fn test_image_buffer_layout() {
        let mut image = ImageBuffer::new(3, 2);
        image.row_mut(1)[2] = Vec4::new(2.0, 4.0, 6.0, 2.0);

        assert_eq!(image.pixels[5], Vec4::new(2.0, 4.0, 6.0, 2.0));
        assert_eq!(image.resolve(2, 1), Vec3::new(1.0, 2.0, 3.0));
        // Zero weight resolves to the raw sum
        assert_eq!(image.resolve(0, 0), Vec3::ZERO);
        assert_eq!(image.as_bytes().len(), 6 * 16);

        // Top row comes first in the display bytes
        let rgba = image.to_rgba8();
        assert_eq!(rgba.len(), 6 * 4);
        assert_eq!(&rgba[8..12], &[255, 255, 255, 255]);
        assert_eq!(&rgba[12..16], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = RenderSettings::default().with_resolution(0, 4);
        assert!(matches!(
            RenderContext::new(settings),
            Err(ConfigError::ZeroResolution { .. })
        ));
    }

    #[test]
    fn test_update_advances_lines_then_frames() {
        let scene = ground_scene();
        let mut ctx = small_context();

        for _ in 0..3 {
            ctx.update(&scene);
        }
        assert_eq!((ctx.current_frame, ctx.current_line), (0, 3));

        ctx.update(&scene);
        assert_eq!((ctx.current_frame, ctx.current_line), (1, 0));

        // Every pixel saw exactly one pass
        assert!(ctx.image().pixels.iter().all(|p| p.w == 1.0));
    }

    #[test]
    fn test_update_stops_at_max_frames() {
        let scene = ground_scene();
        let mut ctx = small_context();

        for _ in 0..3 * 4 {
            ctx.update(&scene);
        }
        assert!(ctx.is_converged());

        let before = ctx.image().clone();
        for _ in 0..10 {
            ctx.update(&scene);
        }
        assert_eq!(ctx.image(), &before);
        assert_eq!((ctx.current_frame, ctx.current_line), (3, 0));
    }

    #[test]
    fn test_freeze_is_noop() {
        let scene = ground_scene();
        let mut ctx = small_context();
        ctx.update(&scene);

        ctx.settings.freeze = true;
        let before = ctx.image().clone();
        ctx.update(&scene);

        assert_eq!(ctx.image(), &before);
        assert_eq!(ctx.current_line, 1);

        ctx.reset();
        assert!(!ctx.settings.freeze);
    }

    #[test]
    fn test_reset_accumulation_only_touches_frame() {
        let scene = ground_scene();
        let mut ctx = small_context();
        for _ in 0..6 {
            ctx.update(&scene);
        }
        let before = ctx.image().clone();

        ctx.reset_accumulation();
        assert_eq!(ctx.current_frame, -1);
        assert_eq!(ctx.current_line, 2);
        assert_eq!(ctx.image(), &before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let scene = ground_scene();
        let mut ctx = small_context();
        for _ in 0..5 {
            ctx.update(&scene);
        }

        ctx.reset();
        assert_eq!((ctx.current_frame, ctx.current_line), (0, 0));
        assert!(ctx.image().pixels.iter().all(|p| *p == Vec4::ZERO));
    }

    #[test]
    fn test_smooth_update_blends_old_image() {
        let scene = ground_scene();
        let mut ctx = small_context();
        ctx.image.pixels.fill(Vec4::new(6.0, 6.0, 6.0, 3.0));

        // Transition pass: old value rescaled to (1, 1, 1, 1) before adding
        ctx.reset_accumulation();
        ctx.render_scanline(&scene, 0);
        let blended = ctx.image().get(0, 0);
        assert_eq!(blended.w, 2.0);
        assert!(blended.x >= 1.0 && blended.x <= 2.0);

        // Regular pass just adds
        ctx.current_frame = 1;
        ctx.render_scanline(&scene, 0);
        assert_eq!(ctx.image().get(0, 0).w, 3.0);
    }

    #[test]
    fn test_overwrite_without_smooth_update() {
        let scene = ground_scene();
        let mut ctx = small_context();
        ctx.settings.smooth_update = false;
        ctx.image.pixels.fill(Vec4::new(9.0, 9.0, 9.0, 9.0));

        ctx.render_scanline(&scene, 1);
        for x in 0..8 {
            assert_eq!(ctx.image().get(x, 1).w, 1.0);
        }
        assert_eq!(ctx.image().get(0, 0), Vec4::new(9.0, 9.0, 9.0, 9.0));
    }

    #[test]
    fn test_resolution_change_reallocates() {
        let scene = ground_scene();
        let mut ctx = small_context();
        ctx.update(&scene);

        ctx.settings.width = 5;
        ctx.settings.height = 3;
        ctx.update(&scene);

        assert_eq!((ctx.image().width, ctx.image().height), (5, 3));
        assert_eq!(ctx.image().pixels.len(), 15);
    }

    #[test]
    fn test_scanline_outside_image_is_ignored() {
        let scene = ground_scene();
        let mut ctx = small_context();

        ctx.render_scanline(&scene, 4);
        ctx.render_scanline(&scene, 100);
        assert!(ctx.image().pixels.iter().all(|p| *p == Vec4::ZERO));
    }

    #[test]
    fn test_scanline_follows_resized_settings() {
        let scene = ground_scene();
        let mut ctx = small_context();

        // Host grows the image and renders a row the old buffer did not have
        ctx.settings.width = 10;
        ctx.settings.height = 6;
        ctx.render_scanline(&scene, 5);

        assert_eq!((ctx.image().width, ctx.image().height), (10, 6));
        for x in 0..10 {
            assert_eq!(ctx.image().get(x, 5).w, 1.0);
        }
    }

    #[test]
    fn test_scanline_is_deterministic() {
        let scene = ground_scene();
        let mut a = small_context();
        let mut b = small_context();

        for _ in 0..4 {
            a.update(&scene);
            b.update(&scene);
        }
        assert_eq!(a.image(), b.image());

        let mut c = RenderContext::new(a.settings.clone().with_seed(7)).unwrap();
        for _ in 0..4 {
            c.update(&scene);
        }
        assert_ne!(a.image(), c.image());
    }
}
