//! Render settings shared between the host loop and the renderer.

use crate::Color;
use prism_math::Mat4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by [`RenderSettings::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Image resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    #[error("At least one sample per pixel is required")]
    ZeroSamples,
}

/// Everything the host may change between ticks.
///
/// Missing fields fall back to their defaults when deserializing, so a saved
/// settings file only needs to list what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Jittered camera rays per pixel per scanline pass
    pub samples: u32,
    /// Bounce budget; a path may scatter `max_bounces + 1` times
    pub max_bounces: i32,
    /// Frames to accumulate before updates stop
    pub max_frames: i32,
    /// Shade hits with their normal instead of scattering
    pub show_normals: bool,
    /// Accumulate across passes instead of overwriting
    pub smooth_update: bool,
    /// Pause rendering without discarding the image
    pub freeze: bool,
    /// World-to-view transform
    pub view: Mat4,
    /// Background color for rays heading straight down
    pub ground_color: Color,
    /// Background color for rays heading straight up
    pub sky_color: Color,
    /// Base seed for the per-pixel generators
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            samples: 1,
            max_bounces: 10,
            max_frames: 1024,
            show_normals: false,
            smooth_update: true,
            freeze: false,
            view: Mat4::IDENTITY,
            ground_color: Color::new(1.0, 1.0, 1.0),
            sky_color: Color::new(0.5, 0.7, 1.0),
            seed: 0,
        }
    }
}

impl RenderSettings {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_bounces: i32, max_frames: i32) -> Self {
        self.samples = samples;
        self.max_bounces = max_bounces;
        self.max_frames = max_frames;
        self
    }

    /// Set the world-to-view transform.
    pub fn with_view(mut self, view: Mat4) -> Self {
        self.view = view;
        self
    }

    /// Set the background gradient colors.
    pub fn with_colors(mut self, ground_color: Color, sky_color: Color) -> Self {
        self.ground_color = ground_color;
        self.sky_color = sky_color;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Check the settings a render cannot proceed without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        Ok(())
    }
}
