//! Random sampling helpers.
//!
//! Nothing here owns a generator. Callers pass `&mut dyn RngCore` down the
//! call chain, and the scheduler hands every pixel its own deterministically
//! seeded [`SmallRng`] so that parallel scanlines stay reproducible.

use prism_math::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Components below this magnitude count as zero for scatter directions.
pub const NEAR_ZERO: f32 = 1e-3;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform point inside the unit ball, by rejection sampling the
/// enclosing cube.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform point inside the unit ball, flipped into the hemisphere around
/// `normal`.
pub fn random_in_hemisphere(rng: &mut dyn RngCore, normal: Vec3) -> Vec3 {
    let p = random_in_unit_sphere(rng);
    if p.dot(normal) > 0.0 {
        p
    } else {
        -p
    }
}

/// True if every component of `v` is below [`NEAR_ZERO`].
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO && v.y.abs() < NEAR_ZERO && v.z.abs() < NEAR_ZERO
}

/// Generator for one pixel of one scanline pass.
///
/// The same `(seed, frame, y, x)` always yields the same stream, whichever
/// worker thread renders the pixel.
pub fn pixel_rng(seed: u64, frame: i32, y: u32, x: u32) -> SmallRng {
    const MIX: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut key = seed;
    for part in [frame as u32 as u64, y as u64, x as u64] {
        key = (key ^ part).wrapping_mul(MIX).rotate_left(29);
    }
    SmallRng::seed_from_u64(key)
}
