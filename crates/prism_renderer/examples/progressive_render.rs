//! Headless progressive render of the demo scene.
//!
//! Drives a `RenderContext` the way an interactive host would: one scanline
//! per tick, a camera move halfway through followed by an accumulation
//! reset, and progress reporting through `log`.
//!
//! Run with `RUST_LOG=debug` to see per-frame progress.

use anyhow::Result;
use prism_core::Mesh;
use prism_math::Camera;
use prism_renderer::{
    AaBox, Color, Lambertian, Metallic, RenderContext, RenderSettings, Scene, SharedMaterial,
    Sphere, Transparent, Vec3,
};
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Prism progressive render demo");

    let start = Instant::now();
    let scene = build_scene()?;
    log::info!(
        "Scene built in {:?}: {} spheres, {} boxes, {} triangles",
        start.elapsed(),
        scene.sphere_count(),
        scene.box_count(),
        scene.triangle_count()
    );

    let mut camera = Camera::new(Vec3::new(0.0, 0.4, 3.0), Vec3::new(0.0, -0.2, 0.0));
    let settings = RenderSettings::default()
        .with_resolution(160, 120)
        .with_quality(2, 6, 16)
        .with_view(camera.view_matrix())
        .with_seed(2024);
    let mut ctx = RenderContext::new(settings)?;

    // First half of the frames from the initial viewpoint
    let start = Instant::now();
    let half = ctx.settings.max_frames / 2;
    while ctx.current_frame < half {
        ctx.update(&scene);
    }
    log::info!("{} frames in {:?}, mean {:.3}", half, start.elapsed(), mean_luminance(&ctx));

    // Host moved the camera: keep the image, blend into the new view
    camera.translate(Vec3::new(0.3, 0.0, 0.0));
    ctx.settings.view = camera.view_matrix();
    ctx.reset_accumulation();

    let start = Instant::now();
    while !ctx.is_converged() {
        ctx.update(&scene);
    }
    log::info!("Converged in {:?}, mean {:.3}", start.elapsed(), mean_luminance(&ctx));

    let rgba = ctx.image().to_rgba8();
    log::info!("Display buffer ready: {} bytes", rgba.len());

    Ok(())
}

/// Ground, three spheres, a handful of boxes and a chrome mesh inside a
/// glassy bounding box.
fn build_scene() -> Result<Scene> {
    let grass: SharedMaterial = Arc::new(Lambertian::new(Color::new(0.01, 154.0 / 255.0, 23.0 / 255.0)));
    let gold: SharedMaterial = Arc::new(Lambertian::new(Color::new(1.0, 215.0 / 255.0, 0.01)));
    let red: SharedMaterial = Arc::new(Lambertian::new(Color::new(1.0, 0.1, 0.1)));
    let ibm: SharedMaterial = Arc::new(Lambertian::new(Color::new(0.01, 98.0 / 255.0, 1.0)));
    let chrome: SharedMaterial = Arc::new(Metallic::new(Color::new(219.0 / 255.0, 226.0 / 255.0, 233.0 / 255.0)));
    let glass: SharedMaterial = Arc::new(Transparent::new(Color::new(0.8, 0.8, 1.0), 0.7)?);

    let mut scene = Scene::new(Sphere::new(Vec3::new(0.0, -1000.5, 0.0), 1000.0, grass)?);

    scene.add_sphere(Sphere::new(Vec3::new(0.0, -0.3, 1.0), 0.2, gold.clone())?);
    scene.add_sphere(Sphere::new(Vec3::new(1.5, -0.3, 0.0), 0.9, red.clone())?);
    scene.add_sphere(Sphere::new(Vec3::new(-1.3, -0.3, 0.0), 0.3, ibm.clone())?);

    scene.add_box(AaBox::new(Vec3::new(-0.5, -0.1, -1.0), Vec3::splat(0.1), chrome.clone())?);
    scene.add_box(AaBox::new(Vec3::new(-0.6, -0.5, 1.0), Vec3::splat(0.08), red)?);
    scene.add_box(AaBox::new(Vec3::new(0.9, -0.5, 1.0), Vec3::splat(0.05), ibm)?);
    scene.add_box(AaBox::new(Vec3::new(0.5, -0.5, -4.0), Vec3::splat(1.5), gold)?);

    // Stand-in for a loaded model
    scene.set_mesh(&octahedron(0.25)?, chrome, Vec3::new(-0.3, 0.15, -1.0));

    let bounds = scene.mesh_bounds();
    scene.add_box(AaBox::new(bounds.centroid(), bounds.half_extents(), glass)?);

    Ok(scene)
}

fn octahedron(radius: f32) -> Result<Mesh> {
    let positions = vec![
        Vec3::X * radius,
        Vec3::NEG_X * radius,
        Vec3::Y * radius,
        Vec3::NEG_Y * radius,
        Vec3::Z * radius,
        Vec3::NEG_Z * radius,
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 2, 4,  4, 2, 1,  1, 2, 5,  5, 2, 0,
        4, 3, 0,  1, 3, 4,  5, 3, 1,  0, 3, 5,
    ];

    Ok(Mesh::new(positions, indices)?)
}

fn mean_luminance(ctx: &RenderContext) -> f32 {
    let image = ctx.image();
    let mut sum = 0.0;
    for y in 0..image.height {
        for x in 0..image.width {
            sum += image.resolve(x, y).dot(Vec3::new(0.2126, 0.7152, 0.0722));
        }
    }
    sum / (image.width * image.height) as f32
}
