//! Renders the desk vignette offscreen and saves it as `desk.png`.
//!
//! The scene looks for its textures under `assets/`; this demo synthesizes
//! simple noise-based wood, metal, and plastic images there first so it
//! works from a fresh checkout.

use std::path::Path;
use vignette::{GpuContext, Mat4, SceneManager, ShaderInterface, Vec3, Vec4, WgpuBackend, uniform};

fn main() {
    env_logger::init();

    synthesize_assets(Path::new("assets"));

    let gpu = GpuContext::new();
    let backend = WgpuBackend::new(gpu, 1280, 720);
    let mut scene = SceneManager::new(backend);

    // Camera setup the windowing harness would normally own.
    let eye = Vec3::new(0.0, 9.0, 16.0);
    let center = Vec3::new(0.0, 2.5, 0.0);
    let aspect = scene.backend().aspect();
    let backend = scene.backend_mut();
    backend.set_mat4(uniform::VIEW, Mat4::look_at_rh(eye, center, Vec3::Y));
    backend.set_mat4(
        uniform::PROJECTION,
        Mat4::perspective_rh(45f32.to_radians(), aspect, 0.1, 100.0),
    );
    backend.set_vec3(uniform::VIEW_POSITION, eye);
    backend.begin_frame(Vec4::new(0.05, 0.05, 0.08, 1.0));

    scene.prepare();
    scene.render();

    let frame = scene.backend().read_pixels();
    match frame.save("desk.png") {
        Ok(()) => log::info!("wrote desk.png"),
        Err(err) => log::error!("could not write desk.png: {err}"),
    }
}

/// Writes the three scene textures if they are not already present.
fn synthesize_assets(dir: &Path) {
    if let Err(err) = std::fs::create_dir_all(dir) {
        log::warn!("could not create {}: {err}", dir.display());
        return;
    }

    let textures: [(&str, fn(u32, u32, u32) -> [u8; 3]); 3] = [
        ("wood.jpg", wood_pixel),
        ("metal.jpg", metal_pixel),
        ("mouse.jpg", plastic_pixel),
    ];

    for (name, pixel) in textures {
        let path = dir.join(name);
        if path.exists() {
            continue;
        }
        let size = 256;
        let img = image::RgbImage::from_fn(size, size, |x, y| image::Rgb(pixel(x, y, size)));
        if let Err(err) = img.save(&path) {
            log::warn!("could not write {}: {err}", path.display());
        }
    }
}

/// Cheap integer noise for the synthetic textures.
fn hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_add(x.wrapping_mul(374761393));
    h = h.wrapping_add(y.wrapping_mul(668265263));
    h ^= h >> 13;
    h = h.wrapping_mul(1274126177);
    h ^= h >> 16;
    h
}

fn wood_pixel(x: u32, y: u32, _size: u32) -> [u8; 3] {
    // Long grain streaks along x with per-pixel flecks.
    let streak = (hash(0, y / 3, 7) % 24) as i32 - 12;
    let fleck = (hash(x, y, 91) % 10) as i32 - 5;
    let base = [133i32, 94, 52];
    [
        (base[0] + streak + fleck).clamp(0, 255) as u8,
        (base[1] + streak + fleck).clamp(0, 255) as u8,
        (base[2] + streak / 2 + fleck).clamp(0, 255) as u8,
    ]
}

fn metal_pixel(x: u32, y: u32, _size: u32) -> [u8; 3] {
    let speckle = (hash(x, y, 23) % 30) as i32 - 15;
    let v = (135 + speckle).clamp(0, 255) as u8;
    [v, v, v]
}

fn plastic_pixel(x: u32, y: u32, _size: u32) -> [u8; 3] {
    let grain = (hash(x, y, 57) % 16) as i32 - 8;
    [
        (55 + grain).clamp(0, 255) as u8,
        (150 + grain).clamp(0, 255) as u8,
        (60 + grain).clamp(0, 255) as u8,
    ]
}
