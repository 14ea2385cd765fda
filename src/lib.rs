//! # Vignette
//!
//! Scene composition and offscreen rendering for a static 3D desk vignette:
//! a desk, a laptop, a mouse, a lamp, a stack of books, and a mug, assembled
//! from five procedural primitive shapes.
//!
//! The crate is split along three seams so the scene logic never touches a
//! graphics API directly:
//!
//! - [`ShaderInterface`] receives named uniform values (transforms, colors,
//!   light blocks, sampler selections)
//! - [`MeshProvider`] loads and draws the primitive shapes
//! - [`TextureUnits`] stores GPU textures addressed by fixed units
//!
//! [`WgpuBackend`] implements all three over an offscreen wgpu pipeline;
//! tests drive the same seams with recording fakes.
//!
//! ## Quick start
//!
//! ```no_run
//! use vignette::{GpuContext, SceneManager, Vec4, WgpuBackend};
//!
//! let backend = WgpuBackend::new(GpuContext::new(), 1280, 720);
//! let mut scene = SceneManager::new(backend);
//!
//! scene.backend_mut().begin_frame(Vec4::new(0.05, 0.05, 0.08, 1.0));
//! scene.prepare();
//! scene.render();
//!
//! let frame = scene.backend().read_pixels();
//! frame.save("desk.png").unwrap();
//! ```

mod backend;
mod gpu;
mod light;
mod material;
mod mesh;
mod scene;
mod shader;
mod shapes;
mod texture;
pub mod transform;

pub use backend::WgpuBackend;
pub use gpu::GpuContext;
pub use light::{LIGHT_SLOTS, LightRig, PointLight, light_uniform};
pub use material::{Material, MaterialError, MaterialRegistry};
pub use mesh::{MeshProvider, Shape};
pub use scene::{RenderState, SceneManager, Shading};
pub use shader::{ShaderInterface, uniform};
pub use shapes::Vertex3d;
pub use texture::{
    MAX_TEXTURE_UNITS, TextureEntry, TextureError, TextureHandle, TextureImage, TextureRegistry,
    TextureUnits,
};

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
