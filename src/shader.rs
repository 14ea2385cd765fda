//! The named-uniform seam between the scene and whatever runs its shader.
//!
//! The scene core never talks to a graphics API directly. Every value it
//! produces (model matrices, colors, light blocks, sampler selections) is
//! written through [`ShaderInterface`] as a named uniform, and each write is
//! immediate: there is no batching and no readback. Whatever backend sits on
//! the other side (the offscreen [`WgpuBackend`](crate::WgpuBackend), a test
//! recorder, a host application's own renderer) decides what those names mean.
//!
//! The names themselves are the wire contract and live in [`uniform`]. A
//! backend that does not recognize a name should ignore it rather than fail;
//! hosts are free to push additional uniforms (camera matrices, time) through
//! the same interface.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Uniform names shared between the scene core and its backends.
///
/// Light-slot fields are addressed as `lightSources[i].<field>`; see
/// [`light_uniform`](crate::light::light_uniform).
pub mod uniform {
    /// Model matrix for the next draw.
    pub const MODEL: &str = "model";
    /// Flat object color, RGBA.
    pub const OBJECT_COLOR: &str = "objectColor";
    /// Sampler selecting the texture unit for textured draws.
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    /// Whether the next draw samples a texture instead of `objectColor`.
    pub const USE_TEXTURE: &str = "bUseTexture";
    /// Whether lighting is evaluated at all.
    pub const USE_LIGHTING: &str = "bUseLighting";
    /// Texture coordinate multiplier.
    pub const UV_SCALE: &str = "UVscale";

    /// View matrix, supplied by the hosting camera harness.
    pub const VIEW: &str = "view";
    /// Projection matrix, supplied by the hosting camera harness.
    pub const PROJECTION: &str = "projection";
    /// World-space eye position, supplied by the hosting camera harness.
    pub const VIEW_POSITION: &str = "viewPosition";

    pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
    pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
    pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
    pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
    pub const MATERIAL_SHININESS: &str = "material.shininess";
}

/// Destination for named shader-uniform values.
///
/// Each call is an immediate write into the active program's state; values
/// persist until overwritten. Implementations must tolerate names they do
/// not know.
pub trait ShaderInterface {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_vec2(&mut self, name: &str, value: Vec2);
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_vec4(&mut self, name: &str, value: Vec4);
    fn set_mat4(&mut self, name: &str, value: Mat4);
    /// Selects the texture unit sampled by the named sampler uniform.
    fn set_sampler(&mut self, name: &str, unit: u32);
}
