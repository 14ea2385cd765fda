//! Scene assembly: the desk vignette and the state it threads between draws.
//!
//! [`SceneManager`] owns the registries, the light rig, and the backend, and
//! issues the fixed sequence of draw calls that builds the scene: a desk,
//! a laptop, a mouse, a lamp, a stack of books, and a mug, all placed with
//! hardcoded transforms over the five primitive shapes.
//!
//! # Shading state
//!
//! Each drawable selects flat color, texture, or lit material by calling one
//! of the setters before its draw. The selection is sticky: a draw issued
//! with no preceding setter renders with whatever the previous drawable
//! selected. That carry-over is deliberate and is modeled as an explicit
//! [`RenderState`] value rather than left implicit in uniform storage, so it
//! can be inspected and tested.

use crate::light::{LIGHT_SLOTS, LightRig, PointLight};
use crate::material::{Material, MaterialRegistry};
use crate::mesh::{MeshProvider, Shape};
use crate::shader::{ShaderInterface, uniform};
use crate::texture::{TextureError, TextureRegistry, TextureUnits};
use crate::transform;
use glam::{Vec2, Vec3, Vec4};
use std::path::Path;

/// Image files the scene registers during preparation, `(path, tag)`.
///
/// Paths are relative to the working directory. A missing file is
/// recoverable: the scene logs it and renders that drawable untextured.
const SCENE_TEXTURES: [(&str, &str); 3] = [
    ("assets/wood.jpg", "desk"),
    ("assets/metal.jpg", "lamp"),
    ("assets/mouse.jpg", "mouse"),
];

/// The shading mode most recently selected for drawing.
#[derive(Clone, Debug, PartialEq)]
pub enum Shading {
    /// Untextured flat color, RGBA.
    Flat(Vec4),
    /// Sampling the texture registered under `tag`, bound at `slot`.
    Textured { tag: String, slot: u32 },
    /// Lit by the material registered under `tag`.
    Lit { tag: String },
}

/// Shader-visible state carried from one draw to the next.
///
/// Nothing resets between draws; `shading` stays in force until a setter
/// replaces it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    shading: Option<Shading>,
    uv_scale: Vec2,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            shading: None,
            uv_scale: Vec2::ONE,
        }
    }
}

impl RenderState {
    /// The mode the next draw will render with, `None` before any setter
    /// has run.
    pub fn shading(&self) -> Option<&Shading> {
        self.shading.as_ref()
    }

    /// The texture-coordinate multiplier in force.
    pub fn uv_scale(&self) -> Vec2 {
        self.uv_scale
    }
}

/// Owns the scene's resources and renders the desk vignette.
///
/// `B` is the graphics backend: a single value serving the shader-uniform,
/// mesh-provider, and texture-unit seams. [`prepare`](Self::prepare) must
/// run once before [`render`](Self::render).
pub struct SceneManager<B> {
    backend: B,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    lights: LightRig,
    state: RenderState,
}

impl<B> SceneManager<B>
where
    B: ShaderInterface + MeshProvider + TextureUnits,
{
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lights: desk_lights(),
            state: RenderState::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// The shading mode currently in force, i.e. what the next draw without
    /// a preceding setter would use.
    pub fn shading(&self) -> Option<&Shading> {
        self.state.shading()
    }

    /// The full carried-over render state.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Loads shapes, defines materials, configures lights, and registers and
    /// binds the scene textures. Run once before [`render`](Self::render).
    pub fn prepare(&mut self) {
        self.define_materials();
        self.lights.configure(&mut self.backend);

        // One resident copy per shape covers every instance drawn later.
        for shape in Shape::ALL {
            self.backend.load(shape);
        }

        for (path, tag) in SCENE_TEXTURES {
            if let Err(err) = self.register_texture(path, tag) {
                log::warn!("texture '{tag}' unavailable ({err}); drawing without it");
            }
        }
        self.bind_textures();
    }

    /// Decodes and registers a texture under `tag`.
    pub fn register_texture(
        &mut self,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<(), TextureError> {
        self.textures.register(&mut self.backend, path, tag)
    }

    /// Binds all registered textures to their units, in registration order.
    pub fn bind_textures(&mut self) {
        self.textures.bind_all(&mut self.backend);
    }

    /// Frees every registered texture. The scene can be re-prepared
    /// afterwards.
    pub fn release_textures(&mut self) {
        self.textures.release_all(&mut self.backend);
    }

    /// Computes and uploads the model matrix for the next draw.
    pub fn apply_transform(&mut self, scale: Vec3, rotation_deg: Vec3, position: Vec3) {
        transform::apply(&mut self.backend, scale, rotation_deg, position);
    }

    /// Selects untextured flat-color shading for subsequent draws.
    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        let color = Vec4::new(r, g, b, a);
        self.backend.set_bool(uniform::USE_TEXTURE, false);
        self.backend.set_vec4(uniform::OBJECT_COLOR, color);
        self.state.shading = Some(Shading::Flat(color));
    }

    /// Selects the texture registered under `tag` for subsequent draws.
    ///
    /// An unknown tag logs a warning and leaves the current shading in
    /// force; it never binds a bogus unit.
    pub fn set_texture(&mut self, tag: &str) {
        let Some(slot) = self.textures.slot(tag) else {
            log::warn!("no texture registered under '{tag}'");
            return;
        };
        let slot = slot as u32;
        self.backend.set_bool(uniform::USE_TEXTURE, true);
        self.backend.set_sampler(uniform::OBJECT_TEXTURE, slot);
        self.state.shading = Some(Shading::Textured {
            tag: tag.to_string(),
            slot,
        });
    }

    /// Selects the material registered under `tag` for subsequent draws.
    ///
    /// An unknown tag logs a warning and leaves the current shading in
    /// force.
    pub fn set_material(&mut self, tag: &str) {
        let Some(material) = self.materials.find(tag).copied() else {
            log::warn!("no material defined under '{tag}'");
            return;
        };
        self.backend
            .set_vec3(uniform::MATERIAL_AMBIENT_COLOR, material.ambient_color);
        self.backend
            .set_float(uniform::MATERIAL_AMBIENT_STRENGTH, material.ambient_strength);
        self.backend
            .set_vec3(uniform::MATERIAL_DIFFUSE_COLOR, material.diffuse_color);
        self.backend
            .set_vec3(uniform::MATERIAL_SPECULAR_COLOR, material.specular_color);
        self.backend
            .set_float(uniform::MATERIAL_SHININESS, material.shininess);
        self.state.shading = Some(Shading::Lit {
            tag: tag.to_string(),
        });
    }

    /// Scales the texture coordinates for subsequent textured draws.
    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        let scale = Vec2::new(u, v);
        self.backend.set_vec2(uniform::UV_SCALE, scale);
        self.state.uv_scale = scale;
    }

    /// Draws one instance of `shape` under the current shading state.
    ///
    /// Loads the shape first in case it is not yet resident; the provider
    /// treats repeat loads as no-ops.
    pub fn draw(&mut self, shape: Shape) {
        self.backend.load(shape);
        self.backend.draw(shape);
    }

    /// Renders every drawable in the scene's fixed authoring order.
    pub fn render(&mut self) {
        self.draw_desk();
        self.draw_laptop();
        self.draw_mouse();
        self.draw_lamp();
        self.draw_books();
        self.draw_mug();
    }

    fn define_materials(&mut self) {
        let lamp_shade = Material {
            ambient_color: Vec3::new(0.6, 0.6, 0.4),
            ambient_strength: 0.4,
            diffuse_color: Vec3::new(0.9, 0.9, 0.7),
            specular_color: Vec3::new(1.0, 1.0, 0.9),
            shininess: 40.0,
        };
        if let Err(err) = self.materials.define("lampShade", lamp_shade) {
            log::warn!("{err}");
        }
    }

    fn draw_desk(&mut self) {
        // Wooden desktop the rest of the scene sits on.
        self.apply_transform(Vec3::new(16.0, 5.0, 7.0), Vec3::ZERO, Vec3::ZERO);
        self.set_color(1.0, 1.0, 1.0, 1.0);
        self.set_texture("desk");
        self.draw(Shape::Plane);
    }

    fn draw_laptop(&mut self) {
        // Base
        self.apply_transform(
            Vec3::new(9.0, 0.4, 6.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.2, 0.0),
        );
        self.set_color(0.2, 0.3, 0.2, 1.0);
        self.draw(Shape::Box);

        // Screen frame, tilted back
        self.apply_transform(
            Vec3::new(9.0, 6.0, 0.2),
            Vec3::new(-15.0, 0.0, 0.0),
            Vec3::new(0.0, 3.2, -2.6),
        );
        self.set_color(0.0, 0.0, 0.0, 1.0);
        self.draw(Shape::Box);

        // Display panel just in front of the frame
        self.apply_transform(
            Vec3::new(8.4, 5.4, 0.1),
            Vec3::new(-15.0, 0.0, 0.0),
            Vec3::new(0.0, 3.2, -2.64),
        );
        self.set_color(0.1, 0.3, 0.8, 1.0);
        self.draw(Shape::Box);

        // Touchpad
        self.apply_transform(
            Vec3::new(1.6, 0.1, 1.2),
            Vec3::ZERO,
            Vec3::new(0.0, 0.44, 1.6),
        );
        self.set_color(0.3, 0.3, 0.3, 1.0);
        self.draw(Shape::Box);

        // Keyboard
        self.apply_transform(
            Vec3::new(7.0, 0.1, 2.4),
            Vec3::ZERO,
            Vec3::new(0.0, 0.44, -1.0),
        );
        self.set_color(0.1, 0.1, 0.1, 1.0);
        self.draw(Shape::Box);
    }

    fn draw_mouse(&mut self) {
        self.apply_transform(
            Vec3::new(1.2, 0.6, 2.0),
            Vec3::ZERO,
            Vec3::new(7.0, 0.35, 2.0),
        );
        self.set_texture("mouse");
        self.draw(Shape::Sphere);
    }

    fn draw_lamp(&mut self) {
        // Base disc
        self.apply_transform(
            Vec3::new(2.0, 0.2, 2.0),
            Vec3::ZERO,
            Vec3::new(-12.0, 0.1, 0.0),
        );
        self.set_color(0.25, 0.25, 0.25, 1.0);
        self.draw(Shape::Cylinder);

        // Stand; the metal texture wins over the fallback color when it
        // registered successfully.
        self.apply_transform(
            Vec3::new(0.25, 6.0, 0.25),
            Vec3::ZERO,
            Vec3::new(-12.0, 0.7, 0.0),
        );
        self.set_color(0.3, 0.3, 0.3, 1.0);
        self.set_texture("lamp");
        self.draw(Shape::Cylinder);

        // Shade, tipped toward the desk, lit by its material.
        self.apply_transform(
            Vec3::new(2.0, 1.5, 3.0),
            Vec3::new(10.0, 0.0, 125.0),
            Vec3::new(-12.0, 7.9, 0.0),
        );
        self.set_color(0.85, 0.85, 0.7, 1.0);
        self.set_material("lampShade");
        self.draw(Shape::Cone);
    }

    fn draw_books(&mut self) {
        // Bottom book, nudged a few degrees off square
        self.apply_transform(
            Vec3::new(3.5, 0.6, 2.5),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(8.0, 0.3, -3.2),
        );
        self.set_color(0.0, 0.5, 0.0, 1.0);
        self.draw(Shape::Box);

        // Top book, countered the other way
        self.apply_transform(
            Vec3::new(3.5, 0.6, 2.5),
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::new(8.0, 0.9, -3.2),
        );
        self.set_color(0.1, 0.1, 0.6, 1.0);
        self.draw(Shape::Box);
    }

    fn draw_mug(&mut self) {
        // Body
        self.apply_transform(
            Vec3::new(0.8, 1.2, 0.8),
            Vec3::ZERO,
            Vec3::new(-7.5, 0.6, 2.5),
        );
        self.set_color(1.0, 1.0, 1.0, 1.0);
        self.draw(Shape::Cylinder);

        // Coffee surface capping the rim
        self.apply_transform(
            Vec3::new(0.78, 0.05, 0.78),
            Vec3::ZERO,
            Vec3::new(-7.5, 1.2, 2.5),
        );
        self.set_color(0.2, 0.2, 0.2, 1.0);
        self.draw(Shape::Cylinder);
    }
}

/// The vignette's light rig: a dim warm key light overhead, a cooler blue
/// fill, and two parked slots.
fn desk_lights() -> LightRig {
    let mut slots = [PointLight::unlit(Vec3::new(0.0, 7.0, -7.0)); LIGHT_SLOTS];
    slots[0] = PointLight {
        position: Vec3::new(0.0, 10.0, -10.0),
        ambient: Vec3::new(-1.05, -1.05, -1.02),
        diffuse: Vec3::new(0.25, 0.25, 0.12),
        specular: Vec3::new(0.9, 0.9, 0.8),
        focal_strength: 25.0,
        specular_intensity: 3.0,
    };
    slots[1] = PointLight {
        position: Vec3::new(0.0, 5.0, -10.0),
        ambient: Vec3::new(0.02, 0.02, 0.08),
        diffuse: Vec3::new(0.2, 0.2, 0.9),
        specular: Vec3::new(0.6, 0.6, 1.0),
        focal_strength: 15.0,
        specular_intensity: 2.5,
    };
    LightRig::new(slots)
}
