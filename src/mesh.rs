//! The shape vocabulary and the mesh-provider seam.
//!
//! The scene draws instances of five primitive shapes. A [`MeshProvider`]
//! owns the GPU-resident version of each shape's geometry: `load` makes a
//! shape resident (loading twice is harmless) and `draw` renders whatever
//! was most recently loaded for that shape under the uniform state currently
//! staged through [`ShaderInterface`](crate::ShaderInterface).

use crate::shapes::{self, Vertex3d};

/// Tessellation used for the curved built-in shapes.
const SPHERE_SEGMENTS: u32 = 32;
const SPHERE_RINGS: u32 = 16;
const ROUND_SEGMENTS: u32 = 32;

/// The primitive shapes the scene is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Plane,
    Box,
    Sphere,
    Cylinder,
    Cone,
}

impl Shape {
    /// Every shape, in a stable order.
    pub const ALL: [Shape; 5] = [
        Shape::Plane,
        Shape::Box,
        Shape::Sphere,
        Shape::Cylinder,
        Shape::Cone,
    ];

    /// Generates this shape's unit geometry at the built-in tessellation.
    pub fn geometry(self) -> (Vec<Vertex3d>, Vec<u32>) {
        match self {
            Shape::Plane => shapes::plane(),
            Shape::Box => shapes::cube(),
            Shape::Sphere => shapes::sphere(SPHERE_SEGMENTS, SPHERE_RINGS),
            Shape::Cylinder => shapes::cylinder(ROUND_SEGMENTS),
            Shape::Cone => shapes::cone(ROUND_SEGMENTS),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shape::Plane => "plane",
            Shape::Box => "box",
            Shape::Sphere => "sphere",
            Shape::Cylinder => "cylinder",
            Shape::Cone => "cone",
        }
    }
}

/// Provider of the primitive meshes the scene draws.
pub trait MeshProvider {
    /// Makes `shape` resident. Idempotent; repeat calls are no-ops.
    fn load(&mut self, shape: Shape);

    /// Draws the resident geometry for `shape` using the shader-uniform
    /// state in effect at the time of the call.
    fn draw(&mut self, shape: Shape);
}
