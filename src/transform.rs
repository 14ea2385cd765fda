//! Per-draw model matrix composition.
//!
//! The composition order is fixed: translation, then the three axis
//! rotations X, Y, Z, then scale. In matrix form
//! `Translation * RotX * RotY * RotZ * Scale`, so geometry is scaled first
//! and translated last. Rotations are given in degrees, counter-clockwise
//! around each axis in glam's right-handed convention.

use crate::shader::{ShaderInterface, uniform};
use glam::{Mat4, Vec3};

/// Composes the model matrix for one drawable.
pub fn model_matrix(scale: Vec3, rotation_deg: Vec3, position: Vec3) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_x(rotation_deg.x.to_radians())
        * Mat4::from_rotation_y(rotation_deg.y.to_radians())
        * Mat4::from_rotation_z(rotation_deg.z.to_radians())
        * Mat4::from_scale(scale)
}

/// Computes the model matrix and uploads it for the next draw call.
///
/// The transform is not retained anywhere; callers re-apply before every
/// draw.
pub fn apply(
    shader: &mut impl ShaderInterface,
    scale: Vec3,
    rotation_deg: Vec3,
    position: Vec3,
) {
    shader.set_mat4(uniform::MODEL, model_matrix(scale, rotation_deg, position));
}
