//! The fixed four-slot point-light rig.
//!
//! The shader evaluates a fixed-size array of four light blocks every
//! fragment, whether or not a slot is logically active. A [`LightRig`]
//! therefore always carries exactly [`LIGHT_SLOTS`] entries and writes all
//! of them on [`configure`](LightRig::configure); inactive slots are
//! explicit all-zero blocks, never omissions. Skipping a slot would leave
//! stale values contributing to every draw.

use crate::shader::{ShaderInterface, uniform};
use glam::Vec3;

/// Number of light blocks the shader consumes. Always written in full.
pub const LIGHT_SLOTS: usize = 4;

/// One point-light parameter block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Distance falloff term; zero removes the slot's contribution.
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl PointLight {
    /// A slot that contributes nothing: parked at `position` with every
    /// color and scalar zeroed.
    pub fn unlit(position: Vec3) -> Self {
        Self {
            position,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            focal_strength: 0.0,
            specular_intensity: 0.0,
        }
    }

    /// True when every color and scalar is zero.
    pub fn is_unlit(&self) -> bool {
        self.ambient == Vec3::ZERO
            && self.diffuse == Vec3::ZERO
            && self.specular == Vec3::ZERO
            && self.focal_strength == 0.0
            && self.specular_intensity == 0.0
    }
}

/// The uniform name of one field of one light slot, e.g.
/// `lightSources[2].diffuseColor`.
pub fn light_uniform(slot: usize, field: &str) -> String {
    format!("lightSources[{slot}].{field}")
}

/// Exactly four light slots, written as a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRig {
    pub slots: [PointLight; LIGHT_SLOTS],
}

impl LightRig {
    pub fn new(slots: [PointLight; LIGHT_SLOTS]) -> Self {
        Self { slots }
    }

    /// Writes all four slots to the shader and enables lighting.
    ///
    /// Safe to call repeatedly; each call writes the same complete set of
    /// uniforms. Intended to run once during scene preparation.
    pub fn configure(&self, shader: &mut impl ShaderInterface) {
        for (slot, light) in self.slots.iter().enumerate() {
            shader.set_vec3(&light_uniform(slot, "position"), light.position);
            shader.set_vec3(&light_uniform(slot, "ambientColor"), light.ambient);
            shader.set_vec3(&light_uniform(slot, "diffuseColor"), light.diffuse);
            shader.set_vec3(&light_uniform(slot, "specularColor"), light.specular);
            shader.set_float(&light_uniform(slot, "focalStrength"), light.focal_strength);
            shader.set_float(
                &light_uniform(slot, "specularIntensity"),
                light.specular_intensity,
            );
        }
        shader.set_bool(uniform::USE_LIGHTING, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlit_zeroes_everything_but_position() {
        let light = PointLight::unlit(Vec3::new(0.0, 7.0, -7.0));
        assert!(light.is_unlit());
        assert_eq!(light.position, Vec3::new(0.0, 7.0, -7.0));
    }

    #[test]
    fn light_uniform_names_index_the_slot() {
        assert_eq!(light_uniform(0, "position"), "lightSources[0].position");
        assert_eq!(light_uniform(3, "focalStrength"), "lightSources[3].focalStrength");
    }
}
