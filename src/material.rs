//! Named reflectance parameter sets for lit drawables.

use glam::Vec3;
use std::collections::HashMap;
use std::fmt;

/// Phong-style reflectance parameters. Immutable once defined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient_color: Vec3,
    pub ambient_strength: f32,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub shininess: f32,
}

/// Errors from material registration.
#[derive(Debug)]
pub enum MaterialError {
    /// A material with this tag is already defined.
    DuplicateTag(String),
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialError::DuplicateTag(tag) => {
                write!(f, "material tag '{}' already defined", tag)
            }
        }
    }
}

impl std::error::Error for MaterialError {}

/// Materials looked up by tag.
///
/// Tags are unique; looking up an unknown tag returns `None` rather than
/// any stand-in value.
#[derive(Default)]
pub struct MaterialRegistry {
    materials: HashMap<String, Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `material` under `tag`.
    pub fn define(&mut self, tag: &str, material: Material) -> Result<(), MaterialError> {
        if self.materials.contains_key(tag) {
            return Err(MaterialError::DuplicateTag(tag.to_string()));
        }
        self.materials.insert(tag.to_string(), material);
        Ok(())
    }

    /// The material defined under `tag`, if any.
    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.get(tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp_shade() -> Material {
        Material {
            ambient_color: Vec3::new(0.6, 0.6, 0.4),
            ambient_strength: 0.4,
            diffuse_color: Vec3::new(0.9, 0.9, 0.7),
            specular_color: Vec3::new(1.0, 1.0, 0.9),
            shininess: 40.0,
        }
    }

    #[test]
    fn define_then_find_round_trips_exact_values() {
        let mut registry = MaterialRegistry::new();
        registry.define("lampShade", lamp_shade()).unwrap();

        let found = registry.find("lampShade").expect("material should be found");
        assert_eq!(*found, lamp_shade());
    }

    #[test]
    fn missing_tag_returns_none() {
        let mut registry = MaterialRegistry::new();
        assert!(registry.find("lampShade").is_none(), "empty registry");

        registry.define("lampShade", lamp_shade()).unwrap();
        assert!(registry.find("deskWood").is_none(), "non-empty registry, no match");
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let mut registry = MaterialRegistry::new();
        registry.define("lampShade", lamp_shade()).unwrap();

        let result = registry.define("lampShade", lamp_shade());
        assert!(matches!(result, Err(MaterialError::DuplicateTag(_))));
        assert_eq!(registry.len(), 1);
    }
}
