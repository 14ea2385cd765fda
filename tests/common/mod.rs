//! Recording test doubles for the scene's three backend seams.

use vignette::{
    Mat4, MeshProvider, Shape, ShaderInterface, TextureHandle, TextureImage, TextureUnits, Vec2,
    Vec3, Vec4,
};

/// One captured uniform write.
#[derive(Clone, Debug, PartialEq)]
pub enum UniformWrite {
    Bool(String, bool),
    Int(String, i32),
    Float(String, f32),
    Vec2(String, Vec2),
    Vec3(String, Vec3),
    Vec4(String, Vec4),
    Mat4(String, Mat4),
    Sampler(String, u32),
}

impl UniformWrite {
    pub fn name(&self) -> &str {
        match self {
            UniformWrite::Bool(name, _)
            | UniformWrite::Int(name, _)
            | UniformWrite::Float(name, _)
            | UniformWrite::Vec2(name, _)
            | UniformWrite::Vec3(name, _)
            | UniformWrite::Vec4(name, _)
            | UniformWrite::Mat4(name, _)
            | UniformWrite::Sampler(name, _) => name,
        }
    }
}

/// Backend that records every call it receives and nothing else.
#[derive(Default)]
pub struct RecordingBackend {
    pub writes: Vec<UniformWrite>,
    pub loads: Vec<Shape>,
    pub draws: Vec<Shape>,
    pub created: Vec<String>,
    pub bound: Vec<(usize, TextureHandle)>,
    pub deleted: Vec<TextureHandle>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes_named<'a>(&'a self, name: &str) -> Vec<&'a UniformWrite> {
        self.writes.iter().filter(|w| w.name() == name).collect()
    }
}

impl ShaderInterface for RecordingBackend {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.writes.push(UniformWrite::Bool(name.to_string(), value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.writes.push(UniformWrite::Int(name.to_string(), value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.writes.push(UniformWrite::Float(name.to_string(), value));
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.writes.push(UniformWrite::Vec2(name.to_string(), value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.writes.push(UniformWrite::Vec3(name.to_string(), value));
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.writes.push(UniformWrite::Vec4(name.to_string(), value));
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.writes.push(UniformWrite::Mat4(name.to_string(), value));
    }

    fn set_sampler(&mut self, name: &str, unit: u32) {
        self.writes.push(UniformWrite::Sampler(name.to_string(), unit));
    }
}

impl MeshProvider for RecordingBackend {
    fn load(&mut self, shape: Shape) {
        self.loads.push(shape);
    }

    fn draw(&mut self, shape: Shape) {
        self.draws.push(shape);
    }
}

impl TextureUnits for RecordingBackend {
    fn create(&mut self, _image: &TextureImage, label: &str) -> TextureHandle {
        let handle = TextureHandle(self.created.len() as u32);
        self.created.push(label.to_string());
        handle
    }

    fn bind(&mut self, unit: usize, handle: TextureHandle) {
        self.bound.push((unit, handle));
    }

    fn delete(&mut self, handle: TextureHandle) {
        self.deleted.push(handle);
    }
}
