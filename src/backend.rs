//! Offscreen wgpu backend for the scene's three collaborator seams.
//!
//! [`WgpuBackend`] implements [`ShaderInterface`], [`MeshProvider`], and
//! [`TextureUnits`] over a single forward pipeline rendering into an
//! offscreen color target. Named uniform writes stage into a CPU-side
//! uniform block; every draw flushes the block, binds the texture
//! selected by the staged sampler unit, and submits one depth-tested pass
//! that loads the previous contents, so a frame is just a clear followed by
//! a sequence of draws.
//!
//! Texture uploads honor the registry's conventions: repeat addressing,
//! linear filtering, and a full mip chain (downsampled on the CPU before
//! upload, since wgpu has no mipmap generation of its own).

use crate::gpu::GpuContext;
use crate::light::LIGHT_SLOTS;
use crate::mesh::{MeshProvider, Shape};
use crate::shader::{ShaderInterface, uniform};
use crate::shapes::Vertex3d;
use crate::texture::{MAX_TEXTURE_UNITS, TextureHandle, TextureImage, TextureUnits};
use bytemuck::Zeroable;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::collections::HashMap;
use wgpu::util::DeviceExt;

/// One light block as the shader sees it.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuLight {
    position: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
    /// x = focal strength, y = specular intensity.
    params: [f32; 4],
}

/// The full uniform block, mirrored field for field in `scene.wgsl`.
///
/// Everything is vec4/mat4 sized so the std140-style uniform layout matches
/// the Rust layout exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    object_color: [f32; 4],
    uv_scale: [f32; 4],
    view_position: [f32; 4],
    /// Ambient color, strength in w.
    material_ambient: [f32; 4],
    material_diffuse: [f32; 4],
    /// Specular color, shininess in w.
    material_specular: [f32; 4],
    /// x = use texture, y = use lighting, z = sampler unit.
    flags: [u32; 4],
    lights: [GpuLight; LIGHT_SLOTS],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            view: identity,
            projection: identity,
            model: identity,
            normal_matrix: identity,
            object_color: [1.0, 1.0, 1.0, 1.0],
            uv_scale: [1.0, 1.0, 0.0, 0.0],
            view_position: [0.0, 0.0, 0.0, 1.0],
            // Neutral material so lit draws without an explicit material
            // still shade sensibly.
            material_ambient: [1.0, 1.0, 1.0, 0.25],
            material_diffuse: [1.0, 1.0, 1.0, 0.0],
            material_specular: [0.5, 0.5, 0.5, 32.0],
            flags: [0; 4],
            lights: [GpuLight::zeroed(); LIGHT_SLOTS],
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct GpuTexture {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

/// Offscreen renderer backing the scene.
///
/// Created over a headless [`GpuContext`] with a fixed target size; the
/// rendered frame comes back out through [`read_pixels`](Self::read_pixels).
pub struct WgpuBackend {
    gpu: GpuContext,
    width: u32,
    height: u32,
    color_texture: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    default_texture: GpuTexture,
    uniforms: SceneUniforms,
    meshes: HashMap<Shape, GpuMesh>,
    textures: Vec<Option<GpuTexture>>,
    units: [Option<TextureHandle>; MAX_TEXTURE_UNITS],
}

impl WgpuBackend {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
    const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(gpu: GpuContext, width: u32, height: u32) -> Self {
        let device = &gpu.device;

        let color_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Color Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let color_view = color_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Depth Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex3d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: Self::FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Self::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let default_texture = Self::upload_rgba(
            &gpu,
            &[255, 255, 255, 255],
            1,
            1,
            1,
            "Default White Texture",
        );

        Self {
            gpu,
            width,
            height,
            color_texture,
            color_view,
            depth_view,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            default_texture,
            uniforms: SceneUniforms::default(),
            meshes: HashMap::new(),
            textures: Vec::new(),
            units: [None; MAX_TEXTURE_UNITS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Clears the color and depth targets; call once per frame before the
    /// scene's draws.
    pub fn begin_frame(&mut self, clear: Vec4) {
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Clear Encoder"),
            });
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: clear.w as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Copies the color target back to the CPU.
    pub fn read_pixels(&self) -> image::RgbaImage {
        let unpadded = self.width * 4;
        let padded = unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
            * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

        let buffer = self.gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: (padded * self.height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.color_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        self.gpu.queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.gpu
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .expect("device poll failed");
        rx.recv()
            .expect("map_async callback dropped")
            .expect("framebuffer mapping failed");

        let data = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((unpadded * self.height) as usize);
        for row in data.chunks(padded as usize) {
            pixels.extend_from_slice(&row[..unpadded as usize]);
        }
        drop(data);
        buffer.unmap();

        image::RgbaImage::from_raw(self.width, self.height, pixels)
            .expect("pixel buffer matches target dimensions")
    }

    fn upload_rgba(
        gpu: &GpuContext,
        rgba: &[u8],
        width: u32,
        height: u32,
        mip_count: u32,
        label: &str,
    ) -> GpuTexture {
        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: mip_count,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            rgba,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        GpuTexture { view, sampler }
    }

    /// Base level plus CPU-downsampled mips, concatenated for upload.
    fn build_mip_chain(image: &TextureImage) -> (u32, Vec<u8>) {
        let base = image::RgbaImage::from_raw(
            image.width,
            image.height,
            image.rgba_pixels().into_owned(),
        )
        .expect("pixel buffer matches image dimensions");

        let mip_count = image.width.max(image.height).max(1).ilog2() + 1;
        let mut data = Vec::new();
        data.extend_from_slice(base.as_raw());
        for level in 1..mip_count {
            let w = (image.width >> level).max(1);
            let h = (image.height >> level).max(1);
            let mip = image::imageops::resize(&base, w, h, image::imageops::FilterType::Triangle);
            data.extend_from_slice(mip.as_raw());
        }
        (mip_count, data)
    }

    /// The texture the staged sampler unit currently resolves to.
    fn bound_texture(&self) -> &GpuTexture {
        if self.uniforms.flags[0] == 0 {
            return &self.default_texture;
        }
        let unit = self.uniforms.flags[2] as usize;
        self.units
            .get(unit)
            .copied()
            .flatten()
            .and_then(|handle| self.textures.get(handle.0 as usize))
            .and_then(|t| t.as_ref())
            .unwrap_or(&self.default_texture)
    }
}

/// Splits `lightSources[i].field` into its slot and field name.
fn parse_light_uniform(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix("lightSources[")?;
    let (index, field) = rest.split_once("].")?;
    let slot = index.parse::<usize>().ok()?;
    (slot < LIGHT_SLOTS).then_some((slot, field))
}

impl ShaderInterface for WgpuBackend {
    fn set_bool(&mut self, name: &str, value: bool) {
        match name {
            uniform::USE_TEXTURE => self.uniforms.flags[0] = value as u32,
            uniform::USE_LIGHTING => self.uniforms.flags[1] = value as u32,
            _ => log::debug!("ignoring unknown bool uniform '{name}'"),
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        match name {
            uniform::USE_TEXTURE => self.uniforms.flags[0] = (value != 0) as u32,
            uniform::USE_LIGHTING => self.uniforms.flags[1] = (value != 0) as u32,
            _ => log::debug!("ignoring unknown int uniform '{name}'"),
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        if let Some((slot, field)) = parse_light_uniform(name) {
            match field {
                "focalStrength" => self.uniforms.lights[slot].params[0] = value,
                "specularIntensity" => self.uniforms.lights[slot].params[1] = value,
                _ => log::debug!("ignoring unknown light field '{name}'"),
            }
            return;
        }
        match name {
            uniform::MATERIAL_AMBIENT_STRENGTH => self.uniforms.material_ambient[3] = value,
            uniform::MATERIAL_SHININESS => self.uniforms.material_specular[3] = value,
            _ => log::debug!("ignoring unknown float uniform '{name}'"),
        }
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        match name {
            uniform::UV_SCALE => {
                self.uniforms.uv_scale[0] = value.x;
                self.uniforms.uv_scale[1] = value.y;
            }
            _ => log::debug!("ignoring unknown vec2 uniform '{name}'"),
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        if let Some((slot, field)) = parse_light_uniform(name) {
            let light = &mut self.uniforms.lights[slot];
            match field {
                "position" => light.position = [value.x, value.y, value.z, 1.0],
                "ambientColor" => light.ambient = [value.x, value.y, value.z, 0.0],
                "diffuseColor" => light.diffuse = [value.x, value.y, value.z, 0.0],
                "specularColor" => light.specular = [value.x, value.y, value.z, 0.0],
                _ => log::debug!("ignoring unknown light field '{name}'"),
            }
            return;
        }
        match name {
            uniform::MATERIAL_AMBIENT_COLOR => {
                self.uniforms.material_ambient[..3].copy_from_slice(&value.to_array());
            }
            uniform::MATERIAL_DIFFUSE_COLOR => {
                self.uniforms.material_diffuse[..3].copy_from_slice(&value.to_array());
            }
            uniform::MATERIAL_SPECULAR_COLOR => {
                self.uniforms.material_specular[..3].copy_from_slice(&value.to_array());
            }
            uniform::VIEW_POSITION => {
                self.uniforms.view_position = [value.x, value.y, value.z, 1.0];
            }
            _ => log::debug!("ignoring unknown vec3 uniform '{name}'"),
        }
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        match name {
            uniform::OBJECT_COLOR => self.uniforms.object_color = value.to_array(),
            _ => log::debug!("ignoring unknown vec4 uniform '{name}'"),
        }
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        match name {
            uniform::MODEL => {
                self.uniforms.model = value.to_cols_array_2d();
                // Normals need the inverse transpose once scaling is
                // non-uniform.
                self.uniforms.normal_matrix = value.inverse().transpose().to_cols_array_2d();
            }
            uniform::VIEW => self.uniforms.view = value.to_cols_array_2d(),
            uniform::PROJECTION => self.uniforms.projection = value.to_cols_array_2d(),
            _ => log::debug!("ignoring unknown mat4 uniform '{name}'"),
        }
    }

    fn set_sampler(&mut self, name: &str, unit: u32) {
        match name {
            uniform::OBJECT_TEXTURE => self.uniforms.flags[2] = unit,
            _ => log::debug!("ignoring unknown sampler uniform '{name}'"),
        }
    }
}

impl MeshProvider for WgpuBackend {
    fn load(&mut self, shape: Shape) {
        if self.meshes.contains_key(&shape) {
            return;
        }
        let (vertices, indices) = shape.geometry();
        let vertex_buffer =
            self.gpu
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Shape Vertex Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        let index_buffer =
            self.gpu
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Shape Index Buffer"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
        self.meshes.insert(
            shape,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: indices.len() as u32,
            },
        );
    }

    fn draw(&mut self, shape: Shape) {
        let Some(mesh) = self.meshes.get(&shape) else {
            log::warn!("draw issued for unloaded shape {}", shape.label());
            return;
        };

        self.gpu
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let texture = self.bound_texture();
        let texture_bind_group = self.gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Texture Bind Group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Draw Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_bind_group(1, &texture_bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
    }
}

impl TextureUnits for WgpuBackend {
    fn create(&mut self, image: &TextureImage, label: &str) -> TextureHandle {
        let (mip_count, data) = Self::build_mip_chain(image);
        let texture = Self::upload_rgba(
            &self.gpu,
            &data,
            image.width,
            image.height,
            mip_count,
            label,
        );
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(Some(texture));
        handle
    }

    fn bind(&mut self, unit: usize, handle: TextureHandle) {
        let Some(slot) = self.units.get_mut(unit) else {
            log::warn!("texture unit {unit} out of range");
            return;
        };
        *slot = Some(handle);
    }

    fn delete(&mut self, handle: TextureHandle) {
        if let Some(texture) = self.textures.get_mut(handle.0 as usize) {
            *texture = None;
        }
        for unit in self.units.iter_mut() {
            if *unit == Some(handle) {
                *unit = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_uniform_names_parse() {
        assert_eq!(
            parse_light_uniform("lightSources[0].position"),
            Some((0, "position"))
        );
        assert_eq!(
            parse_light_uniform("lightSources[3].specularIntensity"),
            Some((3, "specularIntensity"))
        );
        assert_eq!(parse_light_uniform("lightSources[4].position"), None);
        assert_eq!(parse_light_uniform("material.ambientColor"), None);
        assert_eq!(parse_light_uniform("lightSources[x].position"), None);
    }

    #[test]
    fn uniform_block_layout_matches_the_shader() {
        assert_eq!(std::mem::size_of::<GpuLight>(), 80);
        assert_eq!(
            std::mem::size_of::<SceneUniforms>(),
            4 * 64 + 7 * 16 + 4 * 80
        );
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    }
}
