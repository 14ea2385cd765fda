//! Headless GPU device management.
//!
//! The scene renders offscreen, so the context is just an adapter, a device,
//! and a queue; window surfaces and presentation belong to whatever harness
//! embeds the crate.

/// Core GPU context holding the wgpu device and queue.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Creates a headless GPU context on the first suitable adapter.
    ///
    /// # Panics
    ///
    /// Panics if no adapter is found or device creation fails.
    pub fn new() -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .expect("Failed to find a suitable GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Vignette Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))
        .expect("Failed to create device");

        Self { device, queue }
    }
}

impl Default for GpuContext {
    fn default() -> Self {
        Self::new()
    }
}
