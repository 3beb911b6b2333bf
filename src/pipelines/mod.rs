//! Render pipelines for the scene objects.
//!
//! Every scene pipeline shares the same bind group scheme: group 0 is the
//! camera, group 1 the object's own uniform (model transform plus material
//! parameters). The star pipeline adds its sprite in group 2.
//!
//! Each pipeline exists twice, once per [`Output`], because the base render
//! pass writes either an intermediate buffer or, when it is the terminal
//! pass, the surface itself.

pub mod atmosphere;
pub mod basic;
pub mod eclipse;
pub mod shader;
pub mod stars;

/// Where a pass writes its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    /// A ping-pong buffer read by the next pass.
    Intermediate,
    /// The display surface.
    Surface,
}

/// One value per [`Output`], usually a pipeline or a texture format.
#[derive(Clone, Debug)]
pub struct PerOutput<T> {
    pub intermediate: T,
    pub surface: T,
}

impl<T> PerOutput<T> {
    pub fn get(&self, output: Output) -> &T {
        match output {
            Output::Intermediate => &self.intermediate,
            Output::Surface => &self.surface,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerOutput<U> {
        PerOutput {
            intermediate: f(&self.intermediate),
            surface: f(&self.surface),
        }
    }
}

/// Layout of a per-object uniform buffer in group 1.
pub fn object_uniform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        label: Some("object_uniform_layout"),
    })
}

/// A uniform buffer plus its group 1 bind group, rewritten every frame.
#[derive(Debug)]
pub struct ObjectUniform<U: bytemuck::Pod> {
    pub uniform: U,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl<U: bytemuck::Pod> ObjectUniform<U> {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, uniform: U, name: &str) -> Self {
        use wgpu::util::DeviceExt;
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Uniform Buffer", name)),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("{} Bind Group", name)),
        });
        Self {
            uniform,
            buffer,
            bind_group,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue, uniform: U) {
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}
