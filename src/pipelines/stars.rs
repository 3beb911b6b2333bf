//! Star billboards.

use cgmath::Matrix4;

use crate::{
    data_structures::starfield::{StarInstance, Starfield},
    error::Result,
    pipelines::{
        ObjectUniform, Output, PerOutput,
        basic::{DepthMode, PipelineDesc, mk_render_pipeline, mk_scene_layout},
        shader,
    },
};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarsUniform {
    model: [[f32; 4]; 4],
    size: [f32; 4],
}

impl StarsUniform {
    pub fn new(model: Matrix4<f32>, size: f32) -> Self {
        Self {
            model: model.into(),
            size: [size, 0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug)]
pub struct Stars {
    field: Starfield,
    size: f32,
    uniform: ObjectUniform<StarsUniform>,
    pipelines: PerOutput<wgpu::RenderPipeline>,
}

impl Stars {
    pub const NAME: &'static str = "stars";

    pub async fn new(
        device: &wgpu::Device,
        field: Starfield,
        size: f32,
        camera_layout: &wgpu::BindGroupLayout,
        object_layout: &wgpu::BindGroupLayout,
        sprite_layout: &wgpu::BindGroupLayout,
        formats: &PerOutput<wgpu::TextureFormat>,
    ) -> Result<Self> {
        let (vs, fs) = shader::compile_program(
            device,
            Self::NAME,
            include_str!("shaders/stars_vertex.wgsl"),
            include_str!("shaders/stars_fragment.wgsl"),
        )
        .await?;
        let layout = mk_scene_layout(
            device,
            "Stars Pipeline Layout",
            camera_layout,
            object_layout,
            &[sprite_layout],
        );
        let desc = PipelineDesc {
            label: "Stars Pipeline",
            layout: &layout,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth: DepthMode::ReadOnly,
            cull_mode: None,
            vertex_layouts: &[StarInstance::desc()],
        };
        let pipelines = shader::validated(device, desc.label, || {
            formats.map(|format| mk_render_pipeline(device, &desc, *format, &vs, &fs))
        })
        .await?;

        let uniform = ObjectUniform::new(
            device,
            object_layout,
            StarsUniform::new(cgmath::SquareMatrix::identity(), size),
            "Stars",
        );
        Ok(Self {
            field,
            size,
            uniform,
            pipelines,
        })
    }

    pub fn field(&self) -> &Starfield {
        &self.field
    }

    pub fn update(&mut self, queue: &wgpu::Queue, model: Matrix4<f32>) {
        self.uniform.write(queue, StarsUniform::new(model, self.size));
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, output: Output) {
        render_pass.set_pipeline(self.pipelines.get(output));
        render_pass.set_bind_group(1, &self.uniform.bind_group, &[]);
        self.field.draw(render_pass);
    }
}
