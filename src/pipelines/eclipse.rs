//! The eclipse body: an opaque sphere whose limb glows with the corona.

use cgmath::Matrix4;

use crate::{
    config::EclipseConfig,
    data_structures::sphere::{SphereGeometry, SphereMesh, SphereVertex},
    error::Result,
    pipelines::{
        ObjectUniform, Output, PerOutput,
        basic::{DepthMode, PipelineDesc, mk_render_pipeline, mk_scene_layout},
        shader,
    },
};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EclipseUniform {
    model: [[f32; 4]; 4],
    corona: [f32; 4],
    light_dir: [f32; 4],
}

impl EclipseUniform {
    pub fn new(model: Matrix4<f32>, config: &EclipseConfig) -> Self {
        let [r, g, b] = config.corona_color;
        let [x, y, z] = config.light_direction;
        Self {
            model: model.into(),
            corona: [r, g, b, config.corona_power],
            light_dir: [x, y, z, 0.0],
        }
    }
}

#[derive(Debug)]
pub struct Eclipse {
    mesh: SphereMesh,
    config: EclipseConfig,
    uniform: ObjectUniform<EclipseUniform>,
    pipelines: PerOutput<wgpu::RenderPipeline>,
}

impl Eclipse {
    pub const NAME: &'static str = "eclipse";

    pub async fn new(
        device: &wgpu::Device,
        geometry: &SphereGeometry,
        camera_layout: &wgpu::BindGroupLayout,
        object_layout: &wgpu::BindGroupLayout,
        formats: &PerOutput<wgpu::TextureFormat>,
        config: &EclipseConfig,
    ) -> Result<Self> {
        let (vs, fs) = shader::compile_program(
            device,
            Self::NAME,
            include_str!("shaders/eclipse_vertex.wgsl"),
            include_str!("shaders/eclipse_fragment.wgsl"),
        )
        .await?;
        let layout = mk_scene_layout(device, "Eclipse Pipeline Layout", camera_layout, object_layout, &[]);
        let desc = PipelineDesc {
            label: "Eclipse Pipeline",
            layout: &layout,
            blend: Some(wgpu::BlendState::REPLACE),
            depth: DepthMode::Opaque,
            cull_mode: Some(wgpu::Face::Back),
            vertex_layouts: &[SphereVertex::desc()],
        };
        let pipelines = shader::validated(device, desc.label, || {
            formats.map(|format| mk_render_pipeline(device, &desc, *format, &vs, &fs))
        })
        .await?;

        let uniform = ObjectUniform::new(
            device,
            object_layout,
            EclipseUniform::new(cgmath::SquareMatrix::identity(), config),
            "Eclipse",
        );
        Ok(Self {
            mesh: SphereMesh::new(device, geometry, "Eclipse"),
            config: *config,
            uniform,
            pipelines,
        })
    }

    pub fn update(&mut self, queue: &wgpu::Queue, model: Matrix4<f32>) {
        self.uniform
            .write(queue, EclipseUniform::new(model, &self.config));
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, output: Output) {
        render_pass.set_pipeline(self.pipelines.get(output));
        render_pass.set_bind_group(1, &self.uniform.bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}
