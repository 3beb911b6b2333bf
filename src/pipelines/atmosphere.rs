//! The atmosphere shell: a larger sphere drawn from the inside so only its
//! glowing rim shows around the eclipse body.

use cgmath::Matrix4;

use crate::{
    config::AtmosphereConfig,
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
pub struct AtmosphereUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl AtmosphereUniform {
    pub fn new(model: Matrix4<f32>, config: &AtmosphereConfig) -> Self {
        let [r, g, b] = config.color;
        Self {
            model: model.into(),
            color: [r, g, b, config.intensity],
        }
    }
}

/// Blending for the premultiplied glow: `src + dst * (1 - alpha)`, or
/// `src + dst` when `additive` is set. The source colour already carries its
/// alpha, so neither mode multiplies it in again.
pub fn blend_state(additive: bool) -> wgpu::BlendState {
    if additive {
        wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent::OVER,
        }
    } else {
        wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING
    }
}

#[derive(Debug)]
pub struct Atmosphere {
    mesh: SphereMesh,
    config: AtmosphereConfig,
    uniform: ObjectUniform<AtmosphereUniform>,
    pipelines: PerOutput<wgpu::RenderPipeline>,
}

impl Atmosphere {
    pub const NAME: &'static str = "atmosphere";

    pub async fn new(
        device: &wgpu::Device,
        geometry: &SphereGeometry,
        camera_layout: &wgpu::BindGroupLayout,
        object_layout: &wgpu::BindGroupLayout,
        formats: &PerOutput<wgpu::TextureFormat>,
        config: &AtmosphereConfig,
    ) -> Result<Self> {
        let (vs, fs) = shader::compile_program(
            device,
            Self::NAME,
            include_str!("shaders/atmosphere_vertex.wgsl"),
            include_str!("shaders/atmosphere_fragment.wgsl"),
        )
        .await?;
        let layout = mk_scene_layout(
            device,
            "Atmosphere Pipeline Layout",
            camera_layout,
            object_layout,
            &[],
        );
        let desc = PipelineDesc {
            label: "Atmosphere Pipeline",
            layout: &layout,
            blend: Some(blend_state(config.additive)),
            depth: DepthMode::ReadOnly,
            // back faces only
            cull_mode: Some(wgpu::Face::Front),
            vertex_layouts: &[SphereVertex::desc()],
        };
        let pipelines = shader::validated(device, desc.label, || {
            formats.map(|format| mk_render_pipeline(device, &desc, *format, &vs, &fs))
        })
        .await?;

        let model = Matrix4::from_scale(config.scale);
        let uniform = ObjectUniform::new(
            device,
            object_layout,
            AtmosphereUniform::new(model, config),
            "Atmosphere",
        );
        Ok(Self {
            mesh: SphereMesh::new(device, geometry, "Atmosphere"),
            config: *config,
            uniform,
            pipelines,
        })
    }

    pub fn update(&mut self, queue: &wgpu::Queue, model: Matrix4<f32>) {
        self.uniform
            .write(queue, AtmosphereUniform::new(model, &self.config));
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, output: Output) {
        render_pass.set_pipeline(self.pipelines.get(output));
        render_pass.set_bind_group(1, &self.uniform.bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}
