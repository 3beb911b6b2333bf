//! FXAA resolve. Runs at full pixel resolution, so its texel size is
//! rewritten on every resize.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::{
    error::{Result, ShaderStage},
    pipelines::{Output, PerOutput, shader},
    postprocessing::{PassKind, fullscreen},
};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
struct FxaaUniform {
    texel: [f32; 2],
    _pad: [f32; 2],
}

impl FxaaUniform {
    fn new(width: u32, height: u32) -> Self {
        Self {
            texel: [1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32],
            _pad: [0.0; 2],
        }
    }
}

pub struct AntialiasPass {
    pipelines: PerOutput<wgpu::RenderPipeline>,
    params_buffer: wgpu::Buffer,
    params_bind_group: wgpu::BindGroup,
}

impl AntialiasPass {
    pub const NAME: &'static str = "antialias";

    pub async fn new(
        device: &wgpu::Device,
        vertex: &wgpu::ShaderModule,
        texture_layout: &wgpu::BindGroupLayout,
        formats: &PerOutput<wgpu::TextureFormat>,
        (width, height): (u32, u32),
    ) -> Result<Self> {
        let fragment = shader::compile(
            device,
            Self::NAME,
            ShaderStage::Fragment,
            include_str!("shaders/fxaa.wgsl"),
        )
        .await
        .map_err(fullscreen::unavailable(PassKind::Antialias))?;

        let params_layout = fullscreen::uniform_layout(device, "fxaa_params_layout");
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("FXAA Pipeline Layout"),
            bind_group_layouts: &[&params_layout, texture_layout],
            immediate_size: 0,
        });
        let pipelines = shader::validated(device, "FXAA", || {
            formats.map(|format| {
                fullscreen::mk_fullscreen_pipeline(
                    device, "FXAA", &layout, vertex, &fragment, "fs_main", *format, None,
                )
            })
        })
        .await
        .map_err(fullscreen::unavailable(PassKind::Antialias))?;

        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("FXAA Params Buffer"),
            contents: bytemuck::cast_slice(&[FxaaUniform::new(width, height)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let params_bind_group =
            fullscreen::uniform_bind_group(device, &params_layout, &params_buffer, "fxaa_params");

        Ok(Self {
            pipelines,
            params_buffer,
            params_bind_group,
        })
    }

    pub fn resize(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[FxaaUniform::new(width, height)]),
        );
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        input: &wgpu::BindGroup,
        target: &wgpu::TextureView,
        output: Output,
    ) {
        fullscreen::run_pass(
            encoder,
            "fxaa",
            self.pipelines.get(output),
            &[&self.params_bind_group, input],
            target,
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
        );
    }
}
