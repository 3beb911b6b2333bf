//! Bloom: bright-pass extraction, a progressive mip-chain blur and an
//! additive composite over the input image.
//!
//! ```text
//! input --extract--> mip[0] --down--> mip[1] ... mip[n-1]
//!                    mip[0] <--up (additive)-- ... mip[n-1]
//! input + strength * mip[0] --composite--> output
//! ```

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::{
    config::BloomParams,
    data_structures::texture::{self, Texture},
    error::{Result, SceneError, ShaderStage},
    pipelines::{Output, PerOutput, shader},
    postprocessing::{
        PassKind,
        fullscreen::{self, ADDITIVE},
    },
};

/// Number of blur levels below the half-resolution bright pass.
pub const MIP_LEVELS: usize = 5;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct BloomUniform {
    strength: f32,
    threshold: f32,
    radius: f32,
    _pad: f32,
}

impl From<BloomParams> for BloomUniform {
    fn from(p: BloomParams) -> Self {
        Self {
            strength: p.strength,
            threshold: p.threshold,
            radius: p.radius,
            _pad: 0.0,
        }
    }
}

struct Mip {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// Sizes of the blur chain for a `width` x `height` input, halving from half
/// resolution and never below 1x1.
pub fn mip_sizes(width: u32, height: u32) -> Vec<[u32; 2]> {
    let mut size = [(width / 2).max(1), (height / 2).max(1)];
    let mut sizes = Vec::with_capacity(MIP_LEVELS);
    for _ in 0..MIP_LEVELS {
        sizes.push(size);
        size = [(size[0] / 2).max(1), (size[1] / 2).max(1)];
    }
    sizes
}

pub struct BloomPass {
    format: wgpu::TextureFormat,
    texture_layout: wgpu::BindGroupLayout,
    extract: wgpu::RenderPipeline,
    downsample: wgpu::RenderPipeline,
    upsample: wgpu::RenderPipeline,
    composite: PerOutput<wgpu::RenderPipeline>,
    params_buffer: wgpu::Buffer,
    params_bind_group: wgpu::BindGroup,
    mips: Vec<Mip>,
}

impl BloomPass {
    pub const NAME: &'static str = "bloom";

    /// Fails with [`SceneError::PassUnavailable`] when the intermediate
    /// format cannot be blended or a shader does not compile.
    pub async fn new(
        device: &wgpu::Device,
        adapter: &wgpu::Adapter,
        vertex: &wgpu::ShaderModule,
        texture_layout: &wgpu::BindGroupLayout,
        formats: &PerOutput<wgpu::TextureFormat>,
        size: (u32, u32),
        params: BloomParams,
    ) -> Result<Self> {
        let format = formats.intermediate;
        let flags = adapter.get_texture_format_features(format).flags;
        if !flags.contains(wgpu::TextureFormatFeatureFlags::BLENDABLE) {
            return Err(SceneError::PassUnavailable {
                kind: PassKind::Bloom,
                reason: format!("{:?} is not blendable", format),
            });
        }
        let fragment = shader::compile(
            device,
            Self::NAME,
            ShaderStage::Fragment,
            include_str!("shaders/bloom.wgsl"),
        )
        .await
        .map_err(fullscreen::unavailable(PassKind::Bloom))?;

        let params_layout = fullscreen::uniform_layout(device, "bloom_params_layout");
        // the blur chain reads one texture, the composite reads the input and mip 0
        let blur_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Bloom Blur Pipeline Layout"),
            bind_group_layouts: &[&params_layout, texture_layout],
            immediate_size: 0,
        });
        let composite_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Bloom Composite Pipeline Layout"),
            bind_group_layouts: &[&params_layout, texture_layout, texture_layout],
            immediate_size: 0,
        });
        let pipeline = |label: &str, layout, entry: &str, format, blend| {
            fullscreen::mk_fullscreen_pipeline(device, label, layout, vertex, &fragment, entry, format, blend)
        };
        let (extract, downsample, upsample, composite) = shader::validated(device, "Bloom", || {
            (
                pipeline("Bloom Extract", &blur_layout, "fs_extract", format, None),
                pipeline("Bloom Downsample", &blur_layout, "fs_downsample", format, None),
                pipeline("Bloom Upsample", &blur_layout, "fs_upsample", format, Some(ADDITIVE)),
                formats.map(|f| pipeline("Bloom Composite", &composite_layout, "fs_composite", *f, None)),
            )
        })
        .await
        .map_err(fullscreen::unavailable(PassKind::Bloom))?;

        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Bloom Params Buffer"),
            contents: bytemuck::cast_slice(&[BloomUniform::from(params)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let params_bind_group =
            fullscreen::uniform_bind_group(device, &params_layout, &params_buffer, "bloom_params");

        let mips = Self::create_mips(device, texture_layout, format, size);
        Ok(Self {
            format,
            texture_layout: texture_layout.clone(),
            extract,
            downsample,
            upsample,
            composite,
            params_buffer,
            params_bind_group,
            mips,
        })
    }

    fn create_mips(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        (width, height): (u32, u32),
    ) -> Vec<Mip> {
        mip_sizes(width, height)
            .into_iter()
            .enumerate()
            .map(|(level, size)| {
                let label = format!("bloom_mip_{}", level);
                let texture = Texture::create_render_target(device, size, format, &label);
                let sampler = texture
                    .sampler
                    .clone()
                    .unwrap_or_else(|| texture::create_clamped_sampler(device));
                let bind_group =
                    texture::sampled_texture_bind_group(device, layout, &texture.view, &sampler, &label);
                Mip {
                    texture,
                    bind_group,
                }
            })
            .collect()
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.mips = Self::create_mips(device, &self.texture_layout, self.format, (width, height));
    }

    /// Takes effect on the next frame.
    pub fn set_params(&self, queue: &wgpu::Queue, params: BloomParams) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[BloomUniform::from(params)]),
        );
    }

    /// `input` is the sampled image, `target` receives input plus glow.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        input: &wgpu::BindGroup,
        target: &wgpu::TextureView,
        output: Output,
    ) {
        let clear = wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT);

        fullscreen::run_pass(
            encoder,
            "bloom_extract",
            &self.extract,
            &[&self.params_bind_group, input],
            &self.mips[0].texture.view,
            clear,
        );
        for level in 1..self.mips.len() {
            fullscreen::run_pass(
                encoder,
                "bloom_downsample",
                &self.downsample,
                &[&self.params_bind_group, &self.mips[level - 1].bind_group],
                &self.mips[level].texture.view,
                clear,
            );
        }
        for level in (0..self.mips.len() - 1).rev() {
            fullscreen::run_pass(
                encoder,
                "bloom_upsample",
                &self.upsample,
                &[&self.params_bind_group, &self.mips[level + 1].bind_group],
                &self.mips[level].texture.view,
                wgpu::LoadOp::Load,
            );
        }
        fullscreen::run_pass(
            encoder,
            "bloom_composite",
            self.composite.get(output),
            &[&self.params_bind_group, input, &self.mips[0].bind_group],
            target,
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
        );
    }
}
