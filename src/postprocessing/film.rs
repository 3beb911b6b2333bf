//! Film grain and scanline overlay.

use bytemuck::{Pod, Zeroable};
use instant::Duration;
use wgpu::util::DeviceExt;

use crate::{
    config::FilmParams,
    error::{Result, ShaderStage},
    pipelines::{Output, PerOutput, shader},
    postprocessing::{PassKind, fullscreen},
};

// Grain time wraps here to keep f32 precision in the noise hash.
const TIME_WRAP: f32 = 1000.0;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
struct FilmUniform {
    time: f32,
    noise_intensity: f32,
    scanline_intensity: f32,
    scanline_count: f32,
    grayscale: u32,
    _pad: [u32; 3],
}

impl FilmUniform {
    fn new(params: FilmParams, time: f32) -> Self {
        Self {
            time,
            noise_intensity: params.noise_intensity,
            scanline_intensity: params.scanline_intensity,
            scanline_count: params.scanline_count as f32,
            grayscale: params.grayscale as u32,
            _pad: [0; 3],
        }
    }
}

/// Accumulated grain time after advancing `time` by `dt`.
pub fn advance_time(time: f32, dt: Duration) -> f32 {
    (time + dt.as_secs_f32()) % TIME_WRAP
}

pub struct FilmPass {
    params: FilmParams,
    time: f32,
    pipelines: PerOutput<wgpu::RenderPipeline>,
    params_buffer: wgpu::Buffer,
    params_bind_group: wgpu::BindGroup,
}

impl FilmPass {
    pub const NAME: &'static str = "film";

    pub async fn new(
        device: &wgpu::Device,
        vertex: &wgpu::ShaderModule,
        texture_layout: &wgpu::BindGroupLayout,
        formats: &PerOutput<wgpu::TextureFormat>,
        params: FilmParams,
    ) -> Result<Self> {
        let fragment = shader::compile(
            device,
            Self::NAME,
            ShaderStage::Fragment,
            include_str!("shaders/film.wgsl"),
        )
        .await
        .map_err(fullscreen::unavailable(PassKind::Film))?;

        let params_layout = fullscreen::uniform_layout(device, "film_params_layout");
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Film Pipeline Layout"),
            bind_group_layouts: &[&params_layout, texture_layout],
            immediate_size: 0,
        });
        let pipelines = shader::validated(device, "Film", || {
            formats.map(|format| {
                fullscreen::mk_fullscreen_pipeline(
                    device, "Film", &layout, vertex, &fragment, "fs_main", *format, None,
                )
            })
        })
        .await
        .map_err(fullscreen::unavailable(PassKind::Film))?;

        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Film Params Buffer"),
            contents: bytemuck::cast_slice(&[FilmUniform::new(params, 0.0)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let params_bind_group =
            fullscreen::uniform_bind_group(device, &params_layout, &params_buffer, "film_params");

        Ok(Self {
            params,
            time: 0.0,
            pipelines,
            params_buffer,
            params_bind_group,
        })
    }

    fn upload(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[FilmUniform::new(self.params, self.time)]),
        );
    }

    /// Takes effect on the next frame.
    pub fn set_params(&mut self, queue: &wgpu::Queue, params: FilmParams) {
        self.params = params;
        self.upload(queue);
    }

    /// Move the grain forward by one frame delta.
    pub fn advance(&mut self, queue: &wgpu::Queue, dt: Duration) {
        self.time = advance_time(self.time, dt);
        self.upload(queue);
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
            "film",
            self.pipelines.get(output),
            &[&self.params_bind_group, input],
            target,
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grain_time_accumulates_and_wraps() {
        let t = advance_time(0.0, Duration::from_millis(500));
        assert!((t - 0.5).abs() < 1e-6);
        let wrapped = advance_time(TIME_WRAP - 0.25, Duration::from_millis(500));
        assert!((wrapped - 0.25).abs() < 1e-3);
    }

    #[test]
    fn uniform_carries_scanline_count_as_float() {
        let u = FilmUniform::new(FilmParams::default(), 0.0);
        assert_eq!(u.scanline_count, 648.0);
        assert_eq!(u.grayscale, 0);
        assert_eq!(std::mem::size_of::<FilmUniform>(), 32);
    }
}
