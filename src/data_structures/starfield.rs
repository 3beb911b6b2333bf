//! The decorative starfield.
//!
//! Stars are a flat position buffer (`x, y, z` per star) drawn as
//! camera-facing textured quads, one instance per star. Each coordinate is
//! drawn independently as `(U - 0.5) * (U * 5) * 2` with fresh uniforms `U`,
//! which spreads stars over (-5, 5) with most of them near the centre.

use rand::Rng;
use wgpu::util::DeviceExt;

use crate::data_structures::texture::{self, Texture};

/// Upper bound (exclusive) of the absolute value of any coordinate.
pub const STARFIELD_EXTENT: f32 = 5.0;

/// One star coordinate: zero-centered, scaled by an independent uniform.
pub fn sample_coordinate<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let centered = rng.random::<f32>() - 0.5;
    let scale = rng.random::<f32>() * STARFIELD_EXTENT;
    centered * scale * 2.0
}

/// Generate `3 * count` coordinates from `rng`.
pub fn generate_positions_with<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<f32> {
    (0..count * 3).map(|_| sample_coordinate(rng)).collect()
}

/// Generate `3 * count` coordinates from the thread RNG. Every call yields a
/// different set.
pub fn generate_positions(count: usize) -> Vec<f32> {
    generate_positions_with(count, &mut rand::rng())
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
}

impl StarInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// The point set, its GPU instance buffer and the star sprite. Immutable
/// after construction.
#[derive(Debug)]
pub struct Starfield {
    positions: Vec<f32>,
    instance_buffer: Option<wgpu::Buffer>,
    #[allow(unused)]
    sprite: Texture,
    sprite_bind_group: wgpu::BindGroup,
}

impl Starfield {
    /// `sprite_layout` must be [`texture::sampled_texture_layout`].
    pub fn new(
        device: &wgpu::Device,
        positions: Vec<f32>,
        sprite: Texture,
        sprite_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let sampler = sprite
            .sampler
            .clone()
            .unwrap_or_else(|| texture::create_clamped_sampler(device));
        let sprite_bind_group = texture::sampled_texture_bind_group(
            device,
            sprite_layout,
            &sprite.view,
            &sampler,
            "star_sprite_bind_group",
        );

        // wgpu rejects zero-sized vertex buffers, an empty field simply draws nothing
        let instance_buffer = (!positions.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Starfield Instance Buffer"),
                contents: bytemuck::cast_slice(&positions),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        Self {
            positions,
            instance_buffer,
            sprite,
            sprite_bind_group,
        }
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Draw one six-vertex quad per star. The pipeline and the camera and
    /// object bind groups must already be set; the sprite goes in group 2.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if let Some(buffer) = &self.instance_buffer {
            render_pass.set_bind_group(2, &self.sprite_bind_group, &[]);
            render_pass.set_vertex_buffer(0, buffer.slice(..));
            render_pass.draw(0..6, 0..self.len() as u32);
        }
    }
}
