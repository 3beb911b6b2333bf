use instant::Duration;

use crate::{
    config::{BloomParams, FilmParams, SceneConfig},
    data_structures::texture::{self, Texture},
    error::Result,
    pipelines::{Output, PerOutput},
    postprocessing::{
        AntialiasPass, BloomPass, FilmPass, PassChain, PassKind, fullscreen,
    },
};

/// Anything the base render pass can rasterize. Group 0 (camera) is bound
/// by the composer before `draw` is called.
pub trait DrawScene {
    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, output: Output);
}

struct PingPong {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

impl PingPong {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        size: (u32, u32),
        label: &str,
    ) -> Self {
        let texture = Texture::create_render_target(device, [size.0, size.1], format, label);
        let sampler = texture
            .sampler
            .clone()
            .unwrap_or_else(|| texture::create_clamped_sampler(device));
        let bind_group =
            texture::sampled_texture_bind_group(device, layout, &texture.view, &sampler, label);
        Self {
            texture,
            bind_group,
        }
    }

    fn pair(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        size: (u32, u32),
    ) -> [Self; 2] {
        [
            Self::new(device, layout, format, size, "postprocess_ping"),
            Self::new(device, layout, format, size, "postprocess_pong"),
        ]
    }
}

/// Runs the pass chain: base render, bloom, antialias, film.
///
/// Upstream passes alternate between two intermediate buffers; the terminal
/// pass writes the surface view handed to [`Composer::render`].
pub struct Composer {
    chain: PassChain,
    formats: PerOutput<wgpu::TextureFormat>,
    size: (u32, u32),
    clear: wgpu::Color,
    texture_layout: wgpu::BindGroupLayout,
    targets: [PingPong; 2],
    depth: Texture,
    bloom: Option<BloomPass>,
    antialias: Option<AntialiasPass>,
    film: Option<FilmPass>,
}

impl Composer {
    /// Build every pass. An optional pass that cannot run on this adapter is
    /// marked unavailable and skipped from then on.
    pub async fn new(
        device: &wgpu::Device,
        adapter: &wgpu::Adapter,
        surface_format: wgpu::TextureFormat,
        size: (u32, u32),
        config: &SceneConfig,
    ) -> Result<Self> {
        let formats = PerOutput {
            intermediate: fullscreen::pick_intermediate_format(adapter),
            surface: surface_format,
        };
        let texture_layout = texture::sampled_texture_layout(device, "postprocess_texture_layout");
        let mut chain = PassChain::new(config.bloom, config.film);

        let (bloom, antialias, film) = match fullscreen::compile_vertex(device).await {
            Ok(vertex) => {
                let (bloom, antialias, film) = futures::join!(
                    BloomPass::new(
                        device,
                        adapter,
                        &vertex,
                        &texture_layout,
                        &formats,
                        size,
                        config.bloom,
                    ),
                    AntialiasPass::new(device, &vertex, &texture_layout, &formats, size),
                    FilmPass::new(device, &vertex, &texture_layout, &formats, config.film),
                );
                (
                    keep(&mut chain, PassKind::Bloom, bloom)?,
                    keep(&mut chain, PassKind::Antialias, antialias)?,
                    keep(&mut chain, PassKind::Film, film)?,
                )
            }
            Err(e) => {
                log::warn!("fullscreen passes disabled: {}", e);
                for kind in [PassKind::Bloom, PassKind::Antialias, PassKind::Film] {
                    chain.mark_unavailable(kind)?;
                }
                (None, None, None)
            }
        };
        log::info!(
            "pass chain {:?}, terminal {:?}, intermediate format {:?}",
            chain.enabled_passes().collect::<Vec<_>>(),
            chain.terminal(),
            formats.intermediate
        );

        let [r, g, b, a] = config.clear_colour;
        Ok(Self {
            targets: PingPong::pair(device, &texture_layout, formats.intermediate, size),
            depth: Texture::create_depth_texture(device, [size.0, size.1], "depth_texture"),
            chain,
            formats,
            size,
            clear: wgpu::Color { r, g, b, a },
            texture_layout,
            bloom,
            antialias,
            film,
        })
    }

    pub fn chain(&self) -> &PassChain {
        &self.chain
    }

    pub fn formats(&self) -> &PerOutput<wgpu::TextureFormat> {
        &self.formats
    }

    /// Current buffer size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn bloom(&self) -> BloomParams {
        self.chain.bloom()
    }

    pub fn film(&self) -> FilmParams {
        self.chain.film()
    }

    pub fn set_bloom(&mut self, queue: &wgpu::Queue, params: BloomParams) {
        self.chain.set_bloom(params);
        if let Some(bloom) = &self.bloom {
            bloom.set_params(queue, params);
        }
    }

    pub fn set_film(&mut self, queue: &wgpu::Queue, params: FilmParams) {
        self.chain.set_film(params);
        if let Some(film) = &mut self.film {
            film.set_params(queue, params);
        }
    }

    /// Toggle an optional pass; returns the new terminal pass.
    pub fn set_enabled(&mut self, kind: PassKind, enabled: bool) -> Result<PassKind> {
        self.chain.set_enabled(kind, enabled)
    }

    /// Take a pass out of the chain for good, releasing its GPU resources.
    /// Returns the new terminal pass.
    pub fn mark_unavailable(&mut self, kind: PassKind) -> Result<PassKind> {
        let terminal = self.chain.mark_unavailable(kind)?;
        match kind {
            PassKind::Bloom => self.bloom = None,
            PassKind::Antialias => self.antialias = None,
            PassKind::Film => self.film = None,
            PassKind::Render => {}
        }
        Ok(terminal)
    }

    /// Resize every buffer in the chain to `width` x `height` physical pixels.
    pub fn resize(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, width: u32, height: u32) {
        let size = (width.max(1), height.max(1));
        if size == self.size {
            return;
        }
        self.size = size;
        self.targets = PingPong::pair(device, &self.texture_layout, self.formats.intermediate, size);
        self.depth = Texture::create_depth_texture(device, [size.0, size.1], "depth_texture");
        if let Some(bloom) = &mut self.bloom {
            bloom.resize(device, size.0, size.1);
        }
        if let Some(antialias) = &self.antialias {
            antialias.resize(queue, size.0, size.1);
        }
    }

    /// Record one frame. Exactly one pass, the terminal one, writes
    /// `surface_view`.
    pub fn render(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        scene: &dyn DrawScene,
        camera: &wgpu::BindGroup,
        dt: Duration,
    ) -> Result<()> {
        self.chain.validate()?;
        if self.chain.is_enabled(PassKind::Film) {
            if let Some(film) = &mut self.film {
                film.advance(queue, dt);
            }
        }

        let mut read = 0;
        for kind in self.chain.enabled_passes() {
            let output = if self.chain.is_terminal(kind) {
                Output::Surface
            } else {
                Output::Intermediate
            };
            let write = if kind == PassKind::Render { 0 } else { 1 - read };
            let target = match output {
                Output::Surface => surface_view,
                Output::Intermediate => &self.targets[write].texture.view,
            };
            let input = &self.targets[read].bind_group;

            match kind {
                PassKind::Render => self.render_scene(encoder, scene, camera, target, output),
                PassKind::Bloom => {
                    if let Some(bloom) = &self.bloom {
                        bloom.render(encoder, input, target, output);
                    }
                }
                PassKind::Antialias => {
                    if let Some(antialias) = &self.antialias {
                        antialias.render(encoder, input, target, output);
                    }
                }
                PassKind::Film => {
                    if let Some(film) = &self.film {
                        film.render(encoder, input, target, output);
                    }
                }
            }
            read = write;
        }
        Ok(())
    }

    fn render_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        scene: &dyn DrawScene,
        camera: &wgpu::BindGroup,
        target: &wgpu::TextureView,
        output: Output,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_render"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        render_pass.set_bind_group(0, camera, &[]);
        scene.draw(&mut render_pass, output);
    }
}

fn keep<P>(chain: &mut PassChain, kind: PassKind, pass: Result<P>) -> Result<Option<P>> {
    match pass {
        Ok(pass) => Ok(Some(pass)),
        Err(e) => {
            log::warn!("{:?} pass unavailable, skipping it: {}", kind, e);
            chain.mark_unavailable(kind)?;
            Ok(None)
        }
    }
}
