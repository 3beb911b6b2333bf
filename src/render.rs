//! The GPU side of a frame.
//!
//! [`SceneObjects`] holds the three drawables in draw order (eclipse,
//! atmosphere, stars). [`Renderer`] owns them together with the context,
//! the camera uniform and the [`Composer`], and is the [`FrameTarget`] the
//! render loop drives.

use std::sync::Arc;

use instant::Duration;
use winit::window::Window;

use crate::{
    camera::CameraResources,
    config::SceneConfig,
    context::Context,
    data_structures::{
        sphere::SphereGeometry,
        starfield::{self, Starfield},
        texture,
    },
    error::Result,
    frame::FrameTarget,
    panel::PanelAction,
    pipelines::{
        Output, PerOutput, atmosphere::Atmosphere, eclipse::Eclipse, object_uniform_layout,
        stars::Stars,
    },
    postprocessing::{Composer, DrawScene},
    resources,
    scene::SceneState,
    viewport::Viewport,
};

/// Width and height segments of both spheres.
pub const SPHERE_SEGMENTS: u32 = 128;

pub struct SceneObjects {
    eclipse: Eclipse,
    atmosphere: Atmosphere,
    stars: Stars,
}

impl SceneObjects {
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera_layout: &wgpu::BindGroupLayout,
        formats: &PerOutput<wgpu::TextureFormat>,
        config: &SceneConfig,
    ) -> Result<Self> {
        let geometry = SphereGeometry::new(1.0, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
        let object_layout = object_uniform_layout(device);
        let sprite_layout = texture::sampled_texture_layout(device, "star_sprite_layout");

        let eclipse = Eclipse::new(
            device,
            &geometry,
            camera_layout,
            &object_layout,
            formats,
            &config.eclipse,
        )
        .await?;
        let atmosphere = Atmosphere::new(
            device,
            &geometry,
            camera_layout,
            &object_layout,
            formats,
            &config.atmosphere,
        )
        .await?;

        let sprite = resources::texture::load_sprite(device, queue, &config.stars.sprite).await;
        let positions = starfield::generate_positions(config.stars.count);
        let field = Starfield::new(device, positions, sprite, &sprite_layout);
        log::info!("starfield with {} stars", field.len());
        let stars = Stars::new(
            device,
            field,
            config.stars.size,
            camera_layout,
            &object_layout,
            &sprite_layout,
            formats,
        )
        .await?;

        Ok(Self {
            eclipse,
            atmosphere,
            stars,
        })
    }

    pub fn stars(&self) -> &Stars {
        &self.stars
    }

    /// Upload every object's transform for this frame.
    pub fn update(&mut self, queue: &wgpu::Queue, scene: &SceneState) {
        self.eclipse.update(queue, scene.eclipse_transform());
        self.atmosphere.update(queue, scene.atmosphere_transform());
        self.stars.update(queue, scene.star_transform());
    }
}

impl DrawScene for SceneObjects {
    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, output: Output) {
        self.eclipse.draw(render_pass, output);
        self.atmosphere.draw(render_pass, output);
        self.stars.draw(render_pass, output);
    }
}

pub struct Renderer {
    pub ctx: Context,
    camera: CameraResources,
    objects: SceneObjects,
    composer: Composer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, config: &SceneConfig, scene: &SceneState) -> Result<Self> {
        let ctx = Context::new(window).await?;
        let camera = CameraResources::new(&ctx.device, &scene.camera, &scene.projection);
        let size = (ctx.config.width, ctx.config.height);
        let composer =
            Composer::new(&ctx.device, &ctx.adapter, ctx.surface_format(), size, config).await?;
        let objects = SceneObjects::new(
            &ctx.device,
            &ctx.queue,
            &camera.bind_group_layout,
            composer.formats(),
            config,
        )
        .await?;
        Ok(Self {
            ctx,
            camera,
            objects,
            composer,
        })
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn window(&self) -> &Window {
        &self.ctx.window
    }

    /// Apply a live parameter change. Takes effect on the next frame.
    pub fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::SetBloom(params) => {
                self.composer.set_bloom(&self.ctx.queue, params);
                log::info!("bloom: {:?}", params);
            }
            PanelAction::SetFilm(params) => {
                self.composer.set_film(&self.ctx.queue, params);
                log::info!("film: {:?}", params);
            }
            PanelAction::Toggle(kind, enabled) => match self.composer.set_enabled(kind, enabled) {
                Ok(terminal) => log::info!(
                    "{:?} pass {}, terminal pass is {:?}",
                    kind,
                    if enabled { "enabled" } else { "disabled" },
                    terminal
                ),
                Err(e) => log::warn!("cannot toggle {:?}: {}", kind, e),
            },
        }
    }
}

impl FrameTarget for Renderer {
    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.pixel_size();
        self.ctx.configure(width, height);
        self.composer
            .resize(&self.ctx.device, &self.ctx.queue, width, height);
    }

    fn render(&mut self, scene: &SceneState, dt: Duration) -> std::result::Result<(), wgpu::SurfaceError> {
        if !self.ctx.is_surface_configured {
            return Ok(());
        }
        self.camera
            .write(&self.ctx.queue, &scene.camera, &scene.projection);
        self.objects.update(&self.ctx.queue, scene);

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        if let Err(e) = self.composer.render(
            &self.ctx.queue,
            &mut encoder,
            &view,
            &self.objects,
            &self.camera.bind_group,
            dt,
        ) {
            log::error!("frame skipped: {}", e);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
