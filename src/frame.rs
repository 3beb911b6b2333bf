//! The per-frame driver.
//!
//! [`RenderLoop`] owns the CPU side of the scene and runs one frame at a time
//! against a [`FrameTarget`], which owns the GPU side. Each frame:
//!
//! 1. a pending resize is applied to the camera and to the target,
//! 2. the orbit controls apply the input accumulated since the last frame,
//! 3. the performance counter ticks,
//! 4. continuous animation (starfield spin) advances,
//! 5. the frame delta is measured,
//! 6. the target renders the scene with that delta.
//!
//! Scheduling the next frame is left to the host (see [`crate::flow`]).
//! Because steps 1-4 finish before step 6 reads the scene, a frame never
//! renders stale camera or animation state.

use instant::Duration;
use winit::event::WindowEvent;

use crate::{
    camera::OrbitController,
    config::SceneConfig,
    scene::SceneState,
    stats::{FrameClock, Stats},
    viewport::Viewport,
};

/// Whatever turns a [`SceneState`] into pixels.
pub trait FrameTarget {
    /// Resize every buffer to the viewport's pixel size. Called before the
    /// next [`FrameTarget::render`].
    fn resize(&mut self, viewport: &Viewport);

    fn render(&mut self, scene: &SceneState, dt: Duration) -> Result<(), wgpu::SurfaceError>;
}

#[derive(Debug)]
pub struct RenderLoop {
    pub scene: SceneState,
    pub controller: OrbitController,
    stats: Stats,
    clock: FrameClock,
    viewport: Option<Viewport>,
    pending_resize: Option<Viewport>,
    last_dt: Duration,
}

impl RenderLoop {
    /// `viewport` is `None` when the container was zero-sized at startup;
    /// frames are skipped until a usable resize arrives.
    pub fn new(config: &SceneConfig, viewport: Option<Viewport>) -> Self {
        let initial = viewport.unwrap_or_else(Viewport::unit);
        let mut controller = OrbitController::new(&config.camera);
        controller.set_viewport_height(initial.pixel_size().1);
        Self {
            scene: SceneState::new(config, &initial),
            controller,
            stats: Stats::default(),
            clock: FrameClock::new(),
            viewport,
            pending_resize: None,
            last_dt: Duration::ZERO,
        }
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Record a resize. The latest request wins and is applied at the start
    /// of the next frame. A zero-sized container is ignored.
    pub fn request_resize(&mut self, viewport: Option<Viewport>) {
        match viewport {
            Some(viewport) => self.pending_resize = Some(viewport),
            None => log::debug!("ignoring resize to a zero-sized surface"),
        }
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) -> bool {
        self.controller.handle_window_events(event)
    }

    /// Log the camera position; the hook for generic clicks.
    pub fn on_click(&self) {
        let p = self.scene.camera.position;
        log::info!("camera position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
    }

    /// Run one frame. Returns the measured delta, or `None` while the
    /// viewport is still zero-sized.
    pub fn frame<T: FrameTarget + ?Sized>(
        &mut self,
        target: &mut T,
    ) -> Result<Option<Duration>, wgpu::SurfaceError> {
        if let Some(viewport) = self.pending_resize.take() {
            self.scene.resize(&viewport);
            self.controller.set_viewport_height(viewport.pixel_size().1);
            target.resize(&viewport);
            self.viewport = Some(viewport);
        }
        if self.viewport.is_none() {
            return Ok(None);
        }

        self.controller
            .update(&mut self.scene.camera, &self.scene.projection);
        self.stats.update();
        // delta-scaled spin uses the previous frame's delta
        self.scene.advance(self.last_dt);
        let dt = self.clock.delta();
        self.last_dt = dt;

        target.render(&self.scene, dt)?;
        Ok(Some(dt))
    }
}
