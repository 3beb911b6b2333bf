#![allow(dead_code)]

use cgmath::{Point3, Rad};
use eclipse_ngin::{
    frame::FrameTarget, scene::SceneState, viewport::Viewport,
};
use instant::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Resize((u32, u32)),
    Render {
        camera: Point3<f32>,
        aspect: f32,
        star_rotation: Rad<f32>,
    },
}

/// Stands in for the GPU renderer and remembers what the loop asked of it.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<Call>,
    pub fail_with: Option<wgpu::SurfaceError>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Render { .. }))
            .collect()
    }
}

impl FrameTarget for RecordingTarget {
    fn resize(&mut self, viewport: &Viewport) {
        self.calls.push(Call::Resize(viewport.pixel_size()));
    }

    fn render(&mut self, scene: &SceneState, _dt: Duration) -> Result<(), wgpu::SurfaceError> {
        if let Some(e) = self.fail_with.take() {
            return Err(e);
        }
        self.calls.push(Call::Render {
            camera: scene.camera.position,
            aspect: scene.projection.aspect(),
            star_rotation: scene.star_rotation,
        });
        Ok(())
    }
}

/// Adapter and device without a window, for offscreen rendering.
///
/// The feature gate is the opt-in: a machine that enables it without any
/// usable adapter fails here rather than silently passing.
#[cfg(feature = "integration-tests")]
pub async fn headless_gpu() -> (wgpu::Adapter, wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("integration-tests needs a GPU or software adapter");
    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("headless_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                .using_resolution(adapter.limits()),
            memory_hints: wgpu::MemoryHints::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .expect("headless device");
    (adapter, device, queue)
}

/// Drive a GPU test future to completion.
#[cfg(feature = "integration-tests")]
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Runtime::new().unwrap().block_on(future)
}
