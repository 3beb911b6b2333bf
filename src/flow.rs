//! Window and event loop host.
//!
//! [`App`] creates the window, builds the GPU side asynchronously (blocked on
//! with a tokio runtime natively, spawned and delivered back as a
//! [`FlowEvent`] on the web) and then forwards window events:
//!
//! - resizes and scale factor changes become a pending [`Viewport`],
//! - pointer input goes to the orbit controls, a left click logs the camera,
//! - key presses go to the [`ParamPanel`],
//! - every `RedrawRequested` runs one [`RenderLoop::frame`] and requests the
//!   next redraw.

use std::{fmt::Debug, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::SceneConfig,
    error::SceneError,
    frame::RenderLoop,
    panel::ParamPanel,
    render::Renderer,
    resources,
    viewport::Viewport,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Everything that exists once the GPU is up.
pub struct AppState {
    renderer: Renderer,
    render_loop: RenderLoop,
    panel: ParamPanel,
}

impl AppState {
    async fn new(window: Arc<Window>, config: SceneConfig) -> Result<Self, SceneError> {
        let viewport = Viewport::from_physical(window.inner_size(), window.scale_factor());
        if viewport.is_none() {
            log::info!("window is zero-sized, deferring the first frame until it is resized");
        }
        let render_loop = RenderLoop::new(&config, viewport);
        let renderer = Renderer::new(window, &config, &render_loop.scene).await?;
        let mut state = Self {
            renderer,
            render_loop,
            panel: ParamPanel::new(),
        };
        state.resize_to_window();
        Ok(state)
    }

    /// Queue a resize to the window's current size; applied by the next frame.
    fn resize_to_window(&mut self) {
        let window = self.renderer.window();
        let viewport = Viewport::from_physical(window.inner_size(), window.scale_factor());
        self.render_loop.request_resize(viewport);
    }

    fn redraw(&mut self) {
        match self.render_loop.frame(&mut self.renderer) {
            Ok(_) => {}
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.resize_to_window(),
            Err(e) => log::error!("Unable to render {}", e),
        }
        self.renderer.window().request_redraw();
    }
}

pub enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Result<AppState, SceneError>),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(Ok(_)) => f.write_str("Initialized(Ok)"),
            Self::Initialized(Err(e)) => f.debug_tuple("Initialized").field(e).finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    state: Option<AppState>,
    // taken when the window is created
    config: Option<Option<SceneConfig>>,
    init_error: Option<anyhow::Error>,
}

impl App {
    /// `config` of `None` loads `eclipse.toml` from the assets.
    fn new(event_loop: &EventLoop<FlowEvent>, config: Option<SceneConfig>) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            state: None,
            config: Some(config),
            init_error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("App initialization failed: {:#}", error);
        self.init_error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.config.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("eclipse");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID));
            match canvas {
                Some(canvas) => {
                    window_attributes = window_attributes.with_canvas(Some(canvas.unchecked_into()));
                }
                None => log::warn!("no element with id `{}`, creating a new canvas", CANVAS_ID),
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let init_future = async move {
            let config = match config {
                Some(config) => config,
                None => resources::load_config().await,
            };
            AppState::new(window, config).await
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok(state) => {
                    state.renderer.window().request_redraw();
                    self.state = Some(state);
                }
                Err(e) => self.fail(event_loop, e.into()),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let state = init_future.await;
                if proxy.send_event(FlowEvent::Initialized(state)).is_err() {
                    log::error!("event loop closed before initialization finished");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(Ok(mut state)) => {
                // This is the message from our wasm `spawn_local`
                state.resize_to_window();
                state.renderer.window().request_redraw();
                self.state = Some(state);
            }
            FlowEvent::Initialized(Err(e)) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.render_loop.handle_window_events(&event);
        if let Some(action) = state
            .panel
            .handle_window_event(&event, state.renderer.composer().chain())
        {
            state.renderer.apply(action);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                state.resize_to_window()
            }
            WindowEvent::RedrawRequested => state.redraw(),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => state.render_loop.on_click(),
            _ => {}
        }
    }
}

static LOGGER: std::sync::Once = std::sync::Once::new();

/// Install the logger: `env_logger` natively, the browser console on the
/// web. Safe to call more than once; only the first call installs anything.
pub fn init_logger() {
    LOGGER.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        }

        #[cfg(target_arch = "wasm32")]
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("could not initialize logger: {}", e).into());
        }
    });
}

/// Open the window and run until it is closed. `config` of `None` loads
/// `eclipse.toml` from the assets directory.
pub fn run(config: Option<SceneConfig>) -> anyhow::Result<()> {
    init_logger();

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Web entry point: runs against the `#canvas` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    init_logger();
    run(None).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
