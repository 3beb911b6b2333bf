//! eclipse-ngin
//!
//! A decorative 3D eclipse scene for native windows and the web: a dark
//! sphere with a glowing corona, an atmosphere shell, a slowly spinning
//! starfield and orbit camera controls, finished by a postprocessing chain of
//! bloom, antialiasing and film grain.
//!
//! High-level modules
//! - `config`: scene parameters and their TOML loading
//! - `camera`: camera, projection, orbit controls and the camera uniform
//! - `scene`: CPU side scene state advanced once per frame
//! - `frame`: the per-frame driver and the `FrameTarget` seam
//! - `postprocessing`: the pass chain and the composer that runs it
//! - `pipelines`: render pipelines for the eclipse, atmosphere and stars
//! - `render`: the GPU renderer that implements `FrameTarget`
//! - `flow`: window creation and the winit event loop
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod frame;
pub mod panel;
pub mod pipelines;
pub mod postprocessing;
pub mod render;
pub mod resources;
pub mod scene;
pub mod stats;
pub mod viewport;

pub use config::SceneConfig;
pub use error::SceneError;
pub use flow::run;
