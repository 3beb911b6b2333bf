//! Error taxonomy for startup, resize and pass construction.
//!
//! Every variant describes a condition that is local to startup or to a
//! reconfiguration. Nothing in here is allowed to stop a running frame loop:
//! the loop logs render errors and keeps going.

use std::fmt;

use crate::postprocessing::PassKind;

/// The shader stage a compilation diagnostic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// No adapter can present to the window surface.
    #[error("no compatible GPU adapter found; a WebGPU/WebGL2, Vulkan, Metal or DX12 context is required")]
    NoAdapter,

    #[error("failed to request GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// A shader program failed to compile. Names the object and the stage so a
    /// black mesh can be traced back to its source.
    #[error("{stage} shader of `{object}` failed to compile: {message}")]
    Shader {
        object: &'static str,
        stage: ShaderStage,
        message: String,
    },

    /// A pipeline or other GPU object failed device validation.
    #[error("`{label}` failed validation: {message}")]
    Pipeline { label: String, message: String },

    #[error("could not parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A postprocessing pass cannot run on this adapter.
    #[error("{kind:?} pass unavailable: {reason}")]
    PassUnavailable { kind: PassKind, reason: String },

    #[error("pass chain invariant violated: {0}")]
    ChainInvariant(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
