//! Static scene parameters.
//!
//! [`SceneConfig`] carries every tunable value the scene reads at startup:
//! bloom and film-grain parameters, star count and spin, camera defaults and
//! the atmosphere shell. Defaults reproduce the shipped look. A TOML file can
//! override any subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV: &str = "ECLIPSE_CONFIG";
/// Configuration file looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "eclipse.toml";

/// Bloom pass parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomParams {
    /// Multiplier applied to the blurred highlights before compositing.
    pub strength: f32,
    /// Luminance above which a pixel contributes to the glow.
    pub threshold: f32,
    /// Spread of the blur. 0 keeps the glow tight, 1 spreads it wide.
    pub radius: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: 0.8,
            threshold: 0.1,
            radius: 1.0,
        }
    }
}

/// Film grain and scanline overlay parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmParams {
    pub noise_intensity: f32,
    pub scanline_intensity: f32,
    pub scanline_count: u32,
    pub grayscale: bool,
}

impl Default for FilmParams {
    fn default() -> Self {
        Self {
            noise_intensity: 0.35,
            scanline_intensity: 0.025,
            scanline_count: 648,
            grayscale: false,
        }
    }
}

/// How the starfield rotation advances each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarSpin {
    /// Fixed increment in radians per rendered frame (frame-rate dependent).
    PerFrame(f32),
    /// Radians per second, scaled by the measured frame delta.
    PerSecond(f32),
}

impl Default for StarSpin {
    fn default() -> Self {
        // damping 0.008 applied to a base speed of -0.1
        StarSpin::PerFrame(-0.1 * 0.008)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of one star billboard in world units.
    pub size: f32,
    pub spin: StarSpin,
    /// Sprite file below `assets/`.
    pub sprite: String,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 3000,
            size: 0.005,
            spin: StarSpin::default(),
            sprite: "cross.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [2.83, 0.55, 1.52],
            target: [0.0; 3],
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    /// Uniform scale of the glow shell relative to the unit eclipse sphere.
    pub scale: f32,
    pub color: [f32; 3],
    pub intensity: f32,
    /// Blend the shell additively instead of with normal alpha blending.
    pub additive: bool,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            scale: 1.2,
            color: [0.3, 0.6, 1.0],
            intensity: 1.0,
            additive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EclipseConfig {
    /// Colour of the light leaking around the occluded disc.
    pub corona_color: [f32; 3],
    /// Direction from the sphere towards the hidden light source.
    pub light_direction: [f32; 3],
    pub corona_power: f32,
}

impl Default for EclipseConfig {
    fn default() -> Self {
        Self {
            corona_color: [1.0, 0.85, 0.6],
            light_direction: [-1.0, 0.2, -0.4],
            corona_power: 4.0,
        }
    }
}

/// Everything the scene reads at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub bloom: BloomParams,
    pub film: FilmParams,
    pub stars: StarfieldConfig,
    pub camera: CameraConfig,
    pub atmosphere: AtmosphereConfig,
    pub eclipse: EclipseConfig,
    pub clear_colour: [f64; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bloom: BloomParams::default(),
            film: FilmParams::default(),
            stars: StarfieldConfig::default(),
            camera: CameraConfig::default(),
            atmosphere: AtmosphereConfig::default(),
            eclipse: EclipseConfig::default(),
            clear_colour: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                log::info!("loading scene configuration from {}", path.display());
                Self::from_toml_str(&source)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using default configuration", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(SceneError::InvalidConfig(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Resolve the configuration the way the binary does: `ECLIPSE_CONFIG` if
    /// set, otherwise `eclipse.toml` in the working directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SceneError::InvalidConfig(msg));
        let b = &self.bloom;
        if b.strength < 0.0 || b.threshold < 0.0 || b.radius < 0.0 {
            return invalid(format!("bloom parameters must be non-negative: {:?}", b));
        }
        let f = &self.film;
        if f.noise_intensity < 0.0 || f.scanline_intensity < 0.0 {
            return invalid(format!("film intensities must be non-negative: {:?}", f));
        }
        if f.scanline_count == 0 {
            return invalid("film scanline_count must be at least 1".to_string());
        }
        let c = &self.camera;
        if !(c.fov_deg > 0.0 && c.fov_deg < 180.0) {
            return invalid(format!("camera fov_deg must be in (0, 180), got {}", c.fov_deg));
        }
        if !(c.near > 0.0 && c.near < c.far) {
            return invalid(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                c.near, c.far
            ));
        }
        if self.stars.size <= 0.0 {
            return invalid(format!("star size must be positive, got {}", self.stars.size));
        }
        if self.atmosphere.scale <= 1.0 {
            return invalid(format!(
                "atmosphere scale must exceed the eclipse sphere (1.0), got {}",
                self.atmosphere.scale
            ));
        }
        Ok(())
    }
}
