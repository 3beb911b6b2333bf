//! Display surface dimensions.
//!
//! The surface is sized in logical units (the container size) and rendered at
//! `logical * pixel_ratio` physical pixels. The camera aspect comes from the
//! logical size, every GPU buffer from the pixel size.

use winit::dpi::PhysicalSize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    pixel_ratio: f64,
}

impl Viewport {
    /// Returns `None` for a zero-sized container; the caller defers
    /// initialisation until a non-zero resize arrives.
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 || pixel_ratio <= 0.0 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixel_ratio,
        })
    }

    /// A 1x1 viewport at pixel ratio 1, used before the first real size is known.
    pub fn unit() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            pixel_ratio: 1.0,
        }
    }

    /// Build a viewport from winit's physical window size and scale factor.
    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64) -> Option<Self> {
        if scale_factor <= 0.0 {
            return None;
        }
        Self::new(
            size.width as f64 / scale_factor,
            size.height as f64 / scale_factor,
            scale_factor,
        )
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Buffer dimensions in physical pixels, never below 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).round().max(1.0) as u32;
        let h = (self.height * self.pixel_ratio).round().max(1.0) as u32;
        (w, h)
    }
}
