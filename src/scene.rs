//! CPU side scene state read by the renderer every frame.

use cgmath::{Deg, Matrix4, Rad, SquareMatrix};
use instant::Duration;

use crate::{
    camera::{Camera, Projection},
    config::{SceneConfig, StarSpin},
    viewport::Viewport,
};

#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub camera: Camera,
    pub projection: Projection,
    /// Rotation of the starfield around the Y axis.
    pub star_rotation: Rad<f32>,
    pub star_spin: StarSpin,
    pub atmosphere_scale: f32,
}

impl SceneState {
    pub fn new(config: &SceneConfig, viewport: &Viewport) -> Self {
        let mut projection = Projection::new(
            1,
            1,
            Deg(config.camera.fov_deg),
            config.camera.near,
            config.camera.far,
        );
        projection.set_aspect(viewport.aspect());
        Self {
            camera: Camera::from(&config.camera),
            projection,
            star_rotation: Rad(0.0),
            star_spin: config.stars.spin,
            atmosphere_scale: config.atmosphere.scale,
        }
    }

    /// Advance continuous animation by one frame.
    pub fn advance(&mut self, dt: Duration) {
        let step = match self.star_spin {
            StarSpin::PerFrame(rad) => rad,
            StarSpin::PerSecond(rad) => rad * dt.as_secs_f32(),
        };
        self.star_rotation += Rad(step);
    }

    pub fn resize(&mut self, viewport: &Viewport) {
        self.projection.set_aspect(viewport.aspect());
    }

    pub fn star_transform(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(self.star_rotation)
    }

    pub fn atmosphere_transform(&self) -> Matrix4<f32> {
        Matrix4::from_scale(self.atmosphere_scale)
    }

    pub fn eclipse_transform(&self) -> Matrix4<f32> {
        Matrix4::identity()
    }
}
