//! Camera, projection and orbit controls.
//!
//! [`Camera`] is a look-at camera described by a position and a target.
//! [`OrbitController`] accumulates pointer input between frames and applies it
//! to the camera once per frame in [`OrbitController::update`]: dragging
//! rotates around the target, right-dragging (or shift-dragging) pans, the
//! wheel dollies towards or away from the target.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector2, Vector3, perspective};
use wgpu::util::DeviceExt;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

// Keeps the camera off the poles where look_at degenerates.
const POLE_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>, T: Into<Point3<f32>>>(position: P, target: T) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y())
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).magnitude()
    }
}

impl From<&CameraConfig> for Camera {
    fn from(config: &CameraConfig) -> Self {
        Camera::new(config.position, config.target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Non-finite or non-positive ratios are ignored so a collapsed
    /// container never produces an infinite aspect.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> Rad<f32> {
        self.fovy
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drag {
    None,
    Rotate,
    Pan,
}

/// Orbit/pan/zoom controls around the camera target.
#[derive(Debug)]
pub struct OrbitController {
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    rotate_delta: Vector2<f32>,
    pan_delta: Vector2<f32>,
    zoom_steps: f32,
    drag: Drag,
    shift: bool,
    cursor: Option<PhysicalPosition<f64>>,
    viewport_height: f32,
}

impl OrbitController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            enable_rotate: config.enable_rotate,
            enable_pan: config.enable_pan,
            enable_zoom: config.enable_zoom,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            rotate_delta: Vector2::new(0.0, 0.0),
            pan_delta: Vector2::new(0.0, 0.0),
            zoom_steps: 0.0,
            drag: Drag::None,
            shift: false,
            cursor: None,
            viewport_height: 1.0,
        }
    }

    /// Pointer deltas are measured in physical pixels relative to this height.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    /// Queue a rotation by a pointer movement of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if self.enable_rotate {
            self.rotate_delta += Vector2::new(dx, dy);
        }
    }

    /// Queue a pan by a pointer movement of `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if self.enable_pan {
            self.pan_delta += Vector2::new(dx, dy);
        }
    }

    /// Queue a dolly. Positive steps move towards the target.
    pub fn zoom(&mut self, steps: f32) {
        if self.enable_zoom {
            self.zoom_steps += steps;
        }
    }

    pub fn has_pending_input(&self) -> bool {
        self.rotate_delta != Vector2::new(0.0, 0.0)
            || self.pan_delta != Vector2::new(0.0, 0.0)
            || self.zoom_steps != 0.0
    }

    /// Translate window input into queued motion. Returns true if the event
    /// was consumed by the controls.
    pub fn handle_window_events(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.drag = match (state, button) {
                    (ElementState::Pressed, MouseButton::Left) if self.shift => Drag::Pan,
                    (ElementState::Pressed, MouseButton::Left) => Drag::Rotate,
                    (ElementState::Pressed, MouseButton::Right) => Drag::Pan,
                    (ElementState::Released, _) => Drag::None,
                    _ => self.drag,
                };
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = self.cursor {
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    match self.drag {
                        Drag::Rotate => self.rotate(dx, dy),
                        Drag::Pan => self.pan(dx, dy),
                        Drag::None => (),
                    }
                }
                self.cursor = Some(*position);
                self.drag != Drag::None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = Drag::None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 100.0,
                };
                self.zoom(steps);
                true
            }
            _ => false,
        }
    }

    /// Apply all queued input to the camera. Returns false (and leaves the
    /// camera untouched) when nothing was queued.
    pub fn update(&mut self, camera: &mut Camera, projection: &Projection) -> bool {
        if !self.has_pending_input() {
            return false;
        }
        let full_turn = std::f32::consts::TAU;
        let mut offset = camera.position - camera.target;
        let mut radius = offset.magnitude();

        // spherical coordinates around +Y
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        theta -= full_turn * self.rotate_delta.x / self.viewport_height * self.rotate_speed;
        phi -= full_turn * self.rotate_delta.y / self.viewport_height * self.rotate_speed;
        phi = phi.clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);

        if self.zoom_steps != 0.0 {
            let scale = 0.95f32.powf(self.zoom_speed * self.zoom_steps);
            radius = (radius * scale).clamp(self.min_distance, self.max_distance);
        }

        if self.pan_delta != Vector2::new(0.0, 0.0) {
            let forward = (camera.target - camera.position).normalize();
            let right = forward.cross(Vector3::unit_y()).normalize();
            let up = right.cross(forward);
            // world units covered by one pixel at the target distance
            let per_pixel = 2.0 * offset.magnitude() * (projection.fovy().0 / 2.0).tan()
                / self.viewport_height;
            let shift = right * (-self.pan_delta.x * per_pixel * self.pan_speed)
                + up * (self.pan_delta.y * per_pixel * self.pan_speed);
            camera.target += shift;
        }

        offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.position = camera.target + offset;

        self.rotate_delta = Vector2::new(0.0, 0.0);
        self.pan_delta = Vector2::new(0.0, 0.0);
        self.zoom_steps = 0.0;
        true
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view: Matrix4::identity().into(),
            proj: Matrix4::identity().into(),
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        let view = camera.calc_matrix();
        let proj = projection.calc_matrix();
        self.view = view.into();
        self.proj = proj.into();
        self.view_proj = (proj * view).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU side of the camera: the uniform buffer and its bind group (group 0 of
/// every scene pipeline).
#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, camera: &Camera, projection: &Projection) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(camera, projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue, camera: &Camera, projection: &Projection) {
        self.uniform.update_view_proj(camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
