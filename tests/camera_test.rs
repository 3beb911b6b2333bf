use approx::assert_relative_eq;
use cgmath::{Deg, Point3};
use eclipse_ngin::{
    camera::{Camera, OrbitController, Projection},
    config::CameraConfig,
};

fn setup() -> (Camera, Projection, OrbitController) {
    let config = CameraConfig::default();
    let camera = Camera::from(&config);
    let projection = Projection::new(800, 600, Deg(config.fov_deg), config.near, config.far);
    let mut controller = OrbitController::new(&config);
    controller.set_viewport_height(600);
    (camera, projection, controller)
}

#[test]
fn no_input_leaves_the_camera_alone() {
    let (mut camera, projection, mut controller) = setup();
    let before = camera;
    assert!(!controller.update(&mut camera, &projection));
    assert_eq!(camera, before);
}

#[test]
fn rotation_orbits_at_constant_distance() {
    let (mut camera, projection, mut controller) = setup();
    let distance = camera.distance();
    let before = camera.position;

    controller.rotate(150.0, 40.0);
    assert!(controller.update(&mut camera, &projection));

    assert_ne!(camera.position, before);
    assert_eq!(camera.target, Point3::new(0.0, 0.0, 0.0));
    assert_relative_eq!(camera.distance(), distance, epsilon = 1e-4);
    assert!(!controller.has_pending_input());
}

#[test]
fn zoom_dollies_towards_the_target() {
    let (mut camera, projection, mut controller) = setup();
    let distance = camera.distance();

    controller.zoom(1.0);
    controller.update(&mut camera, &projection);
    assert_relative_eq!(camera.distance(), distance * 0.95, epsilon = 1e-4);

    controller.zoom(-2.0);
    controller.update(&mut camera, &projection);
    assert!(camera.distance() > distance);
}

#[test]
fn zoom_respects_distance_limits() {
    let (mut camera, projection, mut controller) = setup();
    controller.min_distance = 2.0;
    controller.zoom(500.0);
    controller.update(&mut camera, &projection);
    assert_relative_eq!(camera.distance(), 2.0, epsilon = 1e-4);
}

#[test]
fn pan_moves_camera_and_target_together() {
    let (mut camera, projection, mut controller) = setup();
    let offset = camera.position - camera.target;

    controller.pan(60.0, -20.0);
    controller.update(&mut camera, &projection);

    assert_ne!(camera.target, Point3::new(0.0, 0.0, 0.0));
    let moved = camera.position - camera.target;
    assert_relative_eq!(moved.x, offset.x, epsilon = 1e-4);
    assert_relative_eq!(moved.y, offset.y, epsilon = 1e-4);
    assert_relative_eq!(moved.z, offset.z, epsilon = 1e-4);
}

#[test]
fn disabled_controls_ignore_input() {
    let config = CameraConfig {
        enable_rotate: false,
        enable_pan: false,
        enable_zoom: false,
        ..CameraConfig::default()
    };
    let mut camera = Camera::from(&config);
    let projection = Projection::new(800, 600, Deg(config.fov_deg), config.near, config.far);
    let mut controller = OrbitController::new(&config);
    let before = camera;

    controller.rotate(100.0, 100.0);
    controller.pan(100.0, 100.0);
    controller.zoom(3.0);

    assert!(!controller.has_pending_input());
    assert!(!controller.update(&mut camera, &projection));
    assert_eq!(camera, before);
}

#[test]
fn projection_tracks_aspect() {
    let (_, mut projection, _) = setup();
    assert_relative_eq!(projection.aspect(), 800.0 / 600.0);
    projection.set_aspect(1.0);
    assert_relative_eq!(projection.aspect(), 1.0);
    projection.set_aspect(f32::INFINITY);
    projection.set_aspect(0.0);
    assert_relative_eq!(projection.aspect(), 1.0);
}
