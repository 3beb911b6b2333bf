use approx::assert_relative_eq;
use eclipse_ngin::{config::SceneConfig, scene::SceneState, viewport::Viewport};
use winit::dpi::PhysicalSize;

#[test]
fn aspect_comes_from_the_logical_size() {
    let viewport = Viewport::new(800.0, 600.0, 1.0).unwrap();
    assert_relative_eq!(viewport.aspect(), 4.0 / 3.0);
    assert_eq!(viewport.pixel_size(), (800, 600));
}

#[test]
fn resizing_keeps_proportions() {
    let config = SceneConfig::default();
    let mut scene = SceneState::new(&config, &Viewport::new(800.0, 600.0, 1.0).unwrap());
    let smaller = Viewport::new(400.0, 300.0, 1.0).unwrap();
    scene.resize(&smaller);

    assert_relative_eq!(scene.projection.aspect(), 4.0 / 3.0);
    assert_eq!(smaller.pixel_size(), (400, 300));
}

#[test]
fn buffers_scale_with_the_pixel_ratio() {
    let viewport = Viewport::new(800.0, 600.0, 2.0).unwrap();
    assert_eq!(viewport.pixel_ratio(), 2.0);
    assert_eq!(viewport.pixel_size(), (1600, 1200));
    assert_relative_eq!(viewport.aspect(), 4.0 / 3.0);
}

#[test]
fn zero_sized_containers_have_no_viewport() {
    assert!(Viewport::new(0.0, 600.0, 1.0).is_none());
    assert!(Viewport::new(800.0, 0.0, 1.0).is_none());
    assert!(Viewport::from_physical(PhysicalSize::new(0, 0), 1.0).is_none());
}

#[test]
fn physical_window_size_maps_back_to_logical() {
    let viewport = Viewport::from_physical(PhysicalSize::new(1920, 1080), 1.5).unwrap();
    assert_relative_eq!(viewport.width(), 1280.0);
    assert_relative_eq!(viewport.height(), 720.0);
    assert_relative_eq!(viewport.pixel_ratio(), 1.5);
    assert_eq!(viewport.pixel_size(), (1920, 1080));
}
