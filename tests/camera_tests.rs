use cgmath::Vector3;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton},
    keyboard::Key,
};

use sortbin::{
    gfx::camera::{orbit_camera::calculate_cartesian_eye_position, CameraController, OrbitCamera},
    ViewerConfig,
};

fn press(controller: &mut CameraController, camera: &mut OrbitCamera, key: &str) {
    controller.process_key(&Key::Character(key.into()), ElementState::Pressed, camera);
}

#[test]
fn test_drag_then_zoom_scenario() {
    let manager = ViewerConfig::default().camera_manager();
    let mut camera = manager.camera;
    let mut controller = manager.controller;
    assert_eq!(camera.yaw, 0.0);

    controller.process_cursor_moved(PhysicalPosition::new(200.0, 300.0), &mut camera);
    controller.process_mouse_button(ElementState::Pressed, MouseButton::Left);
    controller.process_cursor_moved(PhysicalPosition::new(300.0, 300.0), &mut camera);
    controller.process_mouse_button(ElementState::Released, MouseButton::Left);
    assert_eq!(camera.yaw, 50.0);
    assert_eq!(camera.pitch, 20.0);

    for _ in 0..10 {
        press(&mut controller, &mut camera, "-");
    }
    assert_eq!(camera.distance, 30.0);

    for _ in 0..25 {
        press(&mut controller, &mut camera, "-");
    }
    assert_eq!(camera.distance, 50.0);
}

#[test]
fn test_pitch_clamp_law() {
    let mut camera = OrbitCamera::new(20.0, 20.0, 0.0, Vector3::new(0.0, 2.0, 0.0), 1.0);
    let mut controller = CameraController::new(0.5, 1.0);
    controller.process_cursor_moved(PhysicalPosition::new(0.0, 0.0), &mut camera);
    controller.process_mouse_button(ElementState::Pressed, MouseButton::Left);

    let mut y = 0.0;
    let mut seed = 7u32;
    for _ in 0..200 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        y += (seed % 801) as f64 - 400.0;
        controller.process_cursor_moved(PhysicalPosition::new(0.0, y), &mut camera);
        assert!((-89.0..=89.0).contains(&camera.pitch));
    }
}

#[test]
fn test_zoom_clamp_law() {
    let mut camera = OrbitCamera::new(20.0, 20.0, 0.0, Vector3::new(0.0, 2.0, 0.0), 1.0);
    let mut controller = CameraController::new(0.5, 1.0);
    let runs = [("+", 30), ("-", 70), ("=", 12), ("_", 3), ("+", 60)];
    for (key, count) in runs {
        for _ in 0..count {
            press(&mut controller, &mut camera, key);
            assert!((5.0..=50.0).contains(&camera.distance));
        }
    }
    assert_eq!(camera.distance, 5.0);
}

#[test]
fn test_eye_on_positive_z_at_rest() {
    let eye = calculate_cartesian_eye_position(0.0, 0.0, 20.0, Vector3::new(0.0, 2.0, 0.0));
    assert!((eye.x - 0.0).abs() < 1e-5);
    assert!((eye.y - 2.0).abs() < 1e-5);
    assert!((eye.z - 20.0).abs() < 1e-5);
}
