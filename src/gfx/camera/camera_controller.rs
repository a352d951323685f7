use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{Key, NamedKey},
};

use super::orbit_camera::OrbitCamera;

/// What the application should do after the controller saw an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerResponse {
    /// Nothing visible changed
    Ignored,
    /// Camera state changed, request a redraw
    Redraw,
    /// The user asked to quit
    Exit,
}

/// Translates mouse drags and zoom keys into orbit camera motion
///
/// Left button down enters the dragging state; releasing any button returns
/// to idle. The cursor position is tracked on every motion event so the
/// first drag delta is measured from where the button went down.
pub struct CameraController {
    /// Degrees of yaw/pitch per pixel of drag
    pub rotate_speed: f32,
    /// Distance change per zoom key press
    pub zoom_step: f32,
    last_cursor: Option<PhysicalPosition<f64>>,
    pressed_button: Option<MouseButton>,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_step: f32) -> Self {
        Self {
            rotate_speed,
            zoom_step,
            last_cursor: None,
            pressed_button: None,
        }
    }

    /// Returns true while the left button is held
    pub fn is_dragging(&self) -> bool {
        self.pressed_button == Some(MouseButton::Left)
    }

    pub fn process_window_event(
        &mut self,
        event: &WindowEvent,
        camera: &mut OrbitCamera,
    ) -> ControllerResponse {
        match event {
            WindowEvent::MouseInput { state, button, .. } => self.process_mouse_button(*state, *button),
            WindowEvent::CursorMoved { position, .. } => self.process_cursor_moved(*position, camera),
            WindowEvent::CursorLeft { .. } => self.process_cursor_left(),
            WindowEvent::KeyboardInput { event, .. } => {
                self.process_key(&event.logical_key, event.state, camera)
            }
            _ => ControllerResponse::Ignored,
        }
    }

    pub fn process_mouse_button(
        &mut self,
        state: ElementState,
        button: MouseButton,
    ) -> ControllerResponse {
        self.pressed_button = match state {
            ElementState::Pressed => Some(button),
            ElementState::Released => None,
        };
        ControllerResponse::Ignored
    }

    /// Forgets the cursor position so re-entry does not count as a drag delta
    pub fn process_cursor_left(&mut self) -> ControllerResponse {
        self.last_cursor = None;
        ControllerResponse::Ignored
    }

    pub fn process_cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        camera: &mut OrbitCamera,
    ) -> ControllerResponse {
        let previous = self.last_cursor.replace(position);

        let Some(previous) = previous else {
            return ControllerResponse::Ignored;
        };
        if !self.is_dragging() {
            return ControllerResponse::Ignored;
        }

        let dx = (position.x - previous.x) as f32;
        let dy = (position.y - previous.y) as f32;
        camera.add_yaw(dx * self.rotate_speed);
        camera.add_pitch(dy * self.rotate_speed);
        ControllerResponse::Redraw
    }

    pub fn process_key(
        &mut self,
        key: &Key,
        state: ElementState,
        camera: &mut OrbitCamera,
    ) -> ControllerResponse {
        if state != ElementState::Pressed {
            return ControllerResponse::Ignored;
        }

        match key {
            Key::Named(NamedKey::Escape) => ControllerResponse::Exit,
            Key::Character(c) => match c.as_str() {
                "+" | "=" => {
                    camera.add_distance(-self.zoom_step);
                    ControllerResponse::Redraw
                }
                "-" | "_" => {
                    camera.add_distance(self.zoom_step);
                    ControllerResponse::Redraw
                }
                _ => ControllerResponse::Ignored,
            },
            _ => ControllerResponse::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn setup() -> (CameraController, OrbitCamera) {
        let camera = OrbitCamera::new(20.0, 20.0, 0.0, Vector3::new(0.0, 2.0, 0.0), 1.0);
        (CameraController::new(0.5, 1.0), camera)
    }

    fn press(controller: &mut CameraController, camera: &mut OrbitCamera, key: &str) -> ControllerResponse {
        controller.process_key(&Key::Character(key.into()), ElementState::Pressed, camera)
    }

    #[test]
    fn test_left_drag_orbits() {
        let (mut controller, mut camera) = setup();
        controller.process_cursor_moved(PhysicalPosition::new(100.0, 100.0), &mut camera);
        controller.process_mouse_button(ElementState::Pressed, MouseButton::Left);
        assert!(controller.is_dragging());

        let response = controller.process_cursor_moved(PhysicalPosition::new(200.0, 110.0), &mut camera);
        assert_eq!(response, ControllerResponse::Redraw);
        assert_eq!(camera.yaw, 50.0);
        assert_eq!(camera.pitch, 25.0);
    }

    #[test]
    fn test_motion_without_left_button_does_not_orbit() {
        let (mut controller, mut camera) = setup();
        controller.process_cursor_moved(PhysicalPosition::new(0.0, 0.0), &mut camera);
        assert_eq!(
            controller.process_cursor_moved(PhysicalPosition::new(50.0, 50.0), &mut camera),
            ControllerResponse::Ignored
        );

        controller.process_mouse_button(ElementState::Pressed, MouseButton::Right);
        controller.process_cursor_moved(PhysicalPosition::new(90.0, 90.0), &mut camera);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 20.0);
    }

    #[test]
    fn test_release_returns_to_idle() {
        let (mut controller, mut camera) = setup();
        controller.process_cursor_moved(PhysicalPosition::new(0.0, 0.0), &mut camera);
        controller.process_mouse_button(ElementState::Pressed, MouseButton::Left);
        controller.process_mouse_button(ElementState::Released, MouseButton::Left);
        assert!(!controller.is_dragging());
        controller.process_cursor_moved(PhysicalPosition::new(40.0, 0.0), &mut camera);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_reentering_window_does_not_jump() {
        let (mut controller, mut camera) = setup();
        controller.process_cursor_moved(PhysicalPosition::new(100.0, 100.0), &mut camera);
        controller.process_mouse_button(ElementState::Pressed, MouseButton::Left);
        controller.process_cursor_left();

        // Comes back on the far side with the button still held
        let response = controller.process_cursor_moved(PhysicalPosition::new(700.0, 500.0), &mut camera);
        assert_eq!(response, ControllerResponse::Ignored);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 20.0);

        controller.process_cursor_moved(PhysicalPosition::new(710.0, 500.0), &mut camera);
        assert_eq!(camera.yaw, 5.0);
    }

    #[test]
    fn test_first_motion_after_press_uses_press_position() {
        let (mut controller, mut camera) = setup();
        controller.process_cursor_moved(PhysicalPosition::new(300.0, 300.0), &mut camera);
        controller.process_mouse_button(ElementState::Pressed, MouseButton::Left);
        controller.process_cursor_moved(PhysicalPosition::new(302.0, 300.0), &mut camera);
        assert_eq!(camera.yaw, 1.0);
    }

    #[test]
    fn test_drag_pitch_stays_clamped() {
        let (mut controller, mut camera) = setup();
        controller.process_cursor_moved(PhysicalPosition::new(0.0, 0.0), &mut camera);
        controller.process_mouse_button(ElementState::Pressed, MouseButton::Left);
        let mut y = 0.0;
        for step in [400.0, -900.0, 37.0, 1000.0, -5000.0] {
            y += step;
            controller.process_cursor_moved(PhysicalPosition::new(0.0, y), &mut camera);
            assert!((-89.0..=89.0).contains(&camera.pitch));
        }
        assert_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn test_zoom_keys() {
        let (mut controller, mut camera) = setup();
        assert_eq!(press(&mut controller, &mut camera, "+"), ControllerResponse::Redraw);
        assert_eq!(camera.distance, 19.0);
        press(&mut controller, &mut camera, "=");
        assert_eq!(camera.distance, 18.0);
        press(&mut controller, &mut camera, "-");
        press(&mut controller, &mut camera, "_");
        assert_eq!(camera.distance, 20.0);

        for _ in 0..40 {
            press(&mut controller, &mut camera, "+");
        }
        assert_eq!(camera.distance, 5.0);
    }

    #[test]
    fn test_key_release_and_other_keys_are_ignored() {
        let (mut controller, mut camera) = setup();
        let response =
            controller.process_key(&Key::Character("+".into()), ElementState::Released, &mut camera);
        assert_eq!(response, ControllerResponse::Ignored);
        assert_eq!(press(&mut controller, &mut camera, "q"), ControllerResponse::Ignored);
        assert_eq!(camera.distance, 20.0);
    }

    #[test]
    fn test_escape_requests_exit() {
        let (mut controller, mut camera) = setup();
        let response = controller.process_key(
            &Key::Named(NamedKey::Escape),
            ElementState::Pressed,
            &mut camera,
        );
        assert_eq!(response, ControllerResponse::Exit);
    }
}
