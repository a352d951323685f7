//! Viewer configuration
//!
//! Every field has a default matching the stock viewer; builder methods
//! override individual values.

use cgmath::Vector3;

use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera, OrbitCameraBounds};

pub const DEFAULT_TITLE: &str = "Smart Waste Management - Unified Sorting Bin (Mouse + Keyboard Zoom)";

/// Controls help printed once at startup
pub const CONTROLS_HELP: &str = "\
Controls:
Left mouse drag: Orbit camera
+: Zoom in
-: Zoom out
ESC: Exit";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial window size in logical pixels
    pub window_size: (u32, u32),
    pub clear_color: [f64; 3],
    /// Initial camera yaw in degrees
    pub yaw: f32,
    /// Initial camera pitch in degrees
    pub pitch: f32,
    pub distance: f32,
    pub look_at: [f32; 3],
    pub bounds: OrbitCameraBounds,
    /// Degrees of rotation per dragged pixel
    pub rotate_speed: f32,
    pub zoom_step: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            window_size: (800, 600),
            clear_color: [0.8, 0.8, 0.9],
            yaw: 0.0,
            pitch: 20.0,
            distance: 20.0,
            look_at: [0.0, 2.0, 0.0],
            bounds: OrbitCameraBounds::default(),
            rotate_speed: 0.5,
            zoom_step: 1.0,
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_clear_color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.clear_color = [r, g, b];
        self
    }

    /// Sets the initial orbit, angles in degrees
    pub fn with_camera(mut self, yaw: f32, pitch: f32, distance: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.distance = distance;
        self
    }

    pub fn with_bounds(mut self, bounds: OrbitCameraBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_rotate_speed(mut self, degrees_per_pixel: f32) -> Self {
        self.rotate_speed = degrees_per_pixel;
        self
    }

    pub fn with_zoom_step(mut self, step: f32) -> Self {
        self.zoom_step = step;
        self
    }

    pub fn aspect(&self) -> f32 {
        let (w, h) = self.window_size;
        w as f32 / h.max(1) as f32
    }

    /// Builds the camera and its controller from this configuration
    pub fn camera_manager(&self) -> CameraManager {
        let camera = OrbitCamera::with_bounds(
            self.distance,
            self.pitch,
            self.yaw,
            Vector3::from(self.look_at),
            self.aspect(),
            self.bounds,
        );
        let controller = CameraController::new(self.rotate_speed, self.zoom_step);
        CameraManager::new(camera, controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_viewer() {
        let config = ViewerConfig::default();
        assert_eq!(config.window_size, (800, 600));
        let manager = config.camera_manager();
        assert_eq!(manager.camera.distance, 20.0);
        assert_eq!(manager.camera.pitch, 20.0);
        assert_eq!(manager.camera.target, Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(manager.camera.fovy, cgmath::Deg(45.0));
    }

    #[test]
    fn test_initial_camera_respects_bounds() {
        let manager = ViewerConfig::default()
            .with_camera(10.0, 120.0, 200.0)
            .camera_manager();
        assert_eq!(manager.camera.pitch, 89.0);
        assert_eq!(manager.camera.distance, 50.0);
        assert_eq!(manager.camera.yaw, 10.0);
    }

    #[test]
    fn test_help_text_lists_every_control() {
        for needle in ["Left mouse drag", "+: Zoom in", "-: Zoom out", "ESC: Exit"] {
            assert!(CONTROLS_HELP.contains(needle));
        }
    }
}
