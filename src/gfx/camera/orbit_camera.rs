use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Camera orbiting a fixed target on a sphere
///
/// Angles are kept in degrees. Yaw is unbounded and wraps through the
/// trigonometric functions; pitch and distance are clamped to [`OrbitCameraBounds`].
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    /// Creates a camera looking at `target`; `yaw` and `pitch` are in degrees
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        Self::with_bounds(distance, pitch, yaw, target, aspect, OrbitCameraBounds::default())
    }

    pub fn with_bounds(
        distance: f32,
        pitch: f32,
        yaw: f32,
        target: Vector3<f32>,
        aspect: f32,
        bounds: OrbitCameraBounds,
    ) -> Self {
        let mut camera = Self {
            distance: bounds.clamp_distance(distance),
            pitch: bounds.clamp_pitch(pitch),
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds,
            aspect,
            fovy: Deg(45.0),
            znear: 0.1,
            zfar: 100.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = self.bounds.clamp_distance(distance);
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = self.bounds.clamp_pitch(pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 50.0,
            min_pitch: -89.0,
            max_pitch: 89.0,
        }
    }
}

impl OrbitCameraBounds {
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.min_pitch, self.max_pitch)
    }
}

/// Spherical to Cartesian, angles in degrees
pub fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    let (pitch, yaw) = (pitch.to_radians(), yaw.to_radians());
    Vector3::new(
        distance * pitch.cos() * yaw.sin(),
        distance * pitch.sin(),
        distance * pitch.cos() * yaw.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(20.0, 0.0, 0.0, Vector3::new(0.0, 2.0, 0.0), 800.0 / 600.0)
    }

    #[test]
    fn test_eye_on_positive_z_at_zero_angles() {
        let cam = camera();
        assert!((cam.eye - Vector3::new(0.0, 2.0, 20.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_yaw_ninety_moves_eye_to_positive_x() {
        let mut cam = camera();
        cam.set_yaw(90.0);
        assert!((cam.eye - Vector3::new(20.0, 2.0, 0.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_pitch_and_distance_are_clamped() {
        let mut cam = camera();
        cam.add_pitch(500.0);
        assert_eq!(cam.pitch, 89.0);
        cam.add_pitch(-1000.0);
        assert_eq!(cam.pitch, -89.0);
        cam.set_distance(1.0);
        assert_eq!(cam.distance, 5.0);
        cam.set_distance(80.0);
        assert_eq!(cam.distance, 50.0);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut cam = camera();
        cam.add_yaw(720.0 + 45.0);
        assert_eq!(cam.yaw, 765.0);
        let mut reference = camera();
        reference.set_yaw(45.0);
        assert!((cam.eye - reference.eye).magnitude() < 1e-3);
    }

    #[test]
    fn test_resize_projection_tracks_aspect() {
        let mut cam = camera();
        cam.resize_projection(1600, 900);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);

        // Minimised window
        cam.resize_projection(800, 0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        assert!(cam.aspect.is_finite());

        cam.update_view_proj();
        let view_proj = Matrix4::from(cam.uniform.view_proj);
        let clip = view_proj * Vector4::new(0.0, 2.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn test_view_projection_maps_target_to_screen_center() {
        let mut cam = camera();
        cam.update_view_proj();
        let clip = cam.build_view_projection_matrix() * Vector4::new(0.0, 2.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
        assert_eq!(cam.uniform.view_position, [cam.eye.x, cam.eye.y, cam.eye.z, 1.0]);
    }
}
