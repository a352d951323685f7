use crate::{
    gfx::{camera::camera_utils::CameraManager, geometry::SceneMesh},
    waste_bin::build_scene_mesh,
};

/// Main scene: the pre-built bin geometry and the camera looking at it
pub struct Scene {
    pub camera_manager: CameraManager,
    pub mesh: SceneMesh,
}

impl Scene {
    /// Creates a scene holding the sorting bin
    pub fn new(camera_manager: CameraManager) -> Self {
        Self::with_mesh(camera_manager, build_scene_mesh())
    }

    pub fn with_mesh(camera_manager: CameraManager, mesh: SceneMesh) -> Self {
        Self {
            camera_manager,
            mesh,
        }
    }

    /// Updates the scene (camera matrices)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;

    #[test]
    fn test_scene_holds_bin_mesh() {
        let scene = Scene::new(ViewerConfig::default().camera_manager());
        let stats = scene.mesh.stats();
        assert!(stats.batches > 10);
        assert!(stats.triangles > 0 && stats.lines > 0);
    }
}
