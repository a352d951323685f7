//! Global uniform bindings for camera and scene data
//!
//! Manages the uniform buffer and bind group for per-frame state shared by
//! every batch in the scene: camera matrices, the two scene lights and the
//! global ambient term. Bound to slot 0 in all render pipelines.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Number of point lights in the scene
pub const LIGHT_COUNT: usize = 2;

/// One point light as seen by the shader
///
/// MUST match the Light struct in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

/// Global uniform buffer content structure
///
/// MUST match the Globals struct in `shader.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    // Camera data (matches CameraUniform)
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],

    lights: [LightUniform; LIGHT_COUNT],
    scene_ambient: [f32; 4],
}
// Total: 16 + 64 + 2 * 64 + 16 = 224 bytes

/// Point light configuration in world space
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl LightConfig {
    fn to_uniform(self) -> LightUniform {
        let grey = |v: f32| [v, v, v, 1.0];
        LightUniform {
            position: [self.position[0], self.position[1], self.position[2], 1.0],
            ambient: grey(self.ambient),
            diffuse: grey(self.diffuse),
            specular: grey(self.specular),
        }
    }
}

/// The lights and ambient level used for the bin scene
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lighting {
    pub lights: [LightConfig; LIGHT_COUNT],
    pub scene_ambient: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            lights: [
                // Key light, above and in front
                LightConfig {
                    position: [-5.0, 15.0, 10.0],
                    ambient: 0.2,
                    diffuse: 0.7,
                    specular: 1.0,
                },
                // Fill light from the opposite side
                LightConfig {
                    position: [10.0, 10.0, -5.0],
                    ambient: 0.1,
                    diffuse: 0.3,
                    specular: 0.0,
                },
            ],
            scene_ambient: 0.2,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

pub fn global_content(camera: CameraUniform, lighting: &Lighting) -> GlobalUBOContent {
    let a = lighting.scene_ambient;
    GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        lights: lighting.lights.map(LightConfig::to_uniform),
        scene_ambient: [a, a, a, 1.0],
    }
}

/// Updates the global uniform buffer with new camera data and the given lighting
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: &Lighting,
) {
    ubo.update_content(queue, global_content(camera, lighting));
}

/// Manages bind group layouts and bind groups for global uniforms
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    /// Creates the layout and the bind group for `ubo`
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[binding_types::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_content_size() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 224);
    }

    #[test]
    fn test_default_lighting() {
        let content = global_content(CameraUniform::default(), &Lighting::default());
        assert_eq!(content.lights[0].position, [-5.0, 15.0, 10.0, 1.0]);
        assert_eq!(content.lights[0].specular, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(content.lights[1].diffuse, [0.3, 0.3, 0.3, 1.0]);
        assert_eq!(content.lights[1].specular, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(content.scene_ambient, [0.2, 0.2, 0.2, 1.0]);
    }
}
