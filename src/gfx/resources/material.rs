//! Material descriptors and color derivation
//!
//! A [`Material`] is a plain value carried alongside every geometry batch.
//! It mirrors the classic fixed-function parameter set (ambient, diffuse,
//! specular, emission, shininess) so the color rules used by the bin
//! builders can be checked without a GPU.

use wgpu::Device;

use crate::wgpu_utils::{binding_types, uniform_buffer::UniformBuffer};

/// Linear RGB triple
pub type Rgb = [f32; 3];

/// Emission used by the symbol glyphs and highlight outlines
pub const GLYPH_EMISSION: Rgb = [0.3, 0.3, 0.3];

pub const WHITE: Rgb = [1.0, 1.0, 1.0];
pub const BLACK: Rgb = [0.0, 0.0, 0.0];

/// Multiplies every channel by `factor`, clamping the result to 1.0
pub fn brighten(color: Rgb, factor: f32) -> Rgb {
    color.map(|c| (c * factor).min(1.0))
}

/// Multiplies every channel by `factor` without clamping
pub fn scale_rgb(color: Rgb, factor: f32) -> Rgb {
    color.map(|c| c * factor)
}

fn rgba(color: Rgb) -> [f32; 4] {
    [color[0], color[1], color[2], 1.0]
}

/// Surface material for one geometry batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    pub shininess: f32,
}

impl Default for Material {
    /// The fixed-function default material
    fn default() -> Self {
        Self {
            ambient: [0.2, 0.2, 0.2, 1.0],
            diffuse: [0.8, 0.8, 0.8, 1.0],
            specular: [0.0, 0.0, 0.0, 1.0],
            emission: [0.0, 0.0, 0.0, 1.0],
            shininess: 0.0,
        }
    }
}

impl Material {
    /// Material whose ambient is 60% of the diffuse color
    ///
    /// This is the shading convention every bin part starts from.
    pub fn shaded(color: Rgb) -> Self {
        Self {
            ambient: rgba(scale_rgb(color, 0.6)),
            diffuse: rgba(color),
            ..Default::default()
        }
    }

    /// Material with identical ambient and diffuse color
    pub fn flat(color: Rgb) -> Self {
        Self {
            ambient: rgba(color),
            diffuse: rgba(color),
            ..Default::default()
        }
    }

    /// White glyph material that stays visible regardless of lighting
    pub fn glyph() -> Self {
        Self::flat(WHITE).with_emission(GLYPH_EMISSION)
    }

    pub fn with_ambient(mut self, color: Rgb) -> Self {
        self.ambient = rgba(color);
        self
    }

    pub fn with_diffuse(mut self, color: Rgb) -> Self {
        self.diffuse = rgba(color);
        self
    }

    pub fn with_specular(mut self, level: f32) -> Self {
        self.specular = [level, level, level, 1.0];
        self
    }

    pub fn with_emission(mut self, color: Rgb) -> Self {
        self.emission = rgba(color);
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Returns true if this material emits light of its own
    pub fn is_emissive(&self) -> bool {
        self.emission[..3].iter().any(|&c| c > 0.0)
    }

    pub fn diffuse_rgb(&self) -> Rgb {
        [self.diffuse[0], self.diffuse[1], self.diffuse[2]]
    }

    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            ambient: self.ambient,
            diffuse: self.diffuse,
            specular: self.specular,
            emission: self.emission,
            shininess: self.shininess,
            _padding: [0.0; 3],
        }
    }
}

/// GPU uniform data for materials
///
/// Must match the `Material` struct in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    pub shininess: f32,
    _padding: [f32; 3],
}

pub type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Bind group layout shared by every batch material (group 1)
pub struct MaterialBindings {
    bind_group_layout: wgpu::BindGroupLayout,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });

        Self { bind_group_layout }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Uploads `material` and returns its buffer together with a bind group
    pub fn create_bind_group(
        &self,
        device: &Device,
        material: &Material,
    ) -> (MaterialUBO, wgpu::BindGroup) {
        let ubo = MaterialUBO::new_with_data(device, &material.to_uniform());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Material Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });
        (ubo, bind_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brighten_clamps_each_channel() {
        let c = brighten([0.7, 0.2, 0.667], 1.5);
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 0.3).abs() < 1e-6);
        assert_eq!(c[2], 1.0);
    }

    #[test]
    fn test_brighten_is_idempotent_once_saturated() {
        for i in 0..=100 {
            let v = 0.667 + i as f32 * (0.333 / 100.0);
            assert_eq!(brighten([v; 3], 1.5), [1.0; 3]);
            assert_eq!(brighten(brighten([v; 3], 1.5), 1.5), [1.0; 3]);
        }
    }

    #[test]
    fn test_shaded_material() {
        let m = Material::shaded([1.0, 0.5, 0.0]);
        assert_eq!(m.diffuse, [1.0, 0.5, 0.0, 1.0]);
        assert!((m.ambient[0] - 0.6).abs() < 1e-6);
        assert!((m.ambient[1] - 0.3).abs() < 1e-6);
        assert!(!m.is_emissive());
    }

    #[test]
    fn test_glyph_material_is_emissive() {
        let m = Material::glyph();
        assert!(m.is_emissive());
        assert_eq!(m.diffuse_rgb(), WHITE);
    }

    #[test]
    fn test_uniform_layout_size() {
        // 4 vec4 + shininess padded to 16 bytes
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 80);
    }
}
