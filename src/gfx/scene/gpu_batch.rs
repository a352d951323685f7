use crate::gfx::{
    geometry::{Batch, SceneMesh, Topology},
    resources::material::{MaterialBindings, MaterialUBO},
};

/// One scene batch uploaded to the GPU
pub struct GpuBatch {
    pub topology: Topology,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    _material_ubo: MaterialUBO,
    material_bind_group: wgpu::BindGroup,
}

impl GpuBatch {
    pub fn upload(device: &wgpu::Device, materials: &MaterialBindings, batch: &Batch) -> Self {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Batch Vertex Buffer"),
                contents: bytemuck::cast_slice(&batch.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Batch Index Buffer"),
                contents: bytemuck::cast_slice(&batch.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let (material_ubo, material_bind_group) =
            materials.create_bind_group(device, &batch.material);

        Self {
            topology: batch.topology,
            vertex_buffer,
            index_buffer,
            index_count: batch.indices.len() as u32,
            _material_ubo: material_ubo,
            material_bind_group,
        }
    }

    /// Uploads every batch of `mesh`, keeping their order
    pub fn upload_all(
        device: &wgpu::Device,
        materials: &MaterialBindings,
        mesh: &SceneMesh,
    ) -> Vec<Self> {
        mesh.batches
            .iter()
            .map(|batch| Self::upload(device, materials, batch))
            .collect()
    }
}

pub trait DrawBatch<'a> {
    /// Binds the batch material at `material_slot` and draws its indices
    fn draw_batch(&mut self, batch: &'a GpuBatch, material_slot: u32);
}

impl<'a, 'b> DrawBatch<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_batch(&mut self, batch: &'b GpuBatch, material_slot: u32) {
        self.set_bind_group(material_slot, &batch.material_bind_group, &[]);
        self.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
        self.set_index_buffer(batch.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..batch.index_count, 0, 0..1);
    }
}
