//! WGPU-based rendering engine for the sorting bin viewer
//!
//! Owns the surface, device and depth buffer, creates the solid and line
//! pipelines, uploads the scene mesh once and redraws it each frame.

use std::sync::Arc;

use crate::{
    error::{Result, ViewerError},
    gfx::{
        camera::camera_utils::CameraUniform,
        geometry::{SceneMesh, Topology},
        resources::{
            global_bindings::{global_content, update_global_ubo, GlobalBindings, GlobalUBO, Lighting},
            material::MaterialBindings,
            texture_resource::TextureResource,
        },
        scene::gpu_batch::{DrawBatch, GpuBatch},
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SHADER: &str = "shader.wgsl";
const SOLID_PIPELINE: &str = "Solid";
const LINE_PIPELINE: &str = "Lines";

const GLOBAL_SLOT: u32 = 0;
const MATERIAL_SLOT: u32 = 1;

/// What the caller should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The frame was dropped and the surface reconfigured or left alone
    Skipped,
    /// The GPU is out of memory; rendering cannot continue
    Fatal,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    clear_color: wgpu::Color,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    material_bindings: MaterialBindings,
    lighting: Lighting,
    batches: Vec<GpuBatch>,
}

impl RenderEngine {
    /// Creates the rendering engine for `window`
    ///
    /// Fails when no adapter or device is available or the surface reports no
    /// usable format.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: [f64; 3],
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(ViewerError::NoSurfaceFormat)?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let lighting = Lighting::default();
        let global_ubo =
            GlobalUBO::new_with_data(&device, &global_content(CameraUniform::default(), &lighting));
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let material_bindings = MaterialBindings::new(&device);

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader(SHADER, include_str!("shader.wgsl"));

        let layouts = vec![
            global_bindings.bind_group_layout().clone(),
            material_bindings.bind_group_layout().clone(),
        ];
        let base = PipelineConfig::default_with_shader(SHADER)
            .with_bind_group_layouts(layouts)
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .with_color_format(format)
            .with_cull_mode(None);

        pipeline_manager.register_pipeline(
            SOLID_PIPELINE,
            base.clone()
                .with_label("Solid Pipeline")
                .with_primitive_topology(wgpu::PrimitiveTopology::TriangleList),
        );
        pipeline_manager.register_pipeline(
            LINE_PIPELINE,
            base.with_label("Line Pipeline")
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList),
        );
        pipeline_manager.create_all_pipelines()?;
        for name in [SOLID_PIPELINE, LINE_PIPELINE] {
            if pipeline_manager.pipeline(name).is_none() {
                return Err(ViewerError::UnknownPipeline(name.to_string()));
            }
        }

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            clear_color: wgpu::Color {
                r: clear_color[0],
                g: clear_color[1],
                b: clear_color[2],
                a: 1.0,
            },
            pipeline_manager,
            global_ubo,
            global_bindings,
            material_bindings,
            lighting,
            batches: Vec::new(),
        })
    }

    /// Uploads the scene geometry, replacing anything uploaded before
    pub fn upload_mesh(&mut self, mesh: &SceneMesh) {
        self.batches = GpuBatch::upload_all(&self.device, &self.material_bindings, mesh);
        log::debug!("Uploaded {} batches", self.batches.len());
    }

    /// Renders the uploaded scene
    pub fn render_frame(&mut self) -> FrameOutcome {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return FrameOutcome::Skipped;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
                return FrameOutcome::Fatal;
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return FrameOutcome::Skipped;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(GLOBAL_SLOT, self.global_bindings.bind_group(), &[]);

            let solid = self.pipeline_manager.pipeline(SOLID_PIPELINE);
            let lines = self.pipeline_manager.pipeline(LINE_PIPELINE);

            // Batches keep emission order so later layers win depth ties
            let mut bound = None;
            for batch in &self.batches {
                let pipeline = match batch.topology {
                    Topology::Triangles => solid,
                    Topology::Lines => lines,
                };
                let Some(pipeline) = pipeline else {
                    continue;
                };
                if bound != Some(batch.topology) {
                    render_pass.set_pipeline(pipeline);
                    bound = Some(batch.topology);
                }
                render_pass.draw_batch(batch, MATERIAL_SLOT);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        FrameOutcome::Presented
    }

    /// Writes the camera into the global uniform buffer
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, &self.lighting);
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimised window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }
}
