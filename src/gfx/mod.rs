//! # Graphics Module
//!
//! Camera, geometry construction, GPU resources and rendering for the viewer.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera driven by drag and zoom keys
//! - **Geometry** ([`geometry`]) - Retained mesh builder with transform and material stacks
//! - **Rendering Pipeline** ([`rendering`]) - Solid and line pipelines, frame rendering
//! - **Scene Management** ([`scene`]) - Scene mesh, camera and GPU batches
//! - **Resource Management** ([`resources`]) - Materials, uniforms and the depth buffer
//!
//! The CPU side (camera, geometry, materials) runs without a GPU, so it can
//! be exercised directly:
//!
//! ```rust
//! use sortbin::gfx::scene::Scene;
//! use sortbin::ViewerConfig;
//!
//! let scene = Scene::new(ViewerConfig::default().camera_manager());
//! assert!(scene.mesh.stats().triangles > 0);
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
