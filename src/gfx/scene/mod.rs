//! # Scene Management Module
//!
//! The scene owns the retained bin geometry and the orbit camera. GPU copies
//! of the geometry live in [`GpuBatch`]es owned by the render engine.
//!
//! ## Key Components
//!
//! - [`Scene`] - camera manager plus the built [`SceneMesh`](crate::gfx::geometry::SceneMesh)
//! - [`GpuBatch`] - one uploaded batch with its material bind group
//! - [`Vertex3D`] - vertex layout shared by both pipelines

pub mod gpu_batch;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use gpu_batch::{DrawBatch, GpuBatch};
pub use scene::Scene;
pub use vertex::Vertex3D;
