// src/lib.rs
//! Sorting bin viewer
//!
//! An interactive 3D view of a three-compartment waste-sorting bin. The bin
//! is built once from procedural geometry and drawn with wgpu in a winit
//! window; the mouse orbits the camera and the keyboard zooms.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod waste_bin;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::SortBinApp;
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};

/// Runs the viewer with the default configuration
pub fn run() -> Result<()> {
    SortBinApp::new(ViewerConfig::default())?.run()
}
