//! Error types for the viewer
//!
//! Geometry construction and drawing never fail. Everything here comes from
//! bringing up the window and the graphics context.

use thiserror::Error;

/// Errors raised while starting or running the viewer
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("shader '{0}' has not been loaded")]
    UnknownShader(String),

    #[error("pipeline '{0}' has not been registered")]
    UnknownPipeline(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
