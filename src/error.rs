//! Error types
//!
//! Startup failures are fatal and bubble up to the entry point. Render
//! failures are per-frame and the loop keeps going.

use thiserror::Error;

/// Anything that stops the game from starting
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("canvas element '{0}' not found")]
    CanvasNotFound(String),

    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),

    /// The canvas refused to hand out a drawing context
    #[error("render context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("failed to load sound '{url}': {reason}")]
    SoundLoad { url: String, reason: String },

    #[error("WebGPU initialization failed: {0}")]
    Gpu(String),
}

/// Per-frame render failures
#[derive(Error, Debug)]
pub enum RenderError {
    /// Surface must be reconfigured before the next frame
    #[error("render surface lost")]
    SurfaceLost,

    #[error("out of GPU memory")]
    OutOfMemory,

    #[error("render backend error: {0}")]
    Backend(String),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Backend(other.to_string()),
        }
    }
}

/// Stored settings could not be read
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),
}
