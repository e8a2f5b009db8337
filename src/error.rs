//! Error types for scene rendering.
//!
//! Numeric problems (degenerate faces, zero-length vectors) are never errors:
//! they surface as NaN values. Only backend setup and lifecycle misuse are
//! reported here.

use thiserror::Error;

/// Errors raised by a renderer or rendering backend
#[derive(Error, Debug)]
pub enum RenderError {
    /// No adapter matched the requested options
    #[error("GPU adapter error: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// The adapter refused to create a device
    #[error("GPU device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Shader compilation or validation errors
    #[error("Shader error: {0}")]
    Shader(String),

    /// Render pipeline creation errors
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Generic backend failures
    #[error("Backend error: {0}")]
    Backend(String),

    /// A frame was requested before the backend was initialized
    #[error("Renderer has not been initialized")]
    NotInitialized,

    /// Initialization failed earlier; this renderer will not draw again
    #[error("Rendering aborted after a fatal initialization error")]
    Aborted,
}

/// Unknown projection name passed to `ProjectionKind::from_str`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown projection '{0}', expected 'orthographic' or 'perspective'")]
pub struct ParseProjectionError(pub String);

/// Result type alias using [`RenderError`]
pub type Result<T> = std::result::Result<T, RenderError>;
