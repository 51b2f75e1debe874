use thiserror::Error;

/// Errors reported by page navigation, providers and quad construction.
///
/// None of these are retried internally. Every failing operation leaves the
/// previously loaded document, page and image untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    /// The identifier does not resolve to a document
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The provider failed to parse or render
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Page index outside `[0, page_count)`
    #[error("Page {requested} out of range (document has {page_count} pages)")]
    OutOfRange { requested: i64, page_count: usize },

    /// The rendered image cannot produce an aspect ratio
    #[error("Invalid aspect: image is {width}x{height}")]
    InvalidAspect { width: u32, height: u32 },

    /// Width/height axes are degenerate or otherwise unusable
    #[error("Invalid geometry hints: {0}")]
    InvalidGeometryHints(String),
}

/// Errors raised while creating a GPU device for [`GpuQuad`](crate::GpuQuad).
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("Device creation failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
