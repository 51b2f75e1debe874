//! # pagequad
//!
//! **Paged documents as navigable, textured quads in a 3D scene.**
//!
//! A document provider rasterizes pages; a [`PageQuad`] keeps track of which
//! page is showing, sizes a quad to the page's proportions, and hands the
//! quad and the page texture to whatever draws your scene.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagequad::*;
//!
//! let hints = GeometryHints::new()
//!     .position(Vec3::new(-1.0, 0.0, -3.0))
//!     .width_vec(Vec3::X * 2.0)
//!     .height_vec(Vec3::Y * 2.0)
//!     .aspect_ratio_policy(AspectRatioPolicy::ResizeHeightToMatchAspect);
//!
//! let mut quad: PageQuad<ImageSequence, CpuQuad> =
//!     PageQuad::from_path("scans/", hints, CpuQuad::new())?;
//!
//! while quad.next().is_ok() {
//!     let sink = quad.sink();
//!     println!("page {}: {} vertices", quad.current_page(), sink.vertices.len());
//! }
//! # Ok::<(), PageError>(())
//! ```
//!
//! ## Pieces
//!
//! - [`DocumentProvider`] — page count and page rasterization ([`ImageSequence`], [`MemoryDocument`])
//! - [`PagedImageSource`] — current page and its rendered image, strict bounds
//! - [`QuadGeometry`] — corners and texcoords from [`GeometryHints`] and page size
//! - [`QuadSink`] — where geometry and texture go ([`CpuQuad`], [`GpuQuad`])
//! - [`PageKeys`] — keyboard bindings for turning pages
//!
//! Logging goes through `tracing`; install a subscriber to see it.

mod error;
mod gpu;
mod hints;
mod input;
mod mesh;
mod navigation;
mod provider;
mod quad;
mod reader;
mod sink;
mod source;
mod texture;

pub use error::{GpuError, PageError};
pub use gpu::GpuContext;
pub use hints::{AspectRatioPolicy, Color, GeometryHints};
pub use input::Input;
pub use mesh::{Mesh, Vertex3d};
pub use navigation::{PageCommand, PageKeys};
pub use provider::{DocumentProvider, ImageSequence, MemoryDocument, OpenDocument, RenderRequest};
pub use quad::{QUAD_TEXCOORDS, QuadGeometry, document_aspect};
pub use reader::PageQuad;
pub use sink::{CpuQuad, GpuQuad, QuadSink};
pub use source::PagedImageSource;
pub use texture::Texture;

// Re-export glam math types for convenience
pub use glam::{Vec2, Vec3, Vec4};

// Re-export winit key codes for binding navigation keys
pub use winit::keyboard::KeyCode;
