//! Scene consumers that receive a page quad's geometry and texture.
//!
//! A [`PageQuad`](crate::PageQuad) never talks to a renderer directly. It
//! pushes into a [`QuadSink`]:
//!
//! 1. [`QuadSink::set_geometry`] when the quad's proportions change
//! 2. [`QuadSink::set_texture`] after every successful render
//! 3. [`QuadSink::mark_texture_dirty`] right after, so the sink knows the
//!    texel data it holds is stale
//!
//! Providers hand over rasters with row 0 at the top of the page, while
//! corner 0 of the quad (texcoord `v = 0`) sits on the page's bottom edge.
//! Both sinks store texels bottom row first so the page reads upright.
//!
//! Two sinks ship with the crate: [`CpuQuad`] keeps everything in plain
//! memory, [`GpuQuad`] uploads to wgpu buffers and textures.

use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex3d};
use crate::quad::QuadGeometry;
use crate::texture::Texture;
use image::{DynamicImage, RgbaImage};
use tracing::trace;

/// Receiver for page quad geometry and texture updates.
pub trait QuadSink {
    fn set_geometry(&mut self, geometry: &QuadGeometry);
    fn set_texture(&mut self, image: &DynamicImage);
    fn mark_texture_dirty(&mut self);
}

/// A CPU-side record of the latest quad and page texture.
///
/// Useful for headless tools, software rasterizers, or anything that wants
/// to inspect what would be drawn.
#[derive(Clone, Debug, Default)]
pub struct CpuQuad {
    /// Corner vertices, empty until the first geometry arrives.
    pub vertices: Vec<Vertex3d>,
    /// Triangle indices, empty until the first geometry arrives.
    pub indices: Vec<u32>,
    /// The page as RGBA8, bottom row first, if one has been received.
    pub texture: Option<RgbaImage>,
    texture_dirty: bool,
    geometry_updates: usize,
}

impl CpuQuad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_geometry(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn is_texture_dirty(&self) -> bool {
        self.texture_dirty
    }

    /// Returns whether the texture was dirty and clears the flag.
    pub fn take_texture_dirty(&mut self) -> bool {
        std::mem::take(&mut self.texture_dirty)
    }

    /// How many times the geometry has been replaced.
    pub fn geometry_updates(&self) -> usize {
        self.geometry_updates
    }
}

impl QuadSink for CpuQuad {
    fn set_geometry(&mut self, geometry: &QuadGeometry) {
        self.vertices = geometry.vertices().to_vec();
        self.indices = QuadGeometry::INDICES.to_vec();
        self.geometry_updates += 1;
    }

    fn set_texture(&mut self, image: &DynamicImage) {
        self.texture = Some(texture_rows(image));
    }

    fn mark_texture_dirty(&mut self) {
        self.texture_dirty = true;
    }
}

/// Converts a top-down page raster into RGBA8 texels ordered by `v`.
fn texture_rows(image: &DynamicImage) -> RgbaImage {
    let mut texels = image.to_rgba8();
    image::imageops::flip_vertical_in_place(&mut texels);
    texels
}

/// Uploads a page quad to wgpu.
///
/// Geometry is written straight into the mesh buffers. A new page image is
/// held until [`QuadSink::mark_texture_dirty`], which uploads it: in place
/// when the page size is unchanged, into a freshly created texture otherwise.
///
/// # Example
///
/// ```no_run
/// use pagequad::{GeometryHints, GpuContext, GpuQuad, ImageSequence, PageQuad};
///
/// let gpu = GpuContext::new_headless()?;
/// let mut quad: PageQuad<ImageSequence, GpuQuad> = PageQuad::new(GpuQuad::new(&gpu));
/// quad.open("slides/", GeometryHints::default())?;
///
/// let sink = quad.sink();
/// assert!(sink.mesh().is_some() && sink.texture().is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GpuQuad<'a> {
    gpu: &'a GpuContext,
    mesh: Option<Mesh>,
    texture: Option<Texture>,
    pending: Option<RgbaImage>,
}

impl<'a> GpuQuad<'a> {
    pub fn new(gpu: &'a GpuContext) -> Self {
        Self {
            gpu,
            mesh: None,
            texture: None,
            pending: None,
        }
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }
}

impl QuadSink for GpuQuad<'_> {
    fn set_geometry(&mut self, geometry: &QuadGeometry) {
        match &self.mesh {
            Some(mesh) => mesh.write_quad(self.gpu, geometry),
            None => self.mesh = Some(Mesh::quad(self.gpu, geometry)),
        }
    }

    fn set_texture(&mut self, image: &DynamicImage) {
        self.pending = Some(texture_rows(image));
    }

    fn mark_texture_dirty(&mut self) {
        let Some(image) = self.pending.take() else {
            return;
        };

        match &self.texture {
            Some(texture) if (texture.width, texture.height) == image.dimensions() => {
                trace!(width = texture.width, height = texture.height, "Rewriting page texture");
                texture.write(self.gpu, &image);
            }
            _ => {
                trace!(
                    width = image.width(),
                    height = image.height(),
                    "Creating page texture"
                );
                self.texture = Some(Texture::from_image(self.gpu, &image, "Page Texture"));
            }
        }
    }
}
