//! Document providers: the things that know how many pages a document has
//! and how to rasterize one of them.
//!
//! A provider is deliberately opaque to the rest of the crate. The
//! [`PagedImageSource`](crate::PagedImageSource) only asks two questions of
//! it, and never caches the answers:
//!
//! - how many pages are there right now ([`DocumentProvider::page_count`])
//! - what does page `n` look like at this size on this background
//!   ([`DocumentProvider::render_page`])
//!
//! # Shipped Providers
//!
//! | Provider            | Opened from                   | Resolution            |
//! |---------------------|-------------------------------|-----------------------|
//! | [`ImageSequence`]   | a directory or an image file  | fits the request      |
//! | [`MemoryDocument`]  | in-memory pages               | native page size      |

mod image_sequence;
mod memory;

pub use image_sequence::ImageSequence;
pub use memory::MemoryDocument;

use crate::error::PageError;
use crate::hints::Color;
use image::DynamicImage;
use std::path::Path;

/// Parameters for rasterizing a single page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderRequest {
    /// Requested raster width in pixels.
    pub width: u32,
    /// Requested raster height in pixels.
    pub height: u32,
    /// Fill for any area the page itself does not cover.
    pub background: Color,
}

/// A paged document that can be rasterized one page at a time.
///
/// Providers able to render at arbitrary resolution should fit the page
/// inside `width × height` while keeping the page's own aspect ratio;
/// providers with a fixed raster size may ignore the requested size. The
/// returned image's dimensions are the ones the quad is sized from.
pub trait DocumentProvider {
    /// Current number of pages. Zero means there is nothing to show.
    fn page_count(&self) -> usize;

    /// Rasterizes page `index` (0-based).
    ///
    /// Callers guarantee `index < page_count()`. Failures are reported as
    /// [`PageError::DecodeError`] (or [`PageError::NotFound`] when the
    /// page's backing data vanished) and must not be retried or papered
    /// over with a blank page.
    fn render_page(
        &mut self,
        index: usize,
        request: &RenderRequest,
    ) -> Result<DynamicImage, PageError>;
}

/// A provider that can bind itself to a document by path.
pub trait OpenDocument: DocumentProvider + Sized {
    fn open(path: &Path) -> Result<Self, PageError>;
}

/// Paints `page` over an opaque-or-not `background` of the same size.
pub(crate) fn composite_over(page: &DynamicImage, background: Color) -> image::RgbaImage {
    let mut canvas =
        image::RgbaImage::from_pixel(page.width(), page.height(), background.to_rgba8());
    image::imageops::overlay(&mut canvas, &page.to_rgba8(), 0, 0);
    canvas
}
