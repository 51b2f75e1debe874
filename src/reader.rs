//! A page quad scene node: document navigation wired to a textured quad.
//!
//! [`PageQuad`] exclusively owns its [`PagedImageSource`] and its
//! [`QuadSink`]. Every navigation call goes through the source; when a page
//! renders, the node hands the new image to the sink and rebuilds the quad
//! only if the page's aspect ratio differs from the one the current quad was
//! built for.
//!
//! # Example
//!
//! ```
//! use pagequad::{AspectRatioPolicy, CpuQuad, GeometryHints, MemoryDocument, PageQuad, Vec3};
//! use image::{DynamicImage, RgbImage};
//!
//! let doc = MemoryDocument::new(vec![
//!     DynamicImage::ImageRgb8(RgbImage::new(800, 400)),
//!     DynamicImage::ImageRgb8(RgbImage::new(400, 800)),
//! ]);
//! let hints = GeometryHints::new()
//!     .width_vec(Vec3::X * 2.0)
//!     .height_vec(Vec3::Y * 2.0)
//!     .aspect_ratio_policy(AspectRatioPolicy::ResizeHeightToMatchAspect);
//!
//! let mut quad = PageQuad::new(CpuQuad::new());
//! quad.assign(doc, hints)?;
//! assert_eq!(quad.geometry().map(|g| g.size.y), Some(1.0));
//!
//! // Portrait page: the quad grows taller
//! quad.next()?;
//! assert_eq!(quad.geometry().map(|g| g.size.y), Some(4.0));
//! # Ok::<(), pagequad::PageError>(())
//! ```

use crate::error::PageError;
use crate::hints::{Color, GeometryHints};
use crate::navigation::PageCommand;
use crate::provider::{DocumentProvider, OpenDocument};
use crate::quad::{QuadGeometry, document_aspect};
use crate::sink::QuadSink;
use crate::source::PagedImageSource;
use std::path::Path;
use tracing::{debug, trace};

/// A paged document shown on a quad.
pub struct PageQuad<P, S> {
    source: PagedImageSource<P>,
    hints: GeometryHints,
    sink: S,
    geometry: Option<QuadGeometry>,
    built_aspect: Option<f32>,
}

impl<P: DocumentProvider, S: QuadSink> PageQuad<P, S> {
    /// Creates a node with no document. The sink receives nothing until a
    /// document with at least one page is bound.
    pub fn new(sink: S) -> Self {
        Self {
            source: PagedImageSource::new(),
            hints: GeometryHints::default(),
            sink,
            geometry: None,
            built_aspect: None,
        }
    }

    /// Creates a node and opens the document at `path`.
    pub fn from_path(path: impl AsRef<Path>, hints: GeometryHints, sink: S) -> Result<Self, PageError>
    where
        P: OpenDocument,
    {
        let mut quad = Self::new(sink);
        quad.open(path, hints)?;
        Ok(quad)
    }

    /// Opens the document at `path` with new hints and shows its first page.
    ///
    /// Hints are validated before anything else happens. On any failure the
    /// previous document, hints and quad stay in place.
    pub fn open(&mut self, path: impl AsRef<Path>, hints: GeometryHints) -> Result<(), PageError>
    where
        P: OpenDocument,
    {
        hints.validate()?;
        self.source.open(path, &hints)?;
        self.rebind(hints)
    }

    /// Binds an already constructed provider with new hints.
    pub fn assign(&mut self, provider: P, hints: GeometryHints) -> Result<(), PageError> {
        hints.validate()?;
        self.source.assign(provider, &hints)?;
        self.rebind(hints)
    }

    /// Installs new hints once the source has bound the new document.
    ///
    /// The source only stores validated hints and images with a non-zero
    /// area, so building the first quad here cannot fail.
    fn rebind(&mut self, hints: GeometryHints) -> Result<(), PageError> {
        self.hints = hints;
        self.geometry = None;
        self.built_aspect = None;
        self.refresh()
    }

    /// Shows page `n`. See [`PagedImageSource::page`].
    pub fn page(&mut self, n: usize) -> Result<(), PageError> {
        self.source.page(n)?;
        self.refresh()
    }

    pub fn next(&mut self) -> Result<(), PageError> {
        self.source.next()?;
        self.refresh()
    }

    pub fn previous(&mut self) -> Result<(), PageError> {
        self.source.previous()?;
        self.refresh()
    }

    pub fn first(&mut self) -> Result<(), PageError> {
        self.source.first()?;
        self.refresh()
    }

    pub fn last(&mut self) -> Result<(), PageError> {
        self.source.last()?;
        self.refresh()
    }

    /// Runs a navigation command, typically one produced by
    /// [`PageKeys`](crate::PageKeys).
    pub fn apply(&mut self, command: PageCommand) -> Result<(), PageError> {
        debug!(?command, page = self.source.current_page(), "Page command");
        match command {
            PageCommand::Next => self.next(),
            PageCommand::Previous => self.previous(),
            PageCommand::First => self.first(),
            PageCommand::Last => self.last(),
        }
    }

    /// Changes the page fill and re-renders the current page with it.
    ///
    /// The quad itself is left alone unless the re-render changes the
    /// page's aspect ratio. If the re-render fails the previous color is
    /// restored.
    pub fn set_background_color(&mut self, color: Color) -> Result<(), PageError> {
        let previous = self.hints.background_color;
        self.hints.background_color = color;
        self.source.set_background_color(color);
        if self.source.image().is_none() {
            return Ok(());
        }

        self.page(self.source.current_page()).inspect_err(|_| {
            self.hints.background_color = previous;
            self.source.set_background_color(previous);
        })
    }

    /// Pushes the current page to the sink, rebuilding the quad first if the
    /// page's aspect ratio is new.
    fn refresh(&mut self) -> Result<(), PageError> {
        let Some(image) = self.source.image() else {
            return Ok(());
        };
        let (width, height) = (image.width(), image.height());
        let aspect = document_aspect(width, height)?;

        if self.built_aspect != Some(aspect) {
            let geometry = QuadGeometry::build(&self.hints, width, height)?;
            debug!(width, height, size = %geometry.size, "Rebuilt page quad");
            self.sink.set_geometry(&geometry);
            self.geometry = Some(geometry);
            self.built_aspect = Some(aspect);
        } else {
            trace!(aspect, "Aspect unchanged, keeping quad");
        }

        self.sink.set_texture(image);
        self.sink.mark_texture_dirty();
        Ok(())
    }

    /// Number of pages the document has right now.
    pub fn page_count(&self) -> usize {
        self.source.page_count()
    }
}

impl<P, S> PageQuad<P, S> {
    pub fn current_page(&self) -> usize {
        self.source.current_page()
    }

    pub fn source(&self) -> &PagedImageSource<P> {
        &self.source
    }

    /// Mutable access to the bound provider. Page count changes are picked
    /// up by the next navigation call.
    pub fn provider_mut(&mut self) -> Option<&mut P> {
        self.source.provider_mut()
    }

    pub fn hints(&self) -> &GeometryHints {
        &self.hints
    }

    /// The quad last pushed to the sink, if any.
    pub fn geometry(&self) -> Option<&QuadGeometry> {
        self.geometry.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the node, handing back its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
