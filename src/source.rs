//! Page navigation state over a [`DocumentProvider`].
//!
//! [`PagedImageSource`] owns the provider, the index of the page on display,
//! and the image that page rendered to. The image is the single place the
//! page's width and height live, so the two are always read as a pair.
//!
//! Navigation is strict: asking for a page outside `[0, page_count)` is an
//! error, never a clamp, and leaves everything as it was. Asking for the page
//! already on display re-renders it.

use crate::error::PageError;
use crate::hints::{Color, GeometryHints};
use crate::provider::{DocumentProvider, OpenDocument, RenderRequest};
use crate::quad::document_aspect;
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, trace, warn};

/// A provider plus the current page and its rendered image.
///
/// # Example
///
/// ```
/// use pagequad::{GeometryHints, MemoryDocument, PagedImageSource};
/// use image::{DynamicImage, RgbImage};
///
/// let doc = MemoryDocument::new(vec![
///     DynamicImage::ImageRgb8(RgbImage::new(80, 40)),
///     DynamicImage::ImageRgb8(RgbImage::new(40, 80)),
/// ]);
///
/// let mut source = PagedImageSource::new();
/// source.assign(doc, &GeometryHints::default())?;
/// assert_eq!(source.dimensions(), Some((80, 40)));
///
/// source.next()?;
/// assert_eq!(source.current_page(), 1);
/// assert_eq!(source.dimensions(), Some((40, 80)));
/// assert!(source.next().is_err());
/// # Ok::<(), pagequad::PageError>(())
/// ```
#[derive(Debug)]
pub struct PagedImageSource<P> {
    provider: Option<P>,
    current_page: usize,
    image: Option<DynamicImage>,
    background_color: Color,
    resolution: (u32, u32),
    modified_count: u64,
}

impl<P> Default for PagedImageSource<P> {
    fn default() -> Self {
        let hints = GeometryHints::default();
        Self {
            provider: None,
            current_page: 0,
            image: None,
            background_color: hints.background_color,
            resolution: (hints.width_resolution, hints.height_resolution),
            modified_count: 0,
        }
    }
}

impl<P: DocumentProvider> PagedImageSource<P> {
    /// Creates an empty source with no document bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the document at `path` and renders its first page.
    ///
    /// On failure the previously bound document, page and image stay as
    /// they were.
    pub fn open(&mut self, path: impl AsRef<Path>, hints: &GeometryHints) -> Result<(), PageError>
    where
        P: OpenDocument,
    {
        let path = path.as_ref();
        let provider = P::open(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to open document");
        })?;
        self.assign(provider, hints)
    }

    /// Binds an already constructed provider and renders its first page.
    ///
    /// The background color and raster resolution are taken from `hints`,
    /// which are validated first. A provider with zero pages binds
    /// successfully but produces no image.
    pub fn assign(&mut self, mut provider: P, hints: &GeometryHints) -> Result<(), PageError> {
        hints.validate()?;
        let resolution = (hints.width_resolution, hints.height_resolution);
        let request = RenderRequest {
            width: resolution.0,
            height: resolution.1,
            background: hints.background_color,
        };

        let page_count = provider.page_count();
        let image = if page_count > 0 {
            Some(
                provider
                    .render_page(0, &request)
                    .and_then(displayable)
                    .inspect_err(|e| {
                        warn!(error = %e, "Failed to render first page");
                    })?,
            )
        } else {
            debug!("Bound a document with no pages");
            None
        };

        self.provider = Some(provider);
        self.current_page = 0;
        self.background_color = hints.background_color;
        self.resolution = resolution;
        if let Some(image) = image {
            self.store(image);
        } else {
            self.image = None;
        }

        debug!(page_count, "Document bound");
        Ok(())
    }

    /// Renders page `n` and makes it current.
    ///
    /// Fails with [`PageError::OutOfRange`] unless `n < page_count()`.
    /// Requesting the current page renders it again.
    pub fn page(&mut self, n: usize) -> Result<(), PageError> {
        self.render(i64::try_from(n).unwrap_or(i64::MAX))
    }

    /// Moves to the following page.
    pub fn next(&mut self) -> Result<(), PageError> {
        self.render(self.current_page as i64 + 1)
    }

    /// Moves to the preceding page.
    pub fn previous(&mut self) -> Result<(), PageError> {
        self.render(self.current_page as i64 - 1)
    }

    /// Moves to page 0.
    pub fn first(&mut self) -> Result<(), PageError> {
        self.render(0)
    }

    /// Moves to the final page.
    pub fn last(&mut self) -> Result<(), PageError> {
        self.render(self.page_count() as i64 - 1)
    }

    fn render(&mut self, requested: i64) -> Result<(), PageError> {
        let page_count = self.page_count();
        let out_of_range = PageError::OutOfRange {
            requested,
            page_count,
        };

        let index = match usize::try_from(requested) {
            Ok(index) if index < page_count => index,
            _ => {
                debug!(requested, page_count, "Page request out of range");
                return Err(out_of_range);
            }
        };
        let Some(provider) = self.provider.as_mut() else {
            return Err(out_of_range);
        };

        let request = RenderRequest {
            width: self.resolution.0,
            height: self.resolution.1,
            background: self.background_color,
        };
        let image = provider
            .render_page(index, &request)
            .and_then(displayable)
            .inspect_err(|e| {
                warn!(page = index, error = %e, "Page render failed");
            })?;

        self.current_page = index;
        self.store(image);
        Ok(())
    }

    fn store(&mut self, image: DynamicImage) {
        trace!(
            page = self.current_page,
            width = image.width(),
            height = image.height(),
            channels = image.color().channel_count(),
            "Page rendered"
        );
        self.image = Some(image);
        self.modified_count += 1;
    }

    /// Number of pages the provider reports right now; 0 when unbound.
    pub fn page_count(&self) -> usize {
        self.provider.as_ref().map_or(0, DocumentProvider::page_count)
    }

    /// True when there is no page before the current one.
    pub fn is_first(&self) -> bool {
        self.current_page == 0
    }

    /// True when there is no page after the current one.
    pub fn is_last(&self) -> bool {
        self.current_page + 1 >= self.page_count()
    }
}

/// Rejects rasters with no area; they have no aspect ratio to size a quad by.
fn displayable(image: DynamicImage) -> Result<DynamicImage, PageError> {
    document_aspect(image.width(), image.height())?;
    Ok(image)
}

impl<P> PagedImageSource<P> {
    /// Index of the page on display. 0 until a document is bound.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The most recently rendered page, if any.
    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    /// `(width, height)` of the most recently rendered page.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|image| (image.width(), image.height()))
    }

    /// Channels per pixel of the most recently rendered page.
    pub fn channels(&self) -> Option<u8> {
        self.image.as_ref().map(|image| image.color().channel_count())
    }

    /// Bumped on every successful render. Consumers compare it against the
    /// value they last uploaded to know the image is dirty.
    pub fn modified_count(&self) -> u64 {
        self.modified_count
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Sets the fill used by subsequent renders. The current image is not
    /// touched until the next render.
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// `(width, height)` requested from providers on every render.
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Mutable access to the bound provider. Changes to its page count are
    /// picked up by the next navigation call.
    pub fn provider_mut(&mut self) -> Option<&mut P> {
        self.provider.as_mut()
    }

    pub fn is_loaded(&self) -> bool {
        self.provider.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryDocument;
    use image::RgbImage;

    fn page(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
    }

    fn three_pages() -> MemoryDocument {
        MemoryDocument::new(vec![page(800, 400), page(400, 800), page(600, 600)])
    }

    fn loaded() -> PagedImageSource<MemoryDocument> {
        let mut source = PagedImageSource::new();
        source.assign(three_pages(), &GeometryHints::default()).unwrap();
        source
    }

    /// Renders page 0 fine, then fails every render after that.
    struct FlakyDocument {
        renders: usize,
    }

    impl DocumentProvider for FlakyDocument {
        fn page_count(&self) -> usize {
            3
        }

        fn render_page(
            &mut self,
            _index: usize,
            _request: &RenderRequest,
        ) -> Result<DynamicImage, PageError> {
            self.renders += 1;
            if self.renders > 1 {
                Err(PageError::DecodeError("corrupt page".into()))
            } else {
                Ok(page(10, 20))
            }
        }
    }

    /// Records every request it receives.
    #[derive(Default)]
    struct RecordingDocument {
        requests: Vec<(usize, RenderRequest)>,
    }

    impl DocumentProvider for RecordingDocument {
        fn page_count(&self) -> usize {
            2
        }

        fn render_page(
            &mut self,
            index: usize,
            request: &RenderRequest,
        ) -> Result<DynamicImage, PageError> {
            self.requests.push((index, *request));
            Ok(page(request.width, request.height))
        }
    }

    #[test]
    fn empty_source_has_no_document() {
        let source: PagedImageSource<MemoryDocument> = PagedImageSource::new();
        assert_eq!(source.page_count(), 0);
        assert_eq!(source.current_page(), 0);
        assert!(source.image().is_none());
        assert!(!source.is_loaded());
    }

    #[test]
    fn navigation_on_empty_source_is_out_of_range() {
        let mut source: PagedImageSource<MemoryDocument> = PagedImageSource::new();
        assert!(matches!(
            source.page(0),
            Err(PageError::OutOfRange { page_count: 0, .. })
        ));
        assert!(source.next().is_err());
        assert!(source.previous().is_err());
    }

    #[test]
    fn assign_renders_first_page() {
        let source = loaded();
        assert_eq!(source.page_count(), 3);
        assert_eq!(source.current_page(), 0);
        assert_eq!(source.dimensions(), Some((800, 400)));
        assert_eq!(source.channels(), Some(3));
        assert_eq!(source.modified_count(), 1);
    }

    #[test]
    fn every_valid_page_can_be_visited() {
        let mut source = loaded();
        for n in [2, 0, 1, 2] {
            source.page(n).unwrap();
            assert_eq!(source.current_page(), n);
        }
        assert_eq!(source.dimensions(), Some((600, 600)));
    }

    #[test]
    fn out_of_range_leaves_state_unchanged() {
        let mut source = loaded();
        source.page(1).unwrap();
        let before = source.modified_count();

        for n in [3, 4, usize::MAX] {
            assert!(matches!(
                source.page(n),
                Err(PageError::OutOfRange { page_count: 3, .. })
            ));
        }

        assert_eq!(source.current_page(), 1);
        assert_eq!(source.dimensions(), Some((400, 800)));
        assert_eq!(source.modified_count(), before);
    }

    #[test]
    fn previous_on_first_page_fails() {
        let mut source = loaded();
        assert_eq!(
            source.previous(),
            Err(PageError::OutOfRange {
                requested: -1,
                page_count: 3
            })
        );
        assert_eq!(source.current_page(), 0);
    }

    #[test]
    fn three_page_walk_stops_at_the_end() {
        let mut source = loaded();
        source.next().unwrap();
        source.next().unwrap();
        assert_eq!(source.current_page(), 2);
        assert!(source.is_last());

        assert!(matches!(
            source.next(),
            Err(PageError::OutOfRange { requested: 3, .. })
        ));
        assert_eq!(source.current_page(), 2);
    }

    #[test]
    fn first_and_last_jump_to_the_ends() {
        let mut source = loaded();
        source.last().unwrap();
        assert_eq!(source.current_page(), 2);
        source.first().unwrap();
        assert_eq!(source.current_page(), 0);
        assert!(source.is_first());
    }

    #[test]
    fn current_page_is_rendered_again() {
        let mut source = loaded();
        let before = source.modified_count();
        source.page(0).unwrap();
        assert_eq!(source.modified_count(), before + 1);
    }

    #[test]
    fn render_failure_is_reported_and_state_kept() {
        let mut source = PagedImageSource::new();
        source
            .assign(FlakyDocument { renders: 0 }, &GeometryHints::default())
            .unwrap();

        assert!(matches!(source.next(), Err(PageError::DecodeError(_))));
        assert_eq!(source.current_page(), 0);
        assert_eq!(source.dimensions(), Some((10, 20)));
        assert_eq!(source.modified_count(), 1);
    }

    #[test]
    fn failed_assign_keeps_previous_document() {
        let mut source = PagedImageSource::new();
        source
            .assign(FlakyDocument { renders: 0 }, &GeometryHints::default())
            .unwrap();

        // This one has already used up its single good render
        let broken = FlakyDocument { renders: 1 };
        assert!(matches!(
            source.assign(broken, &GeometryHints::new().background_color(Color::BLACK)),
            Err(PageError::DecodeError(_))
        ));

        assert_eq!(source.provider().map(|p| p.renders), Some(1));
        assert_eq!(source.dimensions(), Some((10, 20)));
        assert_eq!(source.background_color(), Color::WHITE);
        assert_eq!(source.modified_count(), 1);
    }

    #[test]
    fn empty_render_is_invalid_aspect_and_keeps_page() {
        let mut source = PagedImageSource::new();
        source
            .assign(
                MemoryDocument::new(vec![page(800, 400), page(100, 0)]),
                &GeometryHints::default(),
            )
            .unwrap();

        assert_eq!(
            source.next(),
            Err(PageError::InvalidAspect {
                width: 100,
                height: 0
            })
        );
        assert_eq!(source.current_page(), 0);
        assert_eq!(source.dimensions(), Some((800, 400)));
        assert_eq!(source.modified_count(), 1);
    }

    #[test]
    fn assign_rejects_invalid_hints() {
        let mut source = loaded();
        source.page(1).unwrap();

        let result = source.assign(
            MemoryDocument::new(vec![page(5, 5)]),
            &GeometryHints::new().resolution(0, 10),
        );
        assert!(matches!(result, Err(PageError::InvalidGeometryHints(_))));
        assert_eq!(source.page_count(), 3);
        assert_eq!(source.current_page(), 1);
        assert_eq!(source.resolution(), (1024, 1024));
    }

    #[test]
    fn zero_page_document_binds_without_an_image() {
        let mut source = loaded();
        source
            .assign(MemoryDocument::default(), &GeometryHints::default())
            .unwrap();

        assert!(source.is_loaded());
        assert_eq!(source.page_count(), 0);
        assert_eq!(source.current_page(), 0);
        assert!(source.image().is_none());
        assert!(source.next().is_err());
    }

    #[test]
    fn hints_drive_render_requests() {
        let hints = GeometryHints::new()
            .resolution(640, 480)
            .background_color(Color::BLACK);
        let mut source = PagedImageSource::new();
        source.assign(RecordingDocument::default(), &hints).unwrap();
        source.set_background_color(Color::WHITE);
        source.next().unwrap();

        let requests = &source.provider().unwrap().requests;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, 0);
        assert_eq!(requests[0].1.background, Color::BLACK);
        assert_eq!(requests[1].0, 1);
        assert_eq!(requests[1].1.background, Color::WHITE);
        assert_eq!((requests[1].1.width, requests[1].1.height), (640, 480));
        assert_eq!(source.dimensions(), Some((640, 480)));
    }

    #[test]
    fn page_count_follows_the_provider() {
        let mut source = loaded();
        source.page(2).unwrap();
        source.provider_mut().unwrap().remove_page(2);

        assert_eq!(source.page_count(), 2);
        assert!(source.page(2).is_err());
        source.previous().unwrap();
        assert_eq!(source.current_page(), 1);
    }
}
