use super::{DocumentProvider, RenderRequest, composite_over};
use crate::error::PageError;
use image::DynamicImage;

/// A document held entirely in memory.
///
/// Pages render at their native size; the requested resolution is ignored.
/// Pages without an alpha channel come back in their stored channel layout.
/// Pages with alpha are composited over the requested background.
///
/// ```
/// use pagequad::{DocumentProvider, MemoryDocument};
/// use image::{DynamicImage, RgbImage};
///
/// let doc = MemoryDocument::new(vec![
///     DynamicImage::ImageRgb8(RgbImage::new(800, 400)),
///     DynamicImage::ImageRgb8(RgbImage::new(400, 800)),
/// ]);
/// assert_eq!(doc.page_count(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    pages: Vec<DynamicImage>,
}

impl MemoryDocument {
    pub fn new(pages: Vec<DynamicImage>) -> Self {
        Self { pages }
    }

    /// Appends a page at the end of the document.
    pub fn push_page(&mut self, page: DynamicImage) {
        self.pages.push(page);
    }

    /// Removes and returns page `index`, if it exists.
    pub fn remove_page(&mut self, index: usize) -> Option<DynamicImage> {
        (index < self.pages.len()).then(|| self.pages.remove(index))
    }

    pub fn pages(&self) -> &[DynamicImage] {
        &self.pages
    }
}

impl DocumentProvider for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn render_page(
        &mut self,
        index: usize,
        request: &RenderRequest,
    ) -> Result<DynamicImage, PageError> {
        let page = self.pages.get(index).ok_or(PageError::OutOfRange {
            requested: index as i64,
            page_count: self.pages.len(),
        })?;

        if page.color().has_alpha() {
            Ok(DynamicImage::ImageRgba8(composite_over(
                page,
                request.background,
            )))
        } else {
            Ok(page.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::Color;
    use image::{Rgba, RgbaImage, RgbImage};

    const REQUEST: RenderRequest = RenderRequest {
        width: 1024,
        height: 1024,
        background: Color::BLACK,
    };

    #[test]
    fn opaque_pages_keep_native_size_and_layout() {
        let mut doc = MemoryDocument::new(vec![DynamicImage::ImageRgb8(RgbImage::new(30, 10))]);
        let page = doc.render_page(0, &REQUEST).unwrap();
        assert_eq!((page.width(), page.height()), (30, 10));
        assert_eq!(page.color().channel_count(), 3);
    }

    #[test]
    fn alpha_pages_are_filled_with_background() {
        let clear = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
        let mut doc = MemoryDocument::new(vec![DynamicImage::ImageRgba8(clear)]);
        let page = doc.render_page(0, &REQUEST).unwrap().to_rgba8();
        assert_eq!(page.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn pages_can_be_added_and_removed() {
        let mut doc = MemoryDocument::default();
        assert_eq!(doc.page_count(), 0);

        doc.push_page(DynamicImage::ImageRgb8(RgbImage::new(1, 1)));
        doc.push_page(DynamicImage::ImageRgb8(RgbImage::new(2, 2)));
        assert_eq!(doc.page_count(), 2);

        assert!(doc.remove_page(5).is_none());
        assert_eq!(doc.remove_page(0).map(|p| p.width()), Some(1));
        assert_eq!(doc.page_count(), 1);
    }
}
