use super::{DocumentProvider, OpenDocument, RenderRequest, composite_over};
use crate::error::PageError;
use image::{DynamicImage, ImageError, ImageFormat, imageops::FilterType};
use std::cell::Cell;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A document whose pages are ordinary image files.
///
/// Opened from a directory, every file the `image` crate recognizes by
/// extension is a page, ordered by file name (`page-01.png`, `page-02.png`,
/// ...). Opened from a single image file, the document has one page.
///
/// The directory is rescanned whenever the page list is needed, so files
/// added or removed after opening change the page count on the next call.
/// If a rescan fails, [`page_count`](DocumentProvider::page_count) reports
/// the last count that was read successfully and rendering reports the
/// I/O failure.
///
/// # Example
///
/// ```no_run
/// use pagequad::{DocumentProvider, ImageSequence, OpenDocument};
/// use std::path::Path;
///
/// let doc = ImageSequence::open(Path::new("scans/"))?;
/// println!("{} pages", doc.page_count());
/// # Ok::<(), pagequad::PageError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ImageSequence {
    source: Source,
    known_pages: Cell<usize>,
}

#[derive(Clone, Debug)]
enum Source {
    File(PathBuf),
    Directory(PathBuf),
}

impl ImageSequence {
    /// The path the sequence was opened from.
    pub fn path(&self) -> &Path {
        match &self.source {
            Source::File(path) | Source::Directory(path) => path,
        }
    }

    /// Page files in page order.
    pub fn pages(&self) -> io::Result<Vec<PathBuf>> {
        let pages = match &self.source {
            Source::File(path) => vec![path.clone()],
            Source::Directory(dir) => scan_directory(dir)?,
        };
        self.known_pages.set(pages.len());
        Ok(pages)
    }
}

impl OpenDocument for ImageSequence {
    fn open(path: &Path) -> Result<Self, PageError> {
        if path.is_dir() {
            let pages = scan_directory(path)
                .map_err(|e| PageError::NotFound(format!("{}: {}", path.display(), e)))?;
            if pages.is_empty() {
                return Err(PageError::NotFound(format!(
                    "{}: directory contains no page images",
                    path.display()
                )));
            }
            debug!(dir = %path.display(), pages = pages.len(), "Opened image sequence");
            Ok(Self {
                source: Source::Directory(path.to_path_buf()),
                known_pages: Cell::new(pages.len()),
            })
        } else if path.is_file() {
            if ImageFormat::from_path(path).is_err() {
                return Err(PageError::DecodeError(format!(
                    "{}: unrecognized image format",
                    path.display()
                )));
            }
            debug!(file = %path.display(), "Opened single-page image document");
            Ok(Self {
                source: Source::File(path.to_path_buf()),
                known_pages: Cell::new(1),
            })
        } else {
            Err(PageError::NotFound(path.display().to_string()))
        }
    }
}

impl DocumentProvider for ImageSequence {
    fn page_count(&self) -> usize {
        match self.pages() {
            Ok(pages) => pages.len(),
            Err(e) => {
                let known = self.known_pages.get();
                warn!(
                    path = %self.path().display(),
                    error = %e,
                    pages = known,
                    "Failed to rescan page directory, keeping last page count"
                );
                known
            }
        }
    }

    fn render_page(
        &mut self,
        index: usize,
        request: &RenderRequest,
    ) -> Result<DynamicImage, PageError> {
        let pages = self.pages().map_err(|e| {
            let detail = format!("{}: {}", self.path().display(), e);
            match e.kind() {
                io::ErrorKind::NotFound => PageError::NotFound(detail),
                _ => PageError::DecodeError(detail),
            }
        })?;
        let path = pages.get(index).ok_or_else(|| PageError::OutOfRange {
            requested: index as i64,
            page_count: pages.len(),
        })?;

        let page = image::open(path).map_err(|e| match e {
            ImageError::IoError(err) if err.kind() == io::ErrorKind::NotFound => {
                PageError::NotFound(path.display().to_string())
            }
            other => PageError::DecodeError(format!("{}: {}", path.display(), other)),
        })?;

        // Fit inside the requested box, keeping the page's proportions
        let fitted = page.resize(request.width, request.height, FilterType::Triangle);
        Ok(DynamicImage::ImageRgba8(composite_over(
            &fitted,
            request.background,
        )))
    }
}

fn scan_directory(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && ImageFormat::from_path(&path).is_ok() {
            pages.push(path);
        }
    }
    pages.sort();
    Ok(pages)
}
