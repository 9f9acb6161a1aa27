//! PDF text extraction
//!
//! Pulls per-page text and image counts out of the exam PDF with `pdf_oxide`.
//! No rendering, no OCR: a scanned booklet simply yields empty pages, which
//! the pipeline reports as "no extractable text".

use pdf_oxide::PdfDocument;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::PageText;

/// Read every page of the document.
///
/// A page whose text extraction fails is kept as an empty page so question
/// numbering stays aligned with the booklet; only an unreadable document is
/// an error.
pub fn extract_pages(path: &Path) -> Result<Vec<PageText>> {
    let mut doc =
        PdfDocument::open(path).map_err(|e| AppError::pdf_open_failed(path.display().to_string(), e))?;

    let page_count = doc
        .page_count()
        .map_err(|e| AppError::pdf_open_failed(path.display().to_string(), e))?;

    debug!("{}: {} pages", path.display(), page_count);

    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let text = match doc.extract_text(index) {
            Ok(text) => text,
            Err(e) => {
                warn!("page {}: text extraction failed: {}", index + 1, e);
                String::new()
            }
        };

        let image_count = match doc.extract_images(index) {
            Ok(images) => images.len(),
            Err(e) => {
                debug!("page {}: image listing failed: {}", index + 1, e);
                0
            }
        };

        pages.push(PageText {
            page_num: index + 1,
            text,
            has_images: image_count > 0,
            image_count,
        });
    }

    Ok(pages)
}

/// True when at least one page produced text
pub fn has_extractable_text(pages: &[PageText]) -> bool {
    pages.iter().any(|page| !page.text.trim().is_empty())
}
