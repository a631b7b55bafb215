//! Pdfium-backed [`PageSource`].
//!
//! Binds the system pdfium library once per process. Binding failure is
//! reported per call as a document error rather than at startup, so the rest
//! of the server keeps working without the native library installed.

use pdfium_render::prelude::Pdfium;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;
use tracing::error;

use super::PageSource;
use crate::error::{MemoryError, Result};

static PDFIUM: OnceLock<Option<Pdfium>> = OnceLock::new();

fn pdfium() -> Result<&'static Pdfium> {
    PDFIUM
        .get_or_init(|| {
            Pdfium::bind_to_system_library()
                .map(Pdfium::new)
                .map_err(|err| error!("failed to bind pdfium: {err:#?}"))
                .ok()
        })
        .as_ref()
        .ok_or_else(|| MemoryError::Document("pdfium library is not available".into()))
}

/// Pdfium addresses pages with a 16-bit index; anything larger cannot exist
/// in a document it opened.
fn page_index(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| {
        MemoryError::Document(format!("page index {index} exceeds the supported range"))
    })
}

pub struct PdfiumPageSource;

impl PageSource for PdfiumPageSource {
    fn page_count(&self, path: &Path) -> Result<usize> {
        let document = pdfium()
            .and_then(|p| {
                p.load_pdf_from_file(path, None)
                    .map_err(|e| MemoryError::Document(format!("failed to open PDF: {e}")))
            })?;
        Ok(document.pages().len() as usize)
    }

    fn extract_pages(&self, path: &Path, range: Range<usize>) -> Result<String> {
        let document = pdfium()
            .and_then(|p| {
                p.load_pdf_from_file(path, None)
                    .map_err(|e| MemoryError::Document(format!("failed to open PDF: {e}")))
            })?;

        let mut text = String::new();
        for index in range {
            let page = document
                .pages()
                .get(page_index(index)?)
                .map_err(|e| MemoryError::Document(format!("failed to load page {index}: {e}")))?;
            let page_text = page
                .text()
                .map_err(|e| MemoryError::Document(format!("failed to read page {index}: {e}")))?;
            text.push_str(&page_text.all());
        }
        Ok(text)
    }
}
