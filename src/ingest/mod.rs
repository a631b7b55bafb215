//! PDF ingestion — pagination protocol for memorizing large documents.
//!
//! The preparer reads a bounded window of pages, wraps the raw text in a
//! delimited instruction payload for the calling agent, and says whether a
//! follow-up call is needed. Chunking the text "meaningfully" is a semantic
//! judgment delegated to the agent, so the preparer never calls the
//! memorization service itself; it only tells the agent to do so. The
//! protocol is stateless: the next start page rides in the payload and the
//! agent resupplies it on the next call.

pub mod pdfium;

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{MemoryError, Result};

/// Page-level access to a document. Extraction itself is an external
/// capability — the production impl binds pdfium, tests use fakes.
///
/// Methods are synchronous; async callers should use
/// `tokio::task::spawn_blocking`.
pub trait PageSource: Send + Sync {
    /// Number of pages in the document at `path`.
    fn page_count(&self, path: &Path) -> Result<usize>;

    /// Raw text of the pages in `range`, concatenated in page order with no
    /// separator.
    fn extract_pages(&self, path: &Path, range: Range<usize>) -> Result<String>;
}

/// One prepared window of a document, plus what the agent should do with it.
#[derive(Debug)]
pub struct ChunkInstructions {
    pub path: PathBuf,
    /// First page of this window (0-based, inclusive).
    pub start_page: usize,
    /// End of this window (exclusive).
    pub end_page: usize,
    pub page_count: usize,
    pub text: String,
}

impl ChunkInstructions {
    /// Start page for the follow-up call, or `None` when the window reached
    /// the end of the document.
    pub fn next_start_page(&self) -> Option<usize> {
        (self.end_page < self.page_count).then_some(self.end_page)
    }

    /// Render the instruction payload returned to the calling agent.
    pub fn render(&self) -> String {
        let mut out = format!(
            "The text between the BEGIN and END markers below was extracted from pages \
             {}-{} of {} ({} pages in total).\n\n\
             ---BEGIN PDF TEXT---\n{}\n---END PDF TEXT---\n\n\
             Split the text above into semantically meaningful chunks and store all \
             chunks in a single call to the memorize_multiple_texts tool, passing the \
             chunks as the texts argument together with any metadata you were given.",
            self.start_page + 1,
            self.end_page,
            self.path.display(),
            self.page_count,
            self.text,
        );

        if let Some(next) = self.next_start_page() {
            out.push_str(&format!(
                "\n\nMore pages remain. Once the chunks are stored, call memorize_pdf_file \
                 again with file_path \"{}\" and page {} to continue.",
                self.path.display(),
                next,
            ));
        }

        out
    }
}

/// Validate the request and extract one window of pages.
///
/// Validation order is fixed: missing path, then non-regular file, then wrong
/// extension — each before the document is opened — then page bounds against
/// the opened document.
pub fn prepare_window(
    source: &dyn PageSource,
    path: &Path,
    start_page: usize,
    window: usize,
) -> Result<ChunkInstructions> {
    if !path.exists() {
        return Err(MemoryError::FileMissing(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(MemoryError::NotAFile(path.to_path_buf()));
    }
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(MemoryError::NotAPdf(path.to_path_buf()));
    }

    let page_count = source.page_count(path)?;
    if start_page >= page_count {
        return Err(MemoryError::PageOutOfRange {
            requested: start_page,
            page_count,
        });
    }

    let end_page = (start_page + window).min(page_count);
    let text = source.extract_pages(path, start_page..end_page)?;

    tracing::info!(
        path = %path.display(),
        start_page,
        end_page,
        page_count,
        "prepared document window"
    );

    Ok(ChunkInstructions {
        path: path.to_path_buf(),
        start_page,
        end_page,
        page_count,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_start_page_present_when_pages_remain() {
        let instructions = ChunkInstructions {
            path: PathBuf::from("/tmp/doc.pdf"),
            start_page: 0,
            end_page: 20,
            page_count: 45,
            text: String::new(),
        };
        assert_eq!(instructions.next_start_page(), Some(20));
    }

    #[test]
    fn next_start_page_absent_at_document_end() {
        let instructions = ChunkInstructions {
            path: PathBuf::from("/tmp/doc.pdf"),
            start_page: 40,
            end_page: 45,
            page_count: 45,
            text: String::new(),
        };
        assert_eq!(instructions.next_start_page(), None);
    }

    #[test]
    fn render_delimits_text_and_names_the_batch_tool() {
        let instructions = ChunkInstructions {
            path: PathBuf::from("/tmp/doc.pdf"),
            start_page: 0,
            end_page: 2,
            page_count: 2,
            text: "page one textpage two text".into(),
        };
        let rendered = instructions.render();
        assert!(rendered.contains("---BEGIN PDF TEXT---\npage one textpage two text\n---END PDF TEXT---"));
        assert!(rendered.contains("memorize_multiple_texts"));
        assert!(rendered.contains("pages 1-2 of /tmp/doc.pdf (2 pages in total)"));
        // Final window: no continuation
        assert!(!rendered.contains("memorize_pdf_file"));
    }

    #[test]
    fn render_appends_continuation_when_pages_remain() {
        let instructions = ChunkInstructions {
            path: PathBuf::from("/tmp/doc.pdf"),
            start_page: 0,
            end_page: 20,
            page_count: 30,
            text: "text".into(),
        };
        let rendered = instructions.render();
        assert!(rendered.contains("memorize_pdf_file"));
        assert!(rendered.contains("file_path \"/tmp/doc.pdf\" and page 20"));
    }
}
