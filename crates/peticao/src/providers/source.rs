//! Source-text providers.

use std::path::Path;

use crate::error::{PeticaoError, Result};

use super::has_extension;

/// Produces the text of each page of a source document.
pub trait SourceTextProvider: Send + Sync {
    /// Provider name, for logs and display.
    fn name(&self) -> &str;

    /// Text of every page, in order.
    ///
    /// Any failure to read or decode the document is reported as
    /// [`PeticaoError::SourceUnreadable`].
    fn pages_text(&self, path: &Path) -> Result<Vec<String>>;
}

/// Text layer of a digital PDF, via `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl SourceTextProvider for PdfTextSource {
    fn name(&self) -> &str {
        "pdf"
    }

    fn pages_text(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path).map_err(|e| unreadable(path, e))?;
        pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| unreadable(path, e))
    }
}

/// UTF-8 text file; pages are separated by form feeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl SourceTextProvider for PlainTextSource {
    fn name(&self) -> &str {
        "text"
    }

    fn pages_text(&self, path: &Path) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(path).map_err(|e| unreadable(path, e))?;
        Ok(text.split('\x0c').map(str::to_string).collect())
    }
}

/// Pick a source provider from the file extension.
pub fn source_for_path(path: &Path) -> Box<dyn SourceTextProvider> {
    if has_extension(path, "pdf") {
        Box::new(PdfTextSource)
    } else {
        Box::new(PlainTextSource)
    }
}

fn unreadable(path: &Path, err: impl std::fmt::Display) -> PeticaoError {
    PeticaoError::SourceUnreadable {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
