//! Boundaries to document formats.
//!
//! The pipeline consumes source text, template paragraphs and produces an
//! output document through three narrow traits, so the core never touches
//! a file format directly:
//!
//! - [`SourceTextProvider`]: page texts of a pay statement (PDF or text)
//! - [`TemplateProvider`]: paragraphs of a petition template (DOCX or text)
//! - [`DocumentAssembler`]: final paragraphs to a downloadable [`Artifact`]

mod assembler;
mod source;
mod template;

pub use assembler::{
    assembler_for_format, Artifact, DocumentAssembler, DocxAssembler, OutputFormat,
    PlainTextAssembler, DOCX_FILE_NAME, TEXT_FILE_NAME,
};
pub use source::{source_for_path, PdfTextSource, PlainTextSource, SourceTextProvider};
pub use template::{template_for_path, DocxTemplate, PlainTextTemplate, TemplateProvider};

use std::path::Path;

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
