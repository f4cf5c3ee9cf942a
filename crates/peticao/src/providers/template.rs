//! Template providers.

use std::io::{Cursor, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{PeticaoError, Result};

use super::has_extension;

/// A `<w:p>` element, self-closing or with content.
static PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>.*?</w:p>").unwrap());

/// Text-bearing pieces of a paragraph, in document order.
static RUN_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab/>|<w:br(?:\s[^>]*)?/>|<w:cr/>").unwrap()
});

/// An entity or character reference inside `<w:t>` text.
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(lt|gt|quot|apos|amp|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});").unwrap());

/// Produces the paragraphs of a template document.
pub trait TemplateProvider: Send + Sync {
    /// Provider name, for logs and display.
    fn name(&self) -> &str;

    /// Paragraph texts in document order, empty paragraphs included.
    ///
    /// Failures are reported as [`PeticaoError::TemplateUnreadable`].
    fn paragraphs(&self, path: &Path) -> Result<Vec<String>>;
}

/// WordprocessingML (`.docx`) template.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxTemplate;

impl DocxTemplate {
    /// Paragraphs from in-memory `.docx` bytes.
    pub fn paragraphs_from_bytes(&self, bytes: &[u8]) -> std::result::Result<Vec<String>, String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| format!("not a DOCX archive: {}", e))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| format!("missing word/document.xml: {}", e))?
            .read_to_string(&mut xml)
            .map_err(|e| format!("failed to read word/document.xml: {}", e))?;

        Ok(parse_document_xml(&xml))
    }
}

impl TemplateProvider for DocxTemplate {
    fn name(&self) -> &str {
        "docx"
    }

    fn paragraphs(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path).map_err(|e| unreadable(path, e))?;
        self.paragraphs_from_bytes(&bytes).map_err(|e| unreadable(path, e))
    }
}

/// Plain-text template: one paragraph per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextTemplate;

impl TemplateProvider for PlainTextTemplate {
    fn name(&self) -> &str {
        "text"
    }

    fn paragraphs(&self, path: &Path) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(path).map_err(|e| unreadable(path, e))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// Pick a template provider from the file extension.
pub fn template_for_path(path: &Path) -> Box<dyn TemplateProvider> {
    if has_extension(path, "docx") {
        Box::new(DocxTemplate)
    } else {
        Box::new(PlainTextTemplate)
    }
}

/// Paragraph texts of a `word/document.xml` body.
fn parse_document_xml(xml: &str) -> Vec<String> {
    PARAGRAPH
        .find_iter(xml)
        .map(|p| {
            let mut text = String::new();
            for caps in RUN_CONTENT.captures_iter(p.as_str()) {
                match caps.get(1) {
                    Some(t) => text.push_str(&decode_entities(t.as_str())),
                    None if caps[0].starts_with("<w:tab") => text.push('\t'),
                    None => text.push('\n'),
                }
            }
            text
        })
        .collect()
}

/// Decode the predefined XML entities and numeric character references in
/// one pass, so `&amp;lt;` stays `&lt;`. Unknown or invalid references are
/// kept verbatim.
fn decode_entities(s: &str) -> String {
    ENTITY
        .replace_all(s, |caps: &Captures| {
            let body = &caps[1];
            let decoded = match body {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                _ => body
                    .strip_prefix("#x")
                    .or_else(|| body.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| body.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(|code| code.ok())
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn unreadable(path: &Path, err: impl std::fmt::Display) -> PeticaoError {
    PeticaoError::TemplateUnreadable {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p w:rsidR="00A1"><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>EXCELENTÍSSIMO SENHOR</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t xml:space="preserve">Eu, </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>[NOME_COMPLETO]</w:t></w:r><w:r><w:t xml:space="preserve">, recebo [SALARIO_BASE].</w:t></w:r></w:p>
<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C &amp; D &lt;E&gt;</w:t></w:r></w:p>
<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>
</w:body>
</w:document>"#;

    #[test]
    fn test_parse_document_xml() {
        let paragraphs = parse_document_xml(DOCUMENT_XML);
        assert_eq!(
            paragraphs,
            vec![
                "EXCELENTÍSSIMO SENHOR".to_string(),
                String::new(),
                "Eu, [NOME_COMPLETO], recebo [SALARIO_BASE].".to_string(),
                "A\tB\nC & D <E>".to_string(),
            ]
        );
    }

    #[test]
    fn test_numeric_character_references() {
        assert_eq!(decode_entities("a&#160;b"), "a\u{a0}b");
        assert_eq!(decode_entities("1&#x2013;2"), "1\u{2013}2");
        assert_eq!(decode_entities("S&#xE3;o"), "São");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&nbsp;"), "&nbsp;");
    }

    #[test]
    fn test_paragraph_properties_are_not_paragraphs() {
        let xml = r#"<w:body><w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>T</w:t></w:r></w:p></w:body>"#;
        assert_eq!(parse_document_xml(xml), vec!["T".to_string()]);
    }

    #[test]
    fn test_plain_text_template_one_paragraph_per_line() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "first\n\nthird\n").unwrap();

        let paragraphs = PlainTextTemplate.paragraphs(file.path()).unwrap();
        assert_eq!(paragraphs, vec!["first", "", "third"]);
    }

    #[test]
    fn test_non_zip_docx_is_unreadable() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"plain bytes").unwrap();

        let result = DocxTemplate.paragraphs(file.path());
        assert!(matches!(result, Err(PeticaoError::TemplateUnreadable { .. })));
    }

    #[test]
    fn test_template_for_path() {
        assert_eq!(template_for_path(Path::new("peticao.docx")).name(), "docx");
        assert_eq!(template_for_path(Path::new("peticao.txt")).name(), "text");
    }
}
