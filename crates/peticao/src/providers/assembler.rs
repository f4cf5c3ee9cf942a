//! Document assemblers.

use std::fmt;
use std::io::{Cursor, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;

use crate::error::{PeticaoError, Result};

/// File name of the assembled DOCX petition.
pub const DOCX_FILE_NAME: &str = "peticao_final.docx";

/// File name of the assembled plain-text petition.
pub const TEXT_FILE_NAME: &str = "peticao_final.txt";

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// A finished document ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Fixed download file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub content_type: String,
    /// Serialized document.
    pub bytes: Vec<u8>,
}

/// Serializes an ordered sequence of paragraphs into a document.
pub trait DocumentAssembler: Send + Sync {
    /// Download file name of the assembled document.
    fn file_name(&self) -> &str;

    /// MIME type of the assembled document.
    fn content_type(&self) -> &str;

    /// Serialize `paragraphs` as given.
    fn assemble(&self, paragraphs: &[String]) -> Result<Vec<u8>>;

    /// Serialize the paragraphs that are non-empty after trimming.
    fn artifact(&self, paragraphs: &[String]) -> Result<Artifact> {
        let kept: Vec<String> = paragraphs
            .iter()
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .collect();

        Ok(Artifact {
            file_name: self.file_name().to_string(),
            content_type: self.content_type().to_string(),
            bytes: self.assemble(&kept)?,
        })
    }
}

/// Writes a minimal WordprocessingML package.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxAssembler;

impl DocumentAssembler for DocxAssembler {
    fn file_name(&self) -> &str {
        DOCX_FILE_NAME
    }

    fn content_type(&self) -> &str {
        DOCX_CONTENT_TYPE
    }

    fn assemble(&self, paragraphs: &[String]) -> Result<Vec<u8>> {
        write_docx(paragraphs).map_err(|e| PeticaoError::AssemblyFailure(e.to_string()))
    }
}

/// Writes paragraphs as UTF-8 lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextAssembler;

impl DocumentAssembler for PlainTextAssembler {
    fn file_name(&self) -> &str {
        TEXT_FILE_NAME
    }

    fn content_type(&self) -> &str {
        "text/plain; charset=utf-8"
    }

    fn assemble(&self, paragraphs: &[String]) -> Result<Vec<u8>> {
        let mut text = paragraphs.join("\n");
        text.push('\n');
        Ok(text.into_bytes())
    }
}

/// Output document format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Docx,
    Txt,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "docx" | "word" => Ok(OutputFormat::Docx),
            "txt" | "text" => Ok(OutputFormat::Txt),
            _ => Err(format!("Unknown format: {}. Use docx or txt.", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Docx => write!(f, "docx"),
            OutputFormat::Txt => write!(f, "txt"),
        }
    }
}

/// Assembler for an output format.
pub fn assembler_for_format(format: OutputFormat) -> Box<dyn DocumentAssembler> {
    match format {
        OutputFormat::Docx => Box::new(DocxAssembler),
        OutputFormat::Txt => Box::new(PlainTextAssembler),
    }
}

fn write_docx(paragraphs: &[String]) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(paragraphs).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

fn document_xml(paragraphs: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    for paragraph in paragraphs {
        xml.push_str("<w:p><w:r>");
        for (i, line) in paragraph.split('\n').enumerate() {
            if i > 0 {
                xml.push_str("<w:br/>");
            }
            for (j, segment) in line.split('\t').enumerate() {
                if j > 0 {
                    xml.push_str("<w:tab/>");
                }
                if !segment.is_empty() {
                    xml.push_str(r#"<w:t xml:space="preserve">"#);
                    xml.push_str(&escape_xml(segment));
                    xml.push_str("</w:t>");
                }
            }
        }
        xml.push_str("</w:r></w:p>");
    }

    xml.push_str("</w:body></w:document>");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
