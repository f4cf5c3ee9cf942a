//! Peticao: pay-statement extraction and petition template filling.
//!
//! Peticao turns a pay statement into a finished petition. It extracts a
//! fixed set of fields from the statement's text, merges them with
//! user-supplied fields, substitutes the result into `[PLACEHOLDER]` tokens
//! of a paragraph-oriented template, and lets a person review the generated
//! paragraphs before the final document is assembled.
//!
//! # Core Principles
//!
//! - **Lenient extraction**: a missing field takes a default value; only an
//!   unreadable document is an error
//! - **Literal substitution**: placeholders are exact tokens, unknown ones
//!   are left as they are
//! - **Human review**: nothing is assembled before the paragraphs are
//!   confirmed at the review stage
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use peticao::providers::{DocxAssembler, PdfTextSource, DocxTemplate};
//! use peticao::{Pipeline, SupplementaryFields, WorkflowSession};
//!
//! let pipeline = Pipeline::new();
//! let mut session = WorkflowSession::new();
//!
//! pipeline.generate(
//!     &mut session,
//!     &PdfTextSource,
//!     Path::new("holerite.pdf"),
//!     &DocxTemplate,
//!     Path::new("modelo.docx"),
//!     &SupplementaryFields::defaults(),
//! ).unwrap();
//!
//! session.confirm_edits(None).unwrap();
//! let artifact = pipeline.finalize(&session, &DocxAssembler).unwrap();
//! std::fs::write(&artifact.file_name, &artifact.bytes).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod fields;
pub mod format;
pub mod providers;
pub mod template;
pub mod workflow;

mod pipeline;

pub use crate::pipeline::{file_hash, Pipeline};
pub use config::{PipelineConfig, SupplementaryFields};
pub use error::{PeticaoError, Result};
pub use extract::{Boundary, ExtractionKind, ExtractionRule, FieldExtractor};
pub use fields::{placeholder_for, FieldMap, FieldValue};
pub use format::{format_currency, parse_monetary};
pub use providers::{Artifact, DocumentAssembler, OutputFormat, SourceTextProvider, TemplateProvider};
pub use template::TemplateSubstitutor;
pub use workflow::{Step, WorkflowSession};
