//! Pattern-based field extraction from pay-statement text.
//!
//! The rule table is a small grammar over a semi-structured document: each
//! [`ExtractionRule`] names a field, the label that introduces it, how far
//! its value extends ([`Boundary`]), and whether the value is text or a
//! monetary amount ([`ExtractionKind`]).
//!
//! # Example
//!
//! ```
//! use peticao::extract::FieldExtractor;
//!
//! let text = "Nome: Maria Silva Matrícula: 12345\nSalário Base .... R$ 3.500,00\n";
//! let fields = FieldExtractor::new().extract(text);
//!
//! assert_eq!(fields.text("nome_completo"), Some("Maria Silva"));
//! assert_eq!(fields.text("matricula"), Some("12345"));
//! assert_eq!(fields.amount("salario_base"), Some(3500.0));
//! assert_eq!(fields.amount("valor_irrf"), Some(0.0));
//! ```

mod extractor;
mod rules;

pub use extractor::{join_pages, FieldExtractor};
pub use rules::{default_rules, Boundary, ExtractionKind, ExtractionRule};
