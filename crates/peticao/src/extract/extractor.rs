//! Field extractor: compiles the rule table and applies it to text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PeticaoError, Result};
use crate::fields::{FieldMap, FieldValue};
use crate::format::parse_monetary;

use super::rules::{default_rules, Boundary, ExtractionKind, ExtractionRule};

/// Numeric token following a currency marker.
const AMOUNT_TOKEN: &str = r"R\$\s*([\d.,]+)";

static DEFAULT_EXTRACTOR: Lazy<FieldExtractor> =
    Lazy::new(|| FieldExtractor::with_rules(default_rules()).unwrap());

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: ExtractionRule,
    pattern: Regex,
}

/// Extracts a fixed vocabulary of fields from raw pay-statement text.
///
/// Extraction never fails on missing data: a rule that does not match
/// yields its kind's default value, so the returned map always holds every
/// field in the rule table.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    rules: Vec<CompiledRule>,
}

impl FieldExtractor {
    /// Extractor for the built-in pay-statement rules.
    pub fn new() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }

    /// Compile a custom rule table.
    ///
    /// Fails when a rule's boundary refers to a field that has no rule of
    /// its own, or when a field appears twice.
    pub fn with_rules(rules: Vec<ExtractionRule>) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in &rules {
            if rules.iter().filter(|r| r.field == rule.field).count() > 1 {
                return Err(PeticaoError::Config(format!(
                    "Duplicate extraction rule for field '{}'",
                    rule.field
                )));
            }

            let label = regex::escape(&rule.label);
            let source = match &rule.boundary {
                Boundary::UntilLabelOf(next_field) => {
                    let next = rules
                        .iter()
                        .find(|r| &r.field == next_field)
                        .ok_or_else(|| {
                            PeticaoError::Config(format!(
                                "Rule '{}' is bounded by unknown field '{}'",
                                rule.field, next_field
                            ))
                        })?;
                    format!(r"(?s){}\s*(.*?)\s*{}", label, regex::escape(&next.label))
                }
                Boundary::LineEnd => format!(r"{}\s*(.*?)\n", label),
                Boundary::Digits => format!(r"{}\s*(\d+)", label),
                Boundary::Currency => format!(r"{}\s*{}", label, AMOUNT_TOKEN),
                Boundary::CurrencyAfterText => format!(r"{}.*?{}", label, AMOUNT_TOKEN),
            };

            compiled.push(CompiledRule {
                rule: rule.clone(),
                pattern: Regex::new(&source)?,
            });
        }

        Ok(Self { rules: compiled })
    }

    /// The rule table this extractor applies.
    pub fn rules(&self) -> impl Iterator<Item = &ExtractionRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Extract every configured field from `text`.
    pub fn extract(&self, text: &str) -> FieldMap {
        let mut fields = FieldMap::new();

        for compiled in &self.rules {
            let rule = &compiled.rule;
            let captured = compiled
                .pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str());

            let value = match captured {
                Some(raw) => convert(rule, raw),
                None => {
                    tracing::debug!(field = %rule.field, label = %rule.label, "field not found, using default");
                    rule.kind.default_value()
                }
            };

            fields.insert(rule.field.clone(), value);
        }

        fields
    }

    /// Extract from page texts, concatenated as one document.
    pub fn extract_pages(&self, pages: &[String]) -> FieldMap {
        self.extract(&join_pages(pages))
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate page texts, terminating every page with a newline.
pub fn join_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}

fn convert(rule: &ExtractionRule, raw: &str) -> FieldValue {
    match rule.kind {
        ExtractionKind::Text => FieldValue::Text(raw.trim().to_string()),
        ExtractionKind::MonetaryAmount => match parse_monetary(raw) {
            Some(v) => FieldValue::Amount(v),
            None => {
                tracing::warn!(field = %rule.field, raw, "unparsable amount, using default");
                rule.kind.default_value()
            }
        },
    }
}
