//! Template substitutor.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PeticaoError, Result};
use crate::fields::{names, placeholder_for, FieldMap};

/// Fields substituted before any other key, in this order.
pub const DEFAULT_PRIORITY_FIELDS: &[&str] = &[
    names::NOME_COMPLETO,
    names::SALARIO_BASE,
    names::VALOR_INSS,
    names::VALOR_IRRF,
    names::SALARIO_LIQUIDO,
];

/// Fields that must be present in the merged map before substitution.
pub const DEFAULT_REQUIRED_FIELDS: &[&str] = DEFAULT_PRIORITY_FIELDS;

static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[A-Z0-9_]+\]").unwrap());

/// Replaces placeholders in template paragraphs with field values.
#[derive(Debug, Clone)]
pub struct TemplateSubstitutor {
    priority: Vec<String>,
    required: Vec<String>,
}

impl TemplateSubstitutor {
    /// Substitutor with the default priority and required fields.
    pub fn new() -> Self {
        Self {
            priority: DEFAULT_PRIORITY_FIELDS.iter().map(|s| s.to_string()).collect(),
            required: DEFAULT_REQUIRED_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set the fields substituted first.
    pub fn with_priority(mut self, fields: Vec<String>) -> Self {
        self.priority = fields;
        self
    }

    /// Set the fields the merged map must contain.
    pub fn with_required(mut self, fields: Vec<String>) -> Self {
        self.required = fields;
        self
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Substitute every paragraph.
    ///
    /// Monetary amounts are formatted once up front. The output has exactly
    /// as many paragraphs as the input, empty ones included. Fails without
    /// producing output if a required field is missing from `fields`.
    pub fn substitute(&self, paragraphs: &[String], fields: &FieldMap) -> Result<Vec<String>> {
        if let Some(missing) = self.required.iter().find(|k| !fields.contains_key(k)) {
            return Err(PeticaoError::SubstitutionPrecondition(missing.clone()));
        }

        let replacements = self.replacements(&fields.formatted());

        Ok(paragraphs
            .iter()
            .map(|p| apply(p, &replacements))
            .collect())
    }

    /// Ordered `(placeholder, value)` pairs: priority fields first, then
    /// every other key in map order. Each key appears once.
    fn replacements(&self, formatted: &FieldMap) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(formatted.len());

        for key in &self.priority {
            if let Some(value) = formatted.get(key) {
                pairs.push((placeholder_for(key), value.to_string()));
            }
        }

        for (key, value) in formatted.iter() {
            if !self.priority.iter().any(|p| p == key) {
                pairs.push((placeholder_for(key), value.to_string()));
            }
        }

        pairs
    }
}

impl Default for TemplateSubstitutor {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(paragraph: &str, replacements: &[(String, String)]) -> String {
    let mut text = paragraph.to_string();
    for (placeholder, value) in replacements {
        if text.contains(placeholder.as_str()) {
            text = text.replace(placeholder.as_str(), value);
        }
    }
    text
}

/// Distinct placeholder-shaped tokens still present in `paragraphs`, sorted.
pub fn unresolved_placeholders(paragraphs: &[String]) -> Vec<String> {
    let tokens: BTreeSet<String> = paragraphs
        .iter()
        .flat_map(|p| PLACEHOLDER_PATTERN.find_iter(p).map(|m| m.as_str().to_string()))
        .collect();
    tokens.into_iter().collect()
}
