//! Field values and the ordered field map shared by every pipeline stage.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::format::format_value;

/// Field names of the extraction vocabulary.
pub mod names {
    pub const NOME_COMPLETO: &str = "nome_completo";
    pub const MATRICULA: &str = "matricula";
    pub const CARGO: &str = "cargo";
    pub const MES_ANO: &str = "mes_ano";
    pub const SALARIO_BASE: &str = "salario_base";
    pub const VALOR_INSS: &str = "valor_inss";
    pub const VALOR_IRRF: &str = "valor_irrf";
    pub const SALARIO_LIQUIDO: &str = "salario_liquido";
}

/// A single field value: free text or a parsed monetary amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Amount(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric value, if this is a monetary amount.
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            FieldValue::Amount(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    /// Text value, if this is free text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Amount(_) => None,
        }
    }

    /// Display form: amounts are rendered as currency, text passes through.
    pub fn formatted(&self) -> FieldValue {
        FieldValue::Text(format_value(self))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Amount(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Amount(v)
    }
}

/// Placeholder token for a field key: `[` + upper-cased key + `]`.
pub fn placeholder_for(key: &str) -> String {
    format!("[{}]", key.to_uppercase())
}

/// Insertion-ordered map from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(IndexMap<String, FieldValue>);

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Text value of a field, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Amount value of a field, if present and monetary.
    pub fn amount(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_amount)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` over this map. On a key collision the value from
    /// `other` wins; new keys are appended in `other`'s order.
    pub fn merged(&self, other: &FieldMap) -> FieldMap {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }

    /// Copy of this map with every monetary amount rendered as currency.
    pub fn formatted(&self) -> FieldMap {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.formatted()))
            .collect()
    }

    /// `(field, display value)` rows for presenting extracted data.
    pub fn display_rows(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (k.to_string(), format_value(v)))
            .collect()
    }
}

impl FromIterator<(String, FieldValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        FieldMap(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = indexmap::map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_for_uppercases_key() {
        assert_eq!(placeholder_for("nome_completo"), "[NOME_COMPLETO]");
        assert_eq!(placeholder_for("cpf"), "[CPF]");
    }

    #[test]
    fn test_merge_last_writer_wins() {
        let mut base = FieldMap::new();
        base.insert("cargo", "Analista");
        base.insert("salario_base", 3500.0);

        let mut extra = FieldMap::new();
        extra.insert("cargo", "Gerente");
        extra.insert("cpf", "123.456.789-00");

        let merged = base.merged(&extra);
        assert_eq!(merged.text("cargo"), Some("Gerente"));
        assert_eq!(merged.amount("salario_base"), Some(3500.0));
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["cargo", "salario_base", "cpf"]);
        // Inputs untouched
        assert_eq!(base.text("cargo"), Some("Analista"));
    }

    #[test]
    fn test_formatted_only_touches_amounts() {
        let mut map = FieldMap::new();
        map.insert("nome_completo", "Maria Silva");
        map.insert("salario_base", 1234.5);

        let formatted = map.formatted();
        assert_eq!(formatted.text("nome_completo"), Some("Maria Silva"));
        assert_eq!(formatted.text("salario_base"), Some("R$ 1.234,50"));
        assert_eq!(formatted.amount("salario_base"), None);
    }

    #[test]
    fn test_display_rows() {
        let mut map = FieldMap::new();
        map.insert("matricula", "12345");
        map.insert("valor_inss", 385.0);

        let rows = map.display_rows();
        assert_eq!(rows[0], ("matricula".to_string(), "12345".to_string()));
        assert_eq!(rows[1], ("valor_inss".to_string(), "R$ 385,00".to_string()));
    }

    #[test]
    fn test_serde_untagged_values() {
        let mut map = FieldMap::new();
        map.insert("cargo", "Analista");
        map.insert("salario_base", 3500.0);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"cargo":"Analista","salario_base":3500.0}"#);

        let back: FieldMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
