//! Configuration: supplementary fields and pipeline settings.

use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PeticaoError, Result};
use crate::extract::{default_rules, ExtractionRule};
use crate::fields::FieldMap;
use crate::template::{DEFAULT_PRIORITY_FIELDS, DEFAULT_REQUIRED_FIELDS};

static FIELD_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

/// Values pre-filled for the fields a user supplies alongside the pay
/// statement.
const DEFAULT_SUPPLEMENTARY: &[(&str, &str)] = &[
    ("nacionalidade", "brasileiro"),
    ("estado_civil", "casado"),
    ("rg", "12.345.678-9"),
    ("cpf", "123.456.789-00"),
    ("endereco", "Rua Exemplo, 123 - São Paulo/SP"),
    ("comarca", "SÃO PAULO"),
    ("nome_empresa", "Empresa ABC Ltda."),
    ("cnpj", "12.345.678/0001-90"),
    ("endereco_empresa", "Avenida Empresarial, 456 - São Paulo/SP"),
    ("data_admissao", "01/01/2020"),
];

/// User-entered fields merged over the extracted ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplementaryFields {
    fields: FieldMap,
}

impl SupplementaryFields {
    /// No supplementary fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pre-filled defaults of the petition form.
    pub fn defaults() -> Self {
        let mut fields = FieldMap::new();
        for (key, value) in DEFAULT_SUPPLEMENTARY {
            fields.insert(*key, *value);
        }
        Self { fields }
    }

    /// Load a flat table of string values from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PeticaoError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let table: IndexMap<String, String> = if is_toml {
            toml::from_str(&content).map_err(|e| {
                PeticaoError::Config(format!("Invalid TOML in '{}': {}", path.display(), e))
            })?
        } else {
            serde_json::from_str(&content)?
        };

        let mut loaded = Self::new();
        for (key, value) in table {
            loaded.set(&key, value)?;
        }
        Ok(loaded)
    }

    /// Set a field. The key is lower-cased and must be `[a-z0-9_]+`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let key = key.trim().to_lowercase();
        if !FIELD_KEY.is_match(&key) {
            return Err(PeticaoError::Config(format!("Invalid field name '{}'", key)));
        }
        self.fields.insert(key, value.into());
        Ok(())
    }

    /// Parse and apply a `key=value` assignment.
    pub fn set_assignment(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            PeticaoError::Config(format!("Expected key=value, got '{}'", assignment))
        })?;
        self.set(key, value)
    }

    /// Overlay `other` on these fields; `other` wins on collisions.
    pub fn overlay(mut self, other: SupplementaryFields) -> Self {
        self.fields = self.fields.merged(&other.fields);
        self
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Extraction rule table.
    pub rules: Vec<ExtractionRule>,
    /// Placeholders substituted first, as field names.
    pub priority_fields: Vec<String>,
    /// Fields the merged map must contain before substitution.
    pub required_fields: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            priority_fields: DEFAULT_PRIORITY_FIELDS.iter().map(|s| s.to_string()).collect(),
            required_fields: DEFAULT_REQUIRED_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extraction rule table.
    pub fn with_rules(mut self, rules: Vec<ExtractionRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the priority placeholder list.
    pub fn with_priority_fields(mut self, fields: Vec<String>) -> Self {
        self.priority_fields = fields;
        self
    }

    /// Replace the required field list.
    pub fn with_required_fields(mut self, fields: Vec<String>) -> Self {
        self.required_fields = fields;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_match_form() {
        let defaults = SupplementaryFields::defaults();
        assert_eq!(defaults.len(), 10);
        assert_eq!(defaults.fields().text("comarca"), Some("SÃO PAULO"));
        assert_eq!(defaults.fields().text("data_admissao"), Some("01/01/2020"));
    }

    #[test]
    fn test_set_normalizes_and_validates_keys() {
        let mut fields = SupplementaryFields::new();
        fields.set(" CPF ", "1").unwrap();
        assert_eq!(fields.fields().text("cpf"), Some("1"));

        assert!(fields.set("estado civil", "x").is_err());
        assert!(fields.set("", "x").is_err());
    }

    #[test]
    fn test_set_assignment() {
        let mut fields = SupplementaryFields::new();
        fields.set_assignment("comarca=CAMPINAS").unwrap();
        fields.set_assignment("endereco=Rua A, 1 = fundos").unwrap();

        assert_eq!(fields.fields().text("comarca"), Some("CAMPINAS"));
        assert_eq!(fields.fields().text("endereco"), Some("Rua A, 1 = fundos"));
        assert!(fields.set_assignment("no-equals").is_err());
    }

    #[test]
    fn test_overlay() {
        let mut overrides = SupplementaryFields::new();
        overrides.set("comarca", "SANTOS").unwrap();

        let merged = SupplementaryFields::defaults().overlay(overrides);
        assert_eq!(merged.fields().text("comarca"), Some("SANTOS"));
        assert_eq!(merged.fields().text("cpf"), Some("123.456.789-00"));
    }

    #[test]
    fn test_load_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "cpf = \"987.654.321-00\"\nestado_civil = \"solteira\"").unwrap();

        let loaded = SupplementaryFields::load(file.path()).unwrap();
        assert_eq!(loaded.fields().text("cpf"), Some("987.654.321-00"));
        assert_eq!(loaded.fields().text("estado_civil"), Some("solteira"));
    }

    #[test]
    fn test_load_json() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"nacionalidade": "brasileira"}}"#).unwrap();

        let loaded = SupplementaryFields::load(file.path()).unwrap();
        assert_eq!(loaded.fields().text("nacionalidade"), Some("brasileira"));
    }

    #[test]
    fn test_load_rejects_non_string_values() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "idade = 42").unwrap();

        assert!(matches!(
            SupplementaryFields::load(file.path()),
            Err(PeticaoError::Config(_))
        ));
    }
}
