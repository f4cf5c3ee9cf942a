//! Extraction rule table.

use serde::{Deserialize, Serialize};

use crate::fields::{names, FieldValue};

/// How a captured value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionKind {
    /// Trimmed free text; defaults to the empty string.
    Text,
    /// Brazilian-formatted amount parsed to a float; defaults to `0.0`.
    MonetaryAmount,
}

impl ExtractionKind {
    /// Value a field takes when its rule does not match.
    pub fn default_value(&self) -> FieldValue {
        match self {
            ExtractionKind::Text => FieldValue::Text(String::new()),
            ExtractionKind::MonetaryAmount => FieldValue::Amount(0.0),
        }
    }
}

/// Where a field's value ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "field")]
pub enum Boundary {
    /// Everything up to the label of another field, across line breaks.
    /// The referenced field must have its own rule in the table.
    UntilLabelOf(String),
    /// Everything up to the next line break.
    LineEnd,
    /// A run of digits.
    Digits,
    /// A currency-marked amount (`R$ 1.234,56`), directly after the label.
    Currency,
    /// A currency-marked amount preceded by arbitrary text on the same line.
    CurrencyAfterText,
}

/// A single field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRule {
    /// Field name in the resulting map.
    pub field: String,
    /// Literal label marker that precedes the value in the source text.
    pub label: String,
    /// How the value is interpreted.
    pub kind: ExtractionKind,
    /// Where the value ends.
    pub boundary: Boundary,
}

impl ExtractionRule {
    /// Free-text rule.
    pub fn text(field: impl Into<String>, label: impl Into<String>, boundary: Boundary) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            kind: ExtractionKind::Text,
            boundary,
        }
    }

    /// Monetary-amount rule.
    pub fn amount(field: impl Into<String>, label: impl Into<String>, boundary: Boundary) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            kind: ExtractionKind::MonetaryAmount,
            boundary,
        }
    }
}

/// Rules for the pay-statement layout.
///
/// The name is bounded by the registration-number label because the two
/// often share a line in the extracted text.
pub fn default_rules() -> Vec<ExtractionRule> {
    vec![
        ExtractionRule::text(
            names::NOME_COMPLETO,
            "Nome:",
            Boundary::UntilLabelOf(names::MATRICULA.to_string()),
        ),
        ExtractionRule::text(names::MATRICULA, "Matrícula:", Boundary::Digits),
        ExtractionRule::text(names::CARGO, "Cargo:", Boundary::LineEnd),
        ExtractionRule::text(names::MES_ANO, "Mês/Ano:", Boundary::LineEnd),
        ExtractionRule::amount(names::SALARIO_BASE, "Salário Base", Boundary::CurrencyAfterText),
        ExtractionRule::amount(names::VALOR_INSS, "INSS", Boundary::CurrencyAfterText),
        ExtractionRule::amount(names::VALOR_IRRF, "IRRF", Boundary::CurrencyAfterText),
        ExtractionRule::amount(names::SALARIO_LIQUIDO, "Valor Líquido:", Boundary::Currency),
    ]
}
