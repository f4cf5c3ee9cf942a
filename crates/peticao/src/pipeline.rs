//! Pipeline orchestrator and public entry point.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::{PipelineConfig, SupplementaryFields};
use crate::error::{PeticaoError, Result};
use crate::extract::FieldExtractor;
use crate::fields::FieldMap;
use crate::providers::{Artifact, DocumentAssembler, SourceTextProvider, TemplateProvider};
use crate::template::{unresolved_placeholders, TemplateSubstitutor};
use crate::workflow::{Step, WorkflowSession};

/// Extraction, substitution and assembly, sequenced by a
/// [`WorkflowSession`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    extractor: FieldExtractor,
    substitutor: TemplateSubstitutor,
}

impl Pipeline {
    /// Pipeline with the built-in pay-statement rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline from an explicit configuration.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            extractor: FieldExtractor::with_rules(config.rules)?,
            substitutor: TemplateSubstitutor::new()
                .with_priority(config.priority_fields)
                .with_required(config.required_fields),
        })
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    pub fn substitutor(&self) -> &TemplateSubstitutor {
        &self.substitutor
    }

    /// Read the source document and extract its fields.
    ///
    /// Only an unreadable source fails; missing fields take defaults.
    pub fn extract(&self, source: &dyn SourceTextProvider, path: &Path) -> Result<FieldMap> {
        let pages = source.pages_text(path)?;
        tracing::info!(provider = source.name(), pages = pages.len(), path = %path.display(), "extracting fields");
        Ok(self.extractor.extract_pages(&pages))
    }

    /// Merge supplementary fields over extracted ones and substitute them
    /// into `paragraphs`.
    pub fn substitute(
        &self,
        paragraphs: &[String],
        extracted: &FieldMap,
        supplementary: &SupplementaryFields,
    ) -> Result<Vec<String>> {
        let merged = extracted.merged(supplementary.fields());
        let filled = self.substitutor.substitute(paragraphs, &merged)?;

        let unresolved = unresolved_placeholders(&filled);
        if !unresolved.is_empty() {
            tracing::warn!(?unresolved, "placeholders without a matching field");
        }
        Ok(filled)
    }

    /// Read the template and fill it.
    pub fn fill(
        &self,
        template: &dyn TemplateProvider,
        path: &Path,
        extracted: &FieldMap,
        supplementary: &SupplementaryFields,
    ) -> Result<Vec<String>> {
        let paragraphs = template.paragraphs(path)?;
        tracing::info!(provider = template.name(), paragraphs = paragraphs.len(), path = %path.display(), "filling template");
        self.substitute(&paragraphs, extracted, supplementary)
    }

    /// Run extraction and substitution, then move `session` from step 1 to
    /// step 2.
    ///
    /// On failure the session stays at step 1. Fields from a successful
    /// extraction are cached on the session even if substitution fails.
    pub fn generate(
        &self,
        session: &mut WorkflowSession,
        source: &dyn SourceTextProvider,
        source_path: &Path,
        template: &dyn TemplateProvider,
        template_path: &Path,
        supplementary: &SupplementaryFields,
    ) -> Result<Step> {
        if session.step() != Step::Extract {
            return Err(PeticaoError::InvalidTransition {
                from: session.step().number(),
                to: Step::Review.number(),
                reason: "generation starts from step 1".to_string(),
            });
        }

        let fields = self.extract(source, source_path)?;
        session.record_extraction(fields.clone());

        let paragraphs = self.fill(template, template_path, &fields, supplementary)?;
        let step = session.begin_review(paragraphs)?;

        session.set_inputs(
            source_path.to_path_buf(),
            file_hash(source_path),
            template_path.to_path_buf(),
        );
        Ok(step)
    }

    /// Assemble the approved paragraphs of a session at step 3. The
    /// session's step is unchanged.
    pub fn finalize(
        &self,
        session: &WorkflowSession,
        assembler: &dyn DocumentAssembler,
    ) -> Result<Artifact> {
        let paragraphs = session.final_paragraphs()?;
        let artifact = assembler.artifact(paragraphs)?;
        tracing::info!(
            file = %artifact.file_name,
            bytes = artifact.bytes.len(),
            paragraphs = paragraphs.len(),
            "document assembled"
        );
        Ok(artifact)
    }
}

/// `sha256:<hex>` digest of a file, if it can be read.
pub fn file_hash(path: &Path) -> Option<String> {
    let contents = std::fs::read(path).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&contents);
    Some(format!("sha256:{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Boundary, ExtractionRule};

    #[test]
    fn test_substitute_merges_supplementary_last() {
        let mut extracted = FieldMap::new();
        extracted.insert("nome_completo", "Maria Silva");
        extracted.insert("salario_base", 3500.0);
        extracted.insert("valor_inss", 0.0);
        extracted.insert("valor_irrf", 0.0);
        extracted.insert("salario_liquido", 0.0);

        let mut supplementary = SupplementaryFields::new();
        supplementary.set("comarca", "CAMPINAS").unwrap();

        let out = Pipeline::new()
            .substitute(
                &["[COMARCA]: [NOME_COMPLETO], [SALARIO_BASE]".to_string()],
                &extracted,
                &supplementary,
            )
            .unwrap();
        assert_eq!(out[0], "CAMPINAS: Maria Silva, R$ 3.500,00");
    }

    #[test]
    fn test_with_config_custom_rules() {
        let config = PipelineConfig::new()
            .with_rules(vec![ExtractionRule::text("cpf", "CPF:", Boundary::LineEnd)])
            .with_priority_fields(vec![])
            .with_required_fields(vec!["cpf".to_string()]);

        let pipeline = Pipeline::with_config(config).unwrap();
        let fields = pipeline.extractor().extract("CPF: 111.222.333-44\n");
        assert_eq!(fields.text("cpf"), Some("111.222.333-44"));
        assert_eq!(pipeline.substitutor().required(), &["cpf".to_string()]);
    }

    #[test]
    fn test_file_hash_missing_file() {
        assert!(file_hash(Path::new("/nonexistent/file")).is_none());
    }
}
