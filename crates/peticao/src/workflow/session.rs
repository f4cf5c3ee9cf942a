//! Workflow session state machine.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PeticaoError, Result};
use crate::fields::FieldMap;

/// Current version of the session file format.
pub const SESSION_VERSION: &str = "1.0.0";

/// Workflow stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Step {
    /// Upload and extraction.
    #[default]
    Extract = 1,
    /// Human review and editing of generated paragraphs.
    Review = 2,
    /// Final document assembly.
    Finalize = 3,
}

impl Step {
    /// Stage number, 1 to 3.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Completion percentage shown for the stage.
    pub fn progress(&self) -> u8 {
        match self {
            Step::Extract => 33,
            Step::Review => 66,
            Step::Finalize => 100,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Extract => "Upload e Extração de Dados",
            Step::Review => "Revisão e Edição do Documento",
            Step::Finalize => "Documento Final",
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> u8 {
        step.number()
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(n: u8) -> std::result::Result<Self, Self::Error> {
        match n {
            1 => Ok(Step::Extract),
            2 => Ok(Step::Review),
            3 => Ok(Step::Finalize),
            _ => Err(format!("invalid workflow step {}", n)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// State of one user's review session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSession {
    /// Version of the session format.
    pub version: String,

    /// When the session was created.
    pub created_at: DateTime<Utc>,

    /// When the session last changed.
    pub updated_at: DateTime<Utc>,

    /// Current stage.
    pub current_step: Step,

    /// Fields from the most recent successful extraction.
    pub extracted_fields: Option<FieldMap>,

    /// Paragraphs produced by the most recent generation.
    pub generated_paragraphs: Option<Vec<String>>,

    /// Paragraphs approved at the end of review.
    pub edited_paragraphs: Option<Vec<String>>,

    /// Source document used for the last extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,

    /// SHA-256 of the source document used for the last extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,

    /// Template used for the last generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowSession {
    /// A fresh session at the extraction stage.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            version: SESSION_VERSION.to_string(),
            created_at: now,
            updated_at: now,
            current_step: Step::Extract,
            extracted_fields: None,
            generated_paragraphs: None,
            edited_paragraphs: None,
            source_path: None,
            source_hash: None,
            template_path: None,
        }
    }

    pub fn step(&self) -> Step {
        self.current_step
    }

    /// Cache the fields of a successful extraction. Only valid at the
    /// extraction stage; elsewhere the call is ignored and `false` returned.
    pub fn record_extraction(&mut self, fields: FieldMap) -> bool {
        if self.current_step != Step::Extract {
            tracing::warn!(step = %self.current_step, "extraction ignored outside step 1");
            return false;
        }
        self.extracted_fields = Some(fields);
        self.touch();
        true
    }

    /// Step 1 → 2: store the generated paragraphs and start review.
    ///
    /// Requires cached extracted fields and a non-empty paragraph sequence.
    pub fn begin_review(&mut self, paragraphs: Vec<String>) -> Result<Step> {
        self.require_step(Step::Extract, Step::Review)?;

        if self.extracted_fields.is_none() {
            return Err(self.reject(Step::Review, "no extracted fields"));
        }
        if paragraphs.is_empty() {
            return Err(self.reject(Step::Review, "no generated paragraphs"));
        }

        self.generated_paragraphs = Some(paragraphs);
        self.edited_paragraphs = None;
        self.advance(Step::Review);
        Ok(self.current_step)
    }

    /// Generated paragraphs that are non-empty after trimming, paired with
    /// their 1-based position in the generated sequence.
    pub fn reviewable_paragraphs(&self) -> Vec<(usize, &str)> {
        self.generated_paragraphs
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, p)| !p.trim().is_empty())
            .map(|(i, p)| (i + 1, p.as_str()))
            .collect()
    }

    /// Step 2 → 3: capture the edited paragraphs.
    ///
    /// With `None`, the reviewable paragraphs are confirmed unchanged.
    /// Paragraphs that are empty after trimming are dropped; at least one
    /// must remain.
    pub fn confirm_edits(&mut self, edits: Option<Vec<String>>) -> Result<Step> {
        self.require_step(Step::Review, Step::Finalize)?;

        if self.generated_paragraphs.is_none() {
            return Err(self.reject(Step::Finalize, "no generated paragraphs"));
        }

        let edits = edits.unwrap_or_else(|| {
            self.reviewable_paragraphs()
                .into_iter()
                .map(|(_, p)| p.to_string())
                .collect()
        });

        let kept: Vec<String> = edits.into_iter().filter(|p| !p.trim().is_empty()).collect();
        if kept.is_empty() {
            return Err(self.reject(Step::Finalize, "every paragraph is empty"));
        }

        self.edited_paragraphs = Some(kept);
        self.advance(Step::Finalize);
        Ok(self.current_step)
    }

    /// Navigate one stage back: 3 → 2 or 2 → 1. Cached artifacts are kept.
    /// At step 1 this is a no-op.
    pub fn back(&mut self) -> Step {
        let target = match self.current_step {
            Step::Extract => return Step::Extract,
            Step::Review => Step::Extract,
            Step::Finalize => Step::Review,
        };
        self.advance(target);
        self.current_step
    }

    /// Paragraphs ready for assembly, available at the final stage.
    pub fn final_paragraphs(&self) -> Result<&[String]> {
        if self.current_step != Step::Finalize {
            return Err(PeticaoError::InvalidTransition {
                from: self.current_step.number(),
                to: Step::Finalize.number(),
                reason: "document can only be assembled at step 3".to_string(),
            });
        }
        self.edited_paragraphs
            .as_deref()
            .ok_or_else(|| PeticaoError::AssemblyFailure("no edited paragraphs".to_string()))
    }

    /// Record which documents produced the current artifacts.
    pub fn set_inputs(
        &mut self,
        source_path: PathBuf,
        source_hash: Option<String>,
        template_path: PathBuf,
    ) {
        self.source_path = Some(source_path);
        self.source_hash = source_hash;
        self.template_path = Some(template_path);
        self.touch();
    }

    fn require_step(&self, expected: Step, target: Step) -> Result<()> {
        if self.current_step != expected {
            return Err(self.reject(target, &format!("session is at step {}", self.current_step)));
        }
        Ok(())
    }

    fn reject(&self, target: Step, reason: &str) -> PeticaoError {
        tracing::warn!(from = %self.current_step, to = %target, reason, "transition rejected");
        PeticaoError::InvalidTransition {
            from: self.current_step.number(),
            to: target.number(),
            reason: reason.to_string(),
        }
    }

    fn advance(&mut self, target: Step) {
        tracing::info!(from = %self.current_step, to = %target, "workflow transition");
        self.current_step = target;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
