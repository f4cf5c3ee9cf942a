//! CLI command implementations.

pub mod back;
pub mod confirm;
pub mod extract;
pub mod finalize;
pub mod generate;
pub mod review;
pub mod serve;
pub mod status;

use std::path::{Path, PathBuf};

use peticao::{SupplementaryFields, WorkflowSession};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Form defaults, overlaid by a fields file, overlaid by `--set` pairs.
pub fn supplementary_fields(
    file: Option<PathBuf>,
    assignments: &[String],
) -> Result<SupplementaryFields, Box<dyn std::error::Error>> {
    let mut fields = SupplementaryFields::defaults();
    if let Some(file) = file {
        fields = fields.overlay(SupplementaryFields::load(&file)?);
    }
    for assignment in assignments {
        fields.set_assignment(assignment)?;
    }
    Ok(fields)
}

/// Load an existing session; a missing file is reported with a hint.
pub fn open_session(path: &Path) -> Result<WorkflowSession, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!(
            "Session file not found: {}\nRun 'peticao generate <SOURCE> <TEMPLATE>' first.",
            path.display()
        )
        .into());
    }
    Ok(WorkflowSession::load(path)?)
}

/// Write paragraphs as a pretty JSON array of strings. Line breaks inside
/// a paragraph survive the round trip through [`read_paragraphs`].
pub fn write_paragraphs<S: AsRef<str>>(
    path: &Path,
    paragraphs: &[S],
) -> Result<(), Box<dyn std::error::Error>> {
    let paragraphs: Vec<&str> = paragraphs.iter().map(|p| p.as_ref()).collect();
    let mut json = serde_json::to_string_pretty(&paragraphs)?;
    json.push('\n');
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    Ok(())
}

/// Paragraphs of an edits file: a JSON array of strings.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let paragraphs = serde_json::from_str(&content).map_err(|e| {
        format!(
            "'{}' must be a JSON array of paragraph strings: {}",
            path.display(),
            e
        )
    })?;
    Ok(paragraphs)
}
