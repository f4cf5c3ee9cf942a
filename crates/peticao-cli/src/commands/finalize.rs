//! Finalize command - write the final document.

use std::path::{Path, PathBuf};

use colored::Colorize;
use peticao::providers::assembler_for_format;
use peticao::{OutputFormat, Pipeline};

use super::{open_session, CommandResult};

pub fn run(session_path: &Path, dir: PathBuf, format: OutputFormat) -> CommandResult {
    let session = open_session(session_path)?;

    let assembler = assembler_for_format(format);
    let artifact = Pipeline::new().finalize(&session, assembler.as_ref())?;

    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create '{}': {}", dir.display(), e))?;
    let output = dir.join(&artifact.file_name);
    std::fs::write(&output, &artifact.bytes)
        .map_err(|e| format!("Failed to write '{}': {}", output.display(), e))?;

    println!(
        "{} {} ({} bytes)",
        "Wrote".green().bold(),
        output.display().to_string().white().bold(),
        artifact.bytes.len()
    );

    Ok(())
}
