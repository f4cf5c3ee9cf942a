//! Confirm command - accept the reviewed paragraphs.

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::{open_session, read_paragraphs, CommandResult};

pub fn run(session_path: &Path, edits: Option<PathBuf>) -> CommandResult {
    let mut session = open_session(session_path)?;

    let edits = edits.map(|path| read_paragraphs(&path)).transpose()?;
    let step = session.confirm_edits(edits)?;
    session.save(session_path)?;

    let kept = session.edited_paragraphs.as_ref().map(Vec::len).unwrap_or(0);
    println!(
        "{} {} paragraphs",
        "Confirmed".green().bold(),
        kept.to_string().white().bold()
    );
    println!("Step {}/3: {} ({}%)", step, step.title(), step.progress());
    println!();
    println!(
        "Run {} to write the document.",
        "peticao finalize".cyan().bold()
    );

    Ok(())
}
