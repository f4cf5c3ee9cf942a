//! Review command - show the generated paragraphs.

use std::path::{Path, PathBuf};

use colored::Colorize;
use peticao::Step;

use super::{open_session, write_paragraphs, CommandResult};

pub fn run(session_path: &Path, export: Option<PathBuf>) -> CommandResult {
    let session = open_session(session_path)?;

    if session.step() != Step::Review {
        return Err(format!(
            "Nothing to review: session is at step {} ({}).",
            session.step(),
            session.step().title()
        )
        .into());
    }

    let paragraphs = session.reviewable_paragraphs();

    if let Some(export) = export {
        let texts: Vec<&str> = paragraphs.iter().map(|(_, p)| *p).collect();
        write_paragraphs(&export, &texts)?;

        println!(
            "Wrote {} paragraphs to {}",
            paragraphs.len().to_string().white().bold(),
            export.display()
        );
        println!(
            "Edit the file, then run {}.",
            format!("peticao confirm --edits {}", export.display())
                .cyan()
                .bold()
        );
        return Ok(());
    }

    println!("{}", "Generated petition".cyan().bold());
    println!();
    for (index, paragraph) in &paragraphs {
        println!("{} {}", format!("{:>3}.", index).dimmed(), paragraph);
    }
    println!();
    println!(
        "Run {} to accept, or {} to edit first.",
        "peticao confirm".cyan().bold(),
        "peticao review --export <FILE>".cyan().bold()
    );

    Ok(())
}
