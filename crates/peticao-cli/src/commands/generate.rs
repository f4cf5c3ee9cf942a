//! Generate command - extract, fill the template and start review.

use std::path::{Path, PathBuf};

use colored::Colorize;
use peticao::providers::{source_for_path, template_for_path};
use peticao::{Pipeline, WorkflowSession};

use super::{supplementary_fields, CommandResult};

pub fn run(
    session_path: &Path,
    source: PathBuf,
    template: PathBuf,
    fields: Option<PathBuf>,
    set: Vec<String>,
) -> CommandResult {
    let supplementary = supplementary_fields(fields, &set)?;
    let mut session = WorkflowSession::load_or_new(session_path)?;

    let pipeline = Pipeline::new();
    let result = pipeline.generate(
        &mut session,
        source_for_path(&source).as_ref(),
        &source,
        template_for_path(&template).as_ref(),
        &template,
        &supplementary,
    );

    // Cached extraction survives a failed fill.
    session.save(session_path)?;
    let step = result?;

    let paragraphs = session.reviewable_paragraphs().len();
    println!(
        "{} {} paragraphs from {}",
        "Generated".green().bold(),
        paragraphs.to_string().white().bold(),
        template.display()
    );
    println!("Step {}/3: {} ({}%)", step, step.title(), step.progress());
    println!();
    println!(
        "Run {} to read the petition.",
        "peticao review".cyan().bold()
    );

    Ok(())
}
