//! Status command - show workflow progress.

use std::path::Path;

use colored::Colorize;
use peticao::Step;

use super::{open_session, CommandResult};

pub fn run(session_path: &Path, json_output: bool) -> CommandResult {
    let session = open_session(session_path)?;
    let step = session.step();

    if json_output {
        let status = serde_json::json!({
            "session": session_path.display().to_string(),
            "step": step.number(),
            "title": step.title(),
            "progress": step.progress(),
            "source": session.source_path,
            "source_hash": session.source_hash,
            "template": session.template_path,
            "artifacts": {
                "extracted_fields": session.extracted_fields.as_ref().map(|f| f.len()),
                "generated_paragraphs": session.generated_paragraphs.as_ref().map(Vec::len),
                "edited_paragraphs": session.edited_paragraphs.as_ref().map(Vec::len),
            },
            "updated_at": session.updated_at.to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Workflow status for".cyan().bold(),
        session_path.display().to_string().white()
    );
    println!();

    let bar_width = 30;
    let filled = (step.progress() as usize * bar_width) / 100;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);
    println!(
        "Step {}/3: {} {} ({}%)",
        step.to_string().white().bold(),
        step.title(),
        bar.cyan(),
        step.progress()
    );
    println!();

    if let Some(source) = &session.source_path {
        println!("  Source:   {}", source.display());
    }
    if let Some(template) = &session.template_path {
        println!("  Template: {}", template.display());
    }
    println!();

    println!("{}", "Artifacts:".yellow().bold());
    print_artifact("Extracted fields", session.extracted_fields.as_ref().map(|f| f.len()));
    print_artifact(
        "Generated paragraphs",
        session.generated_paragraphs.as_ref().map(Vec::len),
    );
    print_artifact(
        "Edited paragraphs",
        session.edited_paragraphs.as_ref().map(Vec::len),
    );
    println!();

    let next = match step {
        Step::Extract => "peticao generate <SOURCE> <TEMPLATE>",
        Step::Review => "peticao review",
        Step::Finalize => "peticao finalize",
    };
    println!("Next: {}", next.cyan().bold());

    Ok(())
}

fn print_artifact(label: &str, count: Option<usize>) {
    match count {
        Some(n) => println!("  {:<21} {}", format!("{}:", label), n.to_string().green()),
        None => println!("  {:<21} {}", format!("{}:", label), "none".dimmed()),
    }
}
