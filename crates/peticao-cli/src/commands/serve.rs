//! Serve command - drive the workflow over a local JSON API.

use std::path::{Path, PathBuf};

use colored::Colorize;
use peticao::WorkflowSession;

use super::{supplementary_fields, CommandResult};
use crate::server::{app, state::AppState};

pub fn run(
    session_path: &Path,
    source: PathBuf,
    template: PathBuf,
    port: u16,
    fields: Option<PathBuf>,
    set: Vec<String>,
) -> CommandResult {
    for path in [&source, &template] {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()).into());
        }
    }

    let supplementary = supplementary_fields(fields, &set)?;
    let session = WorkflowSession::load_or_new(session_path)?;
    tracing::debug!(step = %session.step(), path = %session_path.display(), "session opened");

    let state = AppState::new(
        session,
        session_path.to_path_buf(),
        source.clone(),
        template.clone(),
        supplementary,
    );

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting review server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Source:   {}", source.display());
    println!("  Template: {}", template.display());
    println!("  Session:  {}", session_path.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let state_clone = state.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            if let Err(e) = state_clone.save().await {
                eprintln!("Error saving: {}", e);
            }
            std::process::exit(0);
        });

        app::run_server(state, port).await
    })?;

    Ok(())
}
