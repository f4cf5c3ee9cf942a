//! Back command - return to the previous step.

use std::path::Path;

use colored::Colorize;

use super::{open_session, CommandResult};

pub fn run(session_path: &Path) -> CommandResult {
    let mut session = open_session(session_path)?;

    let before = session.step();
    let step = session.back();
    session.save(session_path)?;

    if before == step {
        println!("{}", "Already at the first step.".yellow());
    } else {
        println!("Step {}/3: {} ({}%)", step, step.title(), step.progress());
    }

    Ok(())
}
