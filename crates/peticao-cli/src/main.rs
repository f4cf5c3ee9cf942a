//! Peticao CLI - petition generator from pay statements.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "peticao=debug" } else { "peticao=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let session = peticao::workflow::session_path(cli.session);

    let result = match cli.command {
        Commands::Extract { source, json } => commands::extract::run(source, json),

        Commands::Generate {
            source,
            template,
            fields,
            set,
        } => commands::generate::run(&session, source, template, fields, set),

        Commands::Review { export } => commands::review::run(&session, export),

        Commands::Confirm { edits } => commands::confirm::run(&session, edits),

        Commands::Back => commands::back::run(&session),

        Commands::Finalize { dir, format } => commands::finalize::run(&session, dir, format),

        Commands::Status { json } => commands::status::run(&session, json),

        Commands::Serve {
            source,
            template,
            port,
            fields,
            set,
        } => commands::serve::run(&session, source, template, port, fields, set),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
