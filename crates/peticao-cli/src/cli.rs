//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use peticao::OutputFormat;
use std::path::PathBuf;

/// Peticao: fill a petition template from a pay statement
#[derive(Parser)]
#[command(name = "peticao")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Session file (default: peticao.session.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub session: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract and print the fields of a pay statement
    Extract {
        /// Pay statement (PDF or text)
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract fields and fill the template, then start review
    Generate {
        /// Pay statement (PDF or text)
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Petition template (DOCX or text)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Supplementary fields file (TOML or JSON)
        #[arg(long, value_name = "FILE")]
        fields: Option<PathBuf>,

        /// Override a supplementary field (key=value)
        #[arg(long, value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Show the generated paragraphs for review
    Review {
        /// Write the paragraphs to a JSON array file for editing
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },

    /// Confirm the reviewed paragraphs
    Confirm {
        /// Edited paragraphs as a JSON array (default: generated text unchanged)
        #[arg(long, value_name = "FILE")]
        edits: Option<PathBuf>,
    },

    /// Go back one step
    Back,

    /// Write the final document
    Finalize {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "docx")]
        format: OutputFormat,
    },

    /// Show workflow progress
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the review workflow over a local JSON API
    Serve {
        /// Pay statement (PDF or text)
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Petition template (DOCX or text)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Supplementary fields file (TOML or JSON)
        #[arg(long, value_name = "FILE")]
        fields: Option<PathBuf>,

        /// Override a supplementary field (key=value)
        #[arg(long, value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}
