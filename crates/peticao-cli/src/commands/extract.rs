//! Extract command - print the fields of a pay statement.

use std::path::PathBuf;

use colored::Colorize;
use peticao::providers::source_for_path;
use peticao::Pipeline;

use super::CommandResult;

pub fn run(source: PathBuf, json_output: bool) -> CommandResult {
    let provider = source_for_path(&source);
    let fields = Pipeline::new().extract(provider.as_ref(), &source)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Fields extracted from".cyan().bold(),
        source.display().to_string().white()
    );
    println!();

    let rows = fields.display_rows();
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (field, value) in rows {
        println!("  {}  {}", format!("{:width$}", field, width = width).yellow(), value);
    }

    Ok(())
}
