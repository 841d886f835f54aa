//! Pull the JSON payload out of a model response.

use aac_core::llm::extract_json;

use crate::cli::ExtractArgs;
use crate::errors::CliError;
use crate::helpers::{file_or_stdin, read_stdin};
use crate::output::to_pretty_json;

pub fn handle_extract(args: &ExtractArgs) -> anyhow::Result<()> {
    let text = match &args.input {
        Some(path) => file_or_stdin(path)?,
        None => read_stdin()?,
    };
    let value = extract_json(&text).map_err(|e| CliError::invalid_input(e.to_string()))?;
    println!("{}", to_pretty_json(&value)?);
    Ok(())
}
