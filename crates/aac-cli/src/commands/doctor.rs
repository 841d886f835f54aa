//! Integrity check over every stored document.

use serde_json::Value;
use tracing::debug;

use aac_core::config::SECRET_ENV;
use aac_core::DocumentStore;

use crate::app::AppContext;
use crate::errors::CliError;

pub fn handle_doctor(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store();
    let names = store.list_documents()?;

    if !ctx.quiet() {
        println!("Data directory: {}", ctx.data_dir().display());
        if ctx.using_development_secret() {
            println!(
                "Warning: {} is not set; documents use the development secret",
                SECRET_ENV
            );
        }
    }

    let mut corrupt = Vec::new();
    for name in &names {
        match store.read::<Value>(name) {
            Ok(_) => {
                if !ctx.quiet() {
                    println!("  OK       {}", name);
                }
            }
            Err(err) if err.is_corrupt() => {
                debug!(document = %name, error = %err, "document failed integrity check");
                println!("  CORRUPT  {}", name);
                corrupt.push(name.clone());
            }
            Err(err) => return Err(err.into()),
        }
    }

    if !corrupt.is_empty() {
        return Err(CliError::corrupt(
            format!("{} of {} document(s) failed to decrypt or parse", corrupt.len(), names.len()),
            format!(
                "Hint: Check {} matches the secret the data was written with.",
                SECRET_ENV
            ),
        )
        .into());
    }

    if !ctx.quiet() {
        println!("{} document(s) checked", names.len());
    }
    Ok(())
}
