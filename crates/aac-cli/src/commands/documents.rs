//! Raw document commands and the passport questionnaire data.

use serde_json::Value;

use aac_core::collections::{load_passport_data, save_passport_answer};
use aac_core::DocumentStore;

use crate::app::AppContext;
use crate::cli::{AnswerArgs, ShowArgs};
use crate::output::to_pretty_json;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.open_store();
    let document: Option<Value> = store.read(&args.name)?;
    // A document that was never written prints as null.
    println!("{}", to_pretty_json(&document)?);
    Ok(())
}

pub fn handle_documents(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store();
    let names = store.list_documents()?;

    if names.is_empty() && !ctx.quiet() {
        println!("No documents in {}", ctx.data_dir().display());
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub fn handle_passport_data(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store();
    let data = load_passport_data(&store)?;
    println!("{}", to_pretty_json(&data)?);
    Ok(())
}

pub fn handle_answer(ctx: &AppContext, args: &AnswerArgs) -> anyhow::Result<()> {
    let store = ctx.open_store();
    let answers = save_passport_answer(&store, args.question, &args.answer)?;
    if !ctx.quiet() {
        println!(
            "Saved answer to question {} ({} answered)",
            args.question,
            answers.len()
        );
    }
    Ok(())
}
