//! Collection commands: list, add, replace, remove.

use aac_core::collections::{Collection, Conversation, Passport, Person, Place, Record, Topic};

use crate::app::AppContext;
use crate::cli::{AddArgs, CollectionKind, ListArgs, RemoveArgs, ReplaceArgs};
use crate::errors::CliError;
use crate::helpers::{ensure_id, file_or_stdin, literal_or_stdin, parse_json_input};
use crate::output::{render_table, to_pretty_json, Summary};

/// Run a generic handler with the record type behind a collection.
macro_rules! with_record_type {
    ($kind:expr, $handler:ident($($arg:expr),*)) => {
        match $kind {
            CollectionKind::People | CollectionKind::Partners => $handler::<Person>($($arg),*),
            CollectionKind::Places => $handler::<Place>($($arg),*),
            CollectionKind::Topics => $handler::<Topic>($($arg),*),
            CollectionKind::Passports => $handler::<Passport>($($arg),*),
            CollectionKind::Conversations => $handler::<Conversation>($($arg),*),
        }
    };
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    with_record_type!(args.collection, list(ctx, args.collection.document(), args.json))
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let input = literal_or_stdin(&args.record)?;
    with_record_type!(args.collection, add(ctx, args.collection.document(), &input))
}

pub fn handle_replace(ctx: &AppContext, args: &ReplaceArgs) -> anyhow::Result<()> {
    let input = file_or_stdin(&args.input)?;
    with_record_type!(args.collection, replace(ctx, args.collection.document(), &input))
}

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let removed = with_record_type!(args.collection, remove(ctx, args.collection.document(), &args.id))?;
    if !removed {
        return Err(CliError::not_found(
            format!("No record with id {} in {}", args.id, args.collection.document()),
            "Hint: Run `aac list <COLLECTION>` to see record ids.",
        )
        .into());
    }
    if !ctx.quiet() {
        println!("Removed {} from {}", args.id, args.collection.document());
    }
    Ok(())
}

fn list<T: Record + Summary>(ctx: &AppContext, name: &str, json: bool) -> anyhow::Result<()> {
    let store = ctx.open_store();
    let records = Collection::<_, T>::at(&store, name).list()?;

    if json {
        println!("{}", to_pretty_json(&records)?);
    } else if records.is_empty() {
        if !ctx.quiet() {
            println!("No records in {}", name);
        }
    } else {
        println!("{}", render_table(&records));
    }
    Ok(())
}

fn add<T: Record>(ctx: &AppContext, name: &str, input: &str) -> anyhow::Result<()> {
    let mut value = parse_json_input(input)?;
    let id = ensure_id(&mut value)?;
    let record: T = serde_json::from_value(value)
        .map_err(|e| CliError::invalid_input(format!("Record does not fit {}: {}", name, e)))?;

    let store = ctx.open_store();
    Collection::<_, T>::at(&store, name).add(record)?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        println!("Added {} to {}", id, name);
    }
    Ok(())
}

fn replace<T: Record>(ctx: &AppContext, name: &str, input: &str) -> anyhow::Result<()> {
    let value = parse_json_input(input)?;
    let records: Vec<T> = serde_json::from_value(value).map_err(|e| {
        CliError::invalid_input(format!("Expected a JSON array of {} records: {}", name, e))
    })?;

    let store = ctx.open_store();
    Collection::<_, T>::at(&store, name).replace_all(&records)?;

    if !ctx.quiet() {
        println!("Replaced {} with {} record(s)", name, records.len());
    }
    Ok(())
}

fn remove<T: Record>(ctx: &AppContext, name: &str, id: &str) -> anyhow::Result<bool> {
    let store = ctx.open_store();
    Ok(Collection::<_, T>::at(&store, name).remove(id)?)
}
