//! Output formatting helpers for the CLI.
//!
//! Collections print as a table (one summary row per record) or as JSON.

use std::io::IsTerminal;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};

use aac_core::collections::{Conversation, Passport, Person, Place, Topic};

/// One table row per record.
pub trait Summary {
    const HEADERS: &'static [&'static str];

    fn summary_row(&self) -> Vec<String>;
}

impl Summary for Person {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "ROLE", "CIRCLE"];

    fn summary_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.role.clone(),
            self.circle
                .map(|circle| u8::from(circle).to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl Summary for Place {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "TYPE", "PARTNERS"];

    fn summary_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.kind.clone(),
            self.communication_partners.len().to_string(),
        ]
    }
}

impl Summary for Topic {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "INTEREST"];

    fn summary_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            format!("{:?}", self.interest).to_lowercase(),
        ]
    }
}

impl Summary for Passport {
    const HEADERS: &'static [&'static str] = &["ID", "TITLE", "SECTIONS", "UPDATED"];

    fn summary_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.sections.len().to_string(),
            self.updated_at_utc()
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| self.updated_at.clone()),
        ]
    }
}

impl Summary for Conversation {
    const HEADERS: &'static [&'static str] = &["ID", "PARTNER", "DATE", "DURATION"];

    fn summary_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.partner_name.clone(),
            self.date.clone(),
            format!("{}s", self.duration),
        ]
    }
}

/// Render records as a table; plain ASCII when stdout is not a terminal.
pub fn render_table<T: Summary>(records: &[T]) -> String {
    let mut table = Table::new();
    if std::io::stdout().is_terminal() {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(T::HEADERS.to_vec());
    for record in records {
        table.add_row(record.summary_row());
    }
    table.to_string()
}

/// Pretty JSON for stdout.
pub fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
