//! Inputs for communication passport generation.
//!
//! A passport is built from the partner list and the answers given in the
//! passport questionnaire. Both live in their own documents and default to
//! empty when nothing has been saved yet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::Person;
use crate::error::Result;
use crate::storage::DocumentStore;

/// Document holding the partners offered in the passport flow.
pub const PARTNERS_DOCUMENT: &str = "partners.json";

/// Document mapping questionnaire question numbers to answers.
pub const PASSPORT_ANSWERS_DOCUMENT: &str = "passport-answers.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassportData {
    pub partners: Vec<Person>,
    pub answers: BTreeMap<u32, String>,
}

/// Load partners and answers, defaulting each to empty when missing.
///
/// A corrupt document in either place fails the whole load.
pub fn load_passport_data<S: DocumentStore>(store: &S) -> Result<PassportData> {
    let partners = store.read(PARTNERS_DOCUMENT)?.unwrap_or_default();
    let answers = store.read(PASSPORT_ANSWERS_DOCUMENT)?.unwrap_or_default();
    Ok(PassportData { partners, answers })
}

/// Record the answer to one questionnaire question, replacing any earlier one.
pub fn save_passport_answer<S: DocumentStore>(
    store: &S,
    question: u32,
    answer: &str,
) -> Result<BTreeMap<u32, String>> {
    store.update(
        PASSPORT_ANSWERS_DOCUMENT,
        |existing: Option<BTreeMap<u32, String>>| {
            let mut answers = existing.unwrap_or_default();
            answers.insert(question, answer.to_string());
            answers
        },
    )
}
