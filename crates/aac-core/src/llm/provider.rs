//! Completion provider capability and configuration-driven selection.
//!
//! The HTTP transports for OpenAI and Gemini live outside this crate; they
//! plug in through [`CompletionProvider`]. This module decides *which*
//! provider runs, and supplies the demo provider used when no API key is
//! configured.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::extract::{extract_as, ExtractionError};
use crate::collections::Person;

/// Variable selecting the provider (`openai` or `gemini`).
pub const PROVIDER_ENV: &str = "LLM_PROVIDER";
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown LLM provider {0:?} (expected \"openai\" or \"gemini\")")]
    UnknownProvider(String),

    #[error("completion request failed: {0}")]
    Transport(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// Variable carrying this provider's API key.
    pub fn key_env(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => OPENAI_KEY_ENV,
            ProviderKind::Gemini => GEMINI_KEY_ENV,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            _ => Err(ProviderError::UnknownProvider(s.to_string())),
        }
    }
}

/// Provider choice plus its key, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
}

impl ProviderSettings {
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = match lookup(PROVIDER_ENV).filter(|value| !value.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => ProviderKind::OpenAi,
        };
        let api_key = lookup(kind.key_env()).filter(|value| !value.trim().is_empty());
        Ok(Self { kind, api_key })
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// What the questionnaire knows when asking for the next question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContext {
    pub previous_questions: Vec<String>,
    pub previous_answers: Vec<String>,
    pub current_question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<Person>,
}

/// The next adaptive question and answers to offer for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveQuestion {
    pub question: String,
    #[serde(default)]
    pub suggested_answers: Vec<String>,
}

/// Something that turns a question context into model free text.
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    fn complete(&self, context: &QuestionContext) -> Result<String, ProviderError>;
}

/// Fixed answer used when no provider key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoProvider;

pub const DEMO_QUESTION: &str = "[DEMO] What is one goal you have for improving communication?";

pub const DEMO_SUGGESTED_ANSWERS: [&str; 3] = [
    "Initiate more conversations",
    "Express feelings independently",
    "Participate in group activities",
];

impl CompletionProvider for DemoProvider {
    fn name(&self) -> &str {
        "demo"
    }

    fn complete(&self, _context: &QuestionContext) -> Result<String, ProviderError> {
        let question = AdaptiveQuestion {
            question: DEMO_QUESTION.to_string(),
            suggested_answers: DEMO_SUGGESTED_ANSWERS.iter().map(|s| s.to_string()).collect(),
        };
        serde_json::to_string(&question).map_err(|e| ProviderError::Transport(e.to_string()))
    }
}

/// Pick the provider for this process.
///
/// `remote` builds the real transport and is only called when an API key is
/// configured for the selected kind; otherwise the demo provider is used.
pub fn select_provider<F>(settings: &ProviderSettings, remote: F) -> Box<dyn CompletionProvider>
where
    F: FnOnce(ProviderKind, String) -> Box<dyn CompletionProvider>,
{
    match &settings.api_key {
        Some(key) => remote(settings.kind, key.clone()),
        None => {
            warn!(
                provider = ?settings.kind,
                var = settings.kind.key_env(),
                "no API key set, using demo question provider"
            );
            Box::new(DemoProvider)
        }
    }
}

/// Ask `provider` for the next question and parse its reply.
pub fn next_question(
    provider: &dyn CompletionProvider,
    context: &QuestionContext,
) -> Result<AdaptiveQuestion, ProviderError> {
    let text = provider.complete(context)?;
    Ok(extract_as(&text)?)
}
