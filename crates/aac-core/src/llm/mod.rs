//! Helpers for the boundary with the external language-model service.
//!
//! Nothing here talks to a network. `extract` turns model free text into
//! JSON with an explicit error contract; `provider` is the capability
//! interface transports implement and the configuration-driven choice
//! between them.

pub mod extract;
pub mod provider;

pub use extract::{extract_as, extract_json, ExtractionError};
pub use provider::{
    next_question, select_provider, AdaptiveQuestion, CompletionProvider, DemoProvider,
    ProviderError, ProviderKind, ProviderSettings, QuestionContext,
};
