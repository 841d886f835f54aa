//! # AAC Core
//!
//! Core library for the AAC personalisation tools: an encrypted-at-rest JSON
//! document store and the typed collections (people, places, topics,
//! passports, conversations) kept in it.
//!
//! This crate provides the persistence layer and data models independent of
//! any HTTP or CLI surface.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation and the AES-256-CBC buffer codec
//! - **fs**: atomic whole-file replacement
//! - **storage**: `DocumentStore` trait and the encrypted file store
//! - **collections**: typed record collections and passport inputs
//! - **config**: environment-sourced store configuration
//! - **llm**: model-response extraction and provider selection

pub mod collections;
pub mod config;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod llm;
pub mod storage;

pub use config::StoreConfig;
pub use error::{AacError, Result};
pub use storage::{DocumentStore, EncryptedFileStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
