//! Storage abstraction for AAC documents.
//!
//! This module defines the `DocumentStore` trait and its encrypted file
//! implementation.
//!
//! ## Architecture
//!
//! - **traits**: the read / write / update contract
//! - **encrypted_file**: AES-256-CBC sealed JSON files in a data directory
//! - **secret**: where the encryption secret comes from
//! - **names**: document name validation
//!
//! ## Security
//!
//! Storage engines are responsible for:
//! - Encryption at rest (no plaintext modes)
//! - Atomic whole-document replacement
//! - Telling "never written" apart from "cannot be decrypted"

pub mod encrypted_file;
mod locks;
pub mod names;
pub mod secret;
pub mod traits;

pub use encrypted_file::EncryptedFileStore;
pub use names::validate_name;
pub use secret::{EnvSecret, SecretSource, StaticSecret};
pub use traits::DocumentStore;
