//! Document store trait definition.
//!
//! The `DocumentStore` trait is the whole contract the collection layer
//! (and anything standing in for the HTTP API) sees: read a whole document,
//! replace a whole document, or read-transform-write it. It knows nothing
//! about entity schemas or routing.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Named JSON documents persisted as whole units.
///
/// All implementations must ensure:
/// - A document that was never written reads as `None`, not an error
/// - A document that exists but cannot be decoded is `AacError::CorruptData`
/// - Writes replace the previous value entirely (no merge)
pub trait DocumentStore: Send + Sync {
    /// Load the named document.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if nothing has been written under `name` yet.
    ///
    /// # Errors
    ///
    /// - `AacError::CorruptData` if the stored bytes do not decrypt or do not
    ///   parse as `T` (wrong secret, truncation, tampering)
    /// - `AacError::Io` for any other filesystem failure
    /// - `AacError::InvalidName` if `name` is not a plain filename
    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>>;

    /// Serialize `value` and persist it, replacing any prior content.
    ///
    /// # Errors
    ///
    /// - `AacError::Io` on filesystem or permission failures
    /// - `AacError::Serialization` if `value` cannot be turned into JSON
    /// - `AacError::InvalidName` if `name` is not a plain filename
    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()>;

    /// Read the document, pass it through `transform`, write the result.
    ///
    /// `transform` receives `None` when the document does not exist yet and
    /// must return the complete new value, which is also returned to the
    /// caller. Read errors abort before `transform` runs.
    ///
    /// The default composition takes no lock; implementations that can
    /// serialize same-name updates should override it.
    fn update<T, F>(&self, name: &str, transform: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> T,
    {
        let current = self.read(name)?;
        let next = transform(current);
        self.write(name, &next)?;
        Ok(next)
    }

    /// Names of all documents currently stored, sorted.
    fn list_documents(&self) -> Result<Vec<String>>;
}
