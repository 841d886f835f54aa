//! Typed entity collections over the document store.
//!
//! Each collection is one document holding a JSON array of records. There is
//! no in-memory copy: every call starts from what is on disk, and every
//! change rewrites the whole array.

pub mod passport_data;
pub mod types;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::storage::DocumentStore;

pub use passport_data::{
    load_passport_data, save_passport_answer, PassportData, PARTNERS_DOCUMENT,
    PASSPORT_ANSWERS_DOCUMENT,
};
pub use types::{
    Circle, Conversation, Frequency, Interest, Passport, PassportSection, Person, Place, Topic,
};

/// A record type that lives in its own collection document.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Document name holding the collection.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

impl Record for Person {
    const COLLECTION: &'static str = "people.json";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Place {
    const COLLECTION: &'static str = "places.json";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Topic {
    const COLLECTION: &'static str = "topics.json";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Passport {
    const COLLECTION: &'static str = "passports.json";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Conversation {
    const COLLECTION: &'static str = "conversations.json";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Read/append/replace access to one collection document.
pub struct Collection<'a, S: DocumentStore, T: Record> {
    store: &'a S,
    name: &'a str,
    _record: PhantomData<fn() -> T>,
}

impl<'a, S: DocumentStore, T: Record> Collection<'a, S, T> {
    /// The collection at `T::COLLECTION`.
    pub fn new(store: &'a S) -> Self {
        Self::at(store, T::COLLECTION)
    }

    /// The same record type stored under a different document name.
    pub fn at(store: &'a S, name: &'a str) -> Self {
        Self {
            store,
            name,
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// All records; empty when the document has never been written.
    pub fn list(&self) -> Result<Vec<T>> {
        Ok(self.store.read(self.name)?.unwrap_or_default())
    }

    /// Append one record and return it.
    pub fn add(&self, record: T) -> Result<T> {
        debug!(collection = self.name, id = record.id(), "adding record");
        self.store.update(self.name, |existing: Option<Vec<T>>| {
            let mut records = existing.unwrap_or_default();
            records.push(record.clone());
            records
        })?;
        Ok(record)
    }

    /// Replace the whole collection.
    pub fn replace_all(&self, records: &[T]) -> Result<()> {
        debug!(collection = self.name, count = records.len(), "replacing collection");
        self.store.write(self.name, records)
    }

    /// First record with the given id.
    pub fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.list()?.into_iter().find(|record| record.id() == id))
    }

    /// Drop every record with the given id. Returns whether any was removed.
    ///
    /// A collection that was never written is left absent.
    pub fn remove(&self, id: &str) -> Result<bool> {
        if self.store.read::<Vec<T>>(self.name)?.is_none() {
            return Ok(false);
        }

        let mut removed = false;
        self.store.update(self.name, |existing: Option<Vec<T>>| {
            let mut records = existing.unwrap_or_default();
            let before = records.len();
            records.retain(|record| record.id() != id);
            removed = records.len() != before;
            records
        })?;
        if removed {
            debug!(collection = self.name, id, "removed record");
        }
        Ok(removed)
    }
}
