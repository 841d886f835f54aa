//! Per-document write serialization.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// One mutex per document name, created on first use.
///
/// Holding a name's mutex serializes writers to that document inside this
/// process only. Names never share a mutex, so unrelated documents do not
/// contend.
///
/// Entries are never evicted: names come from the fixed set of collection
/// documents, so the map stays small.
#[derive(Debug, Default)]
pub(crate) struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `name`.
    pub(crate) fn handle(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_shares_mutex() {
        let locks = KeyLocks::new();
        let a = locks.handle("people.json");
        let b = locks.handle("people.json");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_different_names_independent() {
        let locks = KeyLocks::new();
        let people = locks.handle("people.json");
        let places = locks.handle("places.json");
        assert!(!Arc::ptr_eq(&people, &places));

        let _held = people.lock();
        assert!(places.try_lock().is_some());
    }
}
