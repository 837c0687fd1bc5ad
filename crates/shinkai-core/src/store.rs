//! String key-value persistence behind the watch-list and preferences.
//!
//! Mirrors the browser's `localStorage` contract: synchronous string get/set
//! with no partial writes visible to the caller.

use std::collections::HashMap;

use crate::error::ShinkaiError;

#[cfg(feature = "native")]
mod sqlite;

#[cfg(feature = "native")]
pub use sqlite::SqliteStore;

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Read the value at `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, ShinkaiError>;

    /// Write `value` at `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), ShinkaiError>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), ShinkaiError>;

    /// Write several keys as one unit, in order.
    ///
    /// If any write fails, keys already written are restored to their
    /// previous values before the error is returned. Backends with real
    /// transactions override this.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), ShinkaiError> {
        let mut written: Vec<(&str, Option<String>)> = Vec::with_capacity(entries.len());
        for &(key, ref value) in entries {
            let previous = self.get(key)?;
            if let Err(e) = self.set(key, value) {
                for (key, previous) in written.into_iter().rev() {
                    let restored = match previous {
                        Some(old) => self.set(key, &old),
                        None => self.remove(key),
                    };
                    if let Err(restore_err) = restored {
                        tracing::warn!(key, "failed to roll back partial write: {restore_err}");
                    }
                }
                return Err(e);
            }
            written.push((key, previous));
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, ShinkaiError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ShinkaiError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), ShinkaiError> {
        (**self).remove(key)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), ShinkaiError> {
        (**self).set_many(entries)
    }
}

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ShinkaiError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ShinkaiError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ShinkaiError> {
        self.entries.remove(key);
        Ok(())
    }
}
