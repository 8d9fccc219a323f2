//! Durable pointer to the player's in-progress session.
//!
//! Only the session id is persisted; every other piece of game state is
//! re-fetched from the server on resume.
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use crate::model::Id;

pub const SESSION_KEY: &str = "arthneeti_session_id";
pub const USERNAME_KEY: &str = "username";

/// String key-value persistence provided by the platform.
pub trait KeyValueStore {
    type Error: std::error::Error + 'static;

    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the removal.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Saves, loads and clears the in-progress session id.
///
/// Storage failures are logged and swallowed: losing the pointer only costs
/// the player an automatic resume, never game state.
#[derive(Debug, Clone)]
pub struct SessionPointer<S> {
    store: S,
}

impl<S: KeyValueStore> SessionPointer<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&self, id: &Id) {
        if let Err(err) = self.store.set(SESSION_KEY, id.as_str()) {
            log::warn!("failed to persist session pointer: {err}");
        }
    }

    /// The saved id, ignoring blank entries.
    #[must_use]
    pub fn load(&self) -> Option<Id> {
        match self.store.get(SESSION_KEY) {
            Ok(value) => value
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
                .map(Id::from),
            Err(err) => {
                log::warn!("failed to read session pointer: {err}");
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.store.remove(SESSION_KEY) {
            log::warn!("failed to clear session pointer: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_survives_a_new_handle_on_the_same_store() {
        let store = MemoryStore::default();
        SessionPointer::new(store.clone()).save(&Id::new("42"));

        let reopened = SessionPointer::new(store.clone());
        assert_eq!(reopened.load(), Some(Id::new("42")));

        reopened.clear();
        assert_eq!(SessionPointer::new(store.clone()).load(), None);
        assert!(!store.contains(SESSION_KEY));
    }

    #[test]
    fn blank_entries_are_ignored() {
        let store = MemoryStore::default();
        store.set(SESSION_KEY, "   ").unwrap();
        assert_eq!(SessionPointer::new(store).load(), None);
    }

    #[test]
    fn clearing_an_empty_pointer_is_harmless() {
        let pointer = SessionPointer::new(MemoryStore::default());
        pointer.clear();
        assert_eq!(pointer.load(), None);
    }
}
