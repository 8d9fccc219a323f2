use arthneeti_client::KeyValueStore;
use thiserror::Error;
use web_sys::Storage;

use crate::dom;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("localStorage rejected `{key}`: {reason}")]
    Rejected { key: String, reason: String },
}

/// `window.localStorage` as a key-value store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStore;

impl LocalStore {
    fn handle() -> Result<Storage, StorageError> {
        dom::local_storage().map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))
    }
}

fn rejected(key: &str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Rejected {
        key: key.to_string(),
        reason: dom::js_error_message(err),
    }
}

impl KeyValueStore for LocalStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::handle()?
            .get_item(key)
            .map_err(|err| rejected(key, &err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::handle()?
            .set_item(key, value)
            .map_err(|err| rejected(key, &err))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        Self::handle()?
            .remove_item(key)
            .map_err(|err| rejected(key, &err))
    }
}
