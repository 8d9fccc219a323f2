use arthneeti_client::AuthProvider;
use arthneeti_client::KeyValueStore;
use arthneeti_client::pointer::USERNAME_KEY;

use super::LocalStore;

pub const TOKEN_KEY: &str = "auth_token";

/// Login token and display name kept next to the session pointer.
#[derive(Debug, Clone, Default)]
pub struct BrowserAuth<S = LocalStore> {
    store: S,
}

impl<S: KeyValueStore> BrowserAuth<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|text| !text.trim().is_empty()),
            Err(err) => {
                log::warn!("failed to read {key}: {err}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            log::warn!("failed to persist {key}: {err}");
        }
    }

    fn forget(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            log::warn!("failed to remove {key}: {err}");
        }
    }
}

impl<S: KeyValueStore> AuthProvider for BrowserAuth<S> {
    fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    fn username(&self) -> Option<String> {
        self.read(USERNAME_KEY)
    }

    fn sign_in(&self, token: &str, username: &str) {
        self.write(TOKEN_KEY, token);
        self.write(USERNAME_KEY, username);
    }

    fn sign_out(&self) {
        self.forget(TOKEN_KEY);
        self.forget(USERNAME_KEY);
    }
}
