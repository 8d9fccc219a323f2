//! Scenario text language. Cards carry Hindi and Marathi translations.
use arthneeti_client::KeyValueStore;

pub const LANG_KEY: &str = "arthneeti.locale";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Hi,
    Mr,
}

impl Lang {
    pub const ALL: [Self; 3] = [Self::En, Self::Hi, Self::Mr];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Mr => "mr",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिन्दी",
            Self::Mr => "मराठी",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Saved preference, defaulting to English.
pub fn load<S: KeyValueStore>(store: &S) -> Lang {
    match store.get(LANG_KEY) {
        Ok(value) => value.as_deref().and_then(Lang::from_code).unwrap_or_default(),
        Err(err) => {
            log::warn!("failed to read language preference: {err}");
            Lang::default()
        }
    }
}

pub fn save<S: KeyValueStore>(store: &S, lang: Lang) {
    if let Err(err) = store.set(LANG_KEY, lang.code()) {
        log::warn!("failed to persist language preference: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::{LANG_KEY, Lang, load, save};
    use arthneeti_client::{KeyValueStore, MemoryStore};

    #[test]
    fn preference_round_trips_through_store() {
        let store = MemoryStore::default();
        assert_eq!(load(&store), Lang::En);
        save(&store, Lang::Mr);
        assert_eq!(load(&store), Lang::Mr);
    }

    #[test]
    fn unknown_code_falls_back_to_english() {
        let store = MemoryStore::default();
        store.set(LANG_KEY, "fr").unwrap();
        assert_eq!(load(&store), Lang::En);
        assert_eq!(Lang::from_code(" HI "), Some(Lang::Hi));
    }
}
