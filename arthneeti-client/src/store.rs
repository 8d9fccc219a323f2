//! Single source of truth for the displayed session snapshot.
use crate::model::Session;

/// Holds the most recent server snapshot.
///
/// Snapshots are replaced wholesale; no field is ever patched or derived on
/// the client. `revision` increases on every change so views can cheaply
/// detect updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    current: Option<Session>,
    revision: u64,
}

impl SessionStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            revision: 0,
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn replace(&mut self, session: Session) {
        self.current = Some(session);
        self.revision += 1;
    }

    /// Replace when the response carried a snapshot; otherwise keep the old one.
    pub fn apply(&mut self, session: Option<Session>) {
        if let Some(session) = session {
            self.replace(session);
        }
    }

    pub fn discard(&mut self) {
        if self.current.take().is_some() {
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Id;
    use std::collections::BTreeMap;

    fn snapshot(wealth: i64) -> Session {
        Session {
            id: Id::new("7"),
            username: None,
            is_active: true,
            wealth,
            happiness: 60,
            credit_score: 700,
            current_month: 2,
            lifelines: 3,
            portfolio: BTreeMap::new(),
            market_prices: BTreeMap::new(),
            recurring_expenses: 0,
            financial_literacy: 0,
            active_expenses: Vec::new(),
        }
    }

    #[test]
    fn replace_is_wholesale() {
        let mut store = SessionStore::new();
        store.replace(snapshot(25_000));
        let mut next = snapshot(18_500);
        next.happiness = 41;
        store.replace(next.clone());
        assert_eq!(store.current(), Some(&next));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn missing_snapshot_keeps_previous() {
        let mut store = SessionStore::new();
        store.replace(snapshot(25_000));
        store.apply(None);
        assert_eq!(store.current().map(|s| s.wealth), Some(25_000));
        assert_eq!(store.revision(), 1);

        store.discard();
        store.discard();
        assert!(store.current().is_none());
        assert_eq!(store.revision(), 2);
    }
}
