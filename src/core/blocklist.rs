use indexmap::IndexSet;

use crate::core::error::ClientError;
use crate::core::prefs::{self, PrefStore};

/// Contacts hidden from the directory and search results.
///
/// Client-only: the server knows nothing about it. Persisted under one
/// store key shared by every account on this machine, so two users logging
/// in on the same device see the same list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSet {
    emails: IndexSet<String>,
}

impl BlockSet {
    pub fn load(store: &dyn PrefStore) -> Result<Self, ClientError> {
        let emails = prefs::load_blocked_users(store)?;
        Ok(BlockSet {
            emails: emails.into_iter().collect(),
        })
    }

    pub fn persist(&self, store: &mut dyn PrefStore) -> Result<(), ClientError> {
        prefs::save_blocked_users(store, &self.emails)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    /// Returns false if the email was already blocked.
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        self.emails.insert(email.into())
    }

    /// Returns false if the email was not blocked.
    pub fn remove(&mut self, email: &str) -> bool {
        self.emails.shift_remove(email)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}
