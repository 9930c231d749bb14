use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::ClientError;
use crate::core::models::UserIdentity;

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const BLOCKED_USERS_KEY: &str = "blockedUsers";

/// Schema DDL run on open.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS prefs (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// Process-wide keyed string storage with no expiry.
pub trait PrefStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&mut self, key: &str) -> Result<(), ClientError>;
}

// ---------------------------------------------------------------------------
// SQLite-backed store
// ---------------------------------------------------------------------------

pub struct SqlitePrefStore {
    conn: Connection,
}

impl SqlitePrefStore {
    /// Open (or create) `prefs.db` under the XDG data dir.
    pub fn open() -> Result<Self, ClientError> {
        let dir = Self::resolve_path();
        std::fs::create_dir_all(&dir)
            .map_err(|e| ClientError::Storage(format!("Failed to create data dir: {e}")))?;
        Self::open_at(&dir.join("prefs.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self, ClientError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, ClientError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, ClientError> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqlitePrefStore { conn })
    }

    fn resolve_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("palaver")
    }
}

impl PrefStore for SqlitePrefStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let value = self
            .conn
            .query_row("SELECT value FROM prefs WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.conn.execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ClientError> {
        self.conn
            .execute("DELETE FROM prefs WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Used when the database can't be opened, and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefStore {
    values: HashMap<String, String>,
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ClientError> {
        self.values.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Typed accessors for the two keys the client uses
// ---------------------------------------------------------------------------

pub fn load_current_user(store: &dyn PrefStore) -> Result<Option<UserIdentity>, ClientError> {
    match store.get(CURRENT_USER_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn save_current_user(store: &mut dyn PrefStore, user: &UserIdentity) -> Result<(), ClientError> {
    let raw = serde_json::to_string(user)?;
    store.set(CURRENT_USER_KEY, &raw)
}

pub fn clear_current_user(store: &mut dyn PrefStore) -> Result<(), ClientError> {
    store.remove(CURRENT_USER_KEY)
}

pub fn load_blocked_users(store: &dyn PrefStore) -> Result<Vec<String>, ClientError> {
    match store.get(BLOCKED_USERS_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

pub fn save_blocked_users<'a, I>(store: &mut dyn PrefStore, emails: I) -> Result<(), ClientError>
where
    I: IntoIterator<Item = &'a String>,
{
    let list: Vec<&String> = emails.into_iter().collect();
    let raw = serde_json::to_string(&list)?;
    store.set(BLOCKED_USERS_KEY, &raw)
}
