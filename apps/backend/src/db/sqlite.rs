//! SQLite-backed key-value store.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{KeyValueStore, Result};

/// Key-value store on a single SQLite table.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        Ok(())
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_remove() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        // Removing an absent key is not an error
        store.remove("k").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.db");

        {
            let store = SqliteKvStore::open(&path).unwrap();
            store.set("advanced-memory-active-set", "abc").unwrap();
        }

        let store = SqliteKvStore::open(&path).unwrap();
        assert_eq!(
            store.get("advanced-memory-active-set").unwrap().as_deref(),
            Some("abc")
        );
    }
}
