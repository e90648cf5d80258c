use crate::model::StorageError;
use crate::storage::KeyValueStore;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the database file and creates the table if needed.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// Volatile database, gone when the store is dropped.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (namespace, key)
            );
            ",
        )?;

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, namespace: &str, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (namespace, key, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![namespace, key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "DELETE FROM kv WHERE namespace = ?1 AND key = ?2",
            params![namespace, key],
        )?;
        Ok(())
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv WHERE namespace = ?1 ORDER BY key ASC")?;
        let rows = stmt.query_map(params![namespace], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_overwrite_remove() {
        let mut store = SqliteStore::in_memory().unwrap();
        assert!(store.get("cart", "a@b.com").unwrap().is_none());

        store.set("cart", "a@b.com", "[1]").unwrap();
        store.set("cart", "a@b.com", "[1,2]").unwrap();
        assert_eq!(store.get("cart", "a@b.com").unwrap().as_deref(), Some("[1,2]"));
        let stamp: String = store
            .conn
            .query_row(
                "SELECT updated_at FROM kv WHERE namespace = 'cart' AND key = 'a@b.com'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());

        store.remove("cart", "a@b.com").unwrap();
        assert!(store.get("cart", "a@b.com").unwrap().is_none());
    }

    #[test]
    fn keys_are_sorted_and_scoped() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.set("requests", "2", "b").unwrap();
        store.set("requests", "1", "a").unwrap();
        store.set("cart", "x", "c").unwrap();
        assert_eq!(store.keys("requests").unwrap(), vec!["1", "2"]);
        assert!(store.keys("session").unwrap().is_empty());
    }
}
