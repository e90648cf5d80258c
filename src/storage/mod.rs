// Namespaced key-value persistence for cart, session and request records.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::model::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait KeyValueStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, namespace: &str, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;
    /// Keys of a namespace in ascending order.
    fn keys(&self, namespace: &str) -> Result<Vec<String>, StorageError>;
}

pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    namespace: &str,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(namespace, key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    namespace: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(namespace, key, &raw)
}
