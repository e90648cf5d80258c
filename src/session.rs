use crate::model::{Role, Session, StorageError};
use crate::storage::{load_json, save_json, KeyValueStore};
use chrono::Utc;

const NAMESPACE: &str = "session";
const CURRENT: &str = "current";

impl Session {
    pub fn start(email: &str, name: &str, role: Role) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            name: name.trim().to_string(),
            role,
            started_at: Utc::now(),
        }
    }

    pub fn current(store: &dyn KeyValueStore) -> Result<Option<Session>, StorageError> {
        load_json(store, NAMESPACE, CURRENT)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, NAMESPACE, CURRENT, self)
    }

    pub fn end(store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.remove(NAMESPACE, CURRENT)
    }
}
