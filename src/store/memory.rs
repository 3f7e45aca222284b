use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{KeyValueStore, StoreKey};
use crate::error::Result;

/// Non-durable store, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw values
    pub fn with_values(values: impl IntoIterator<Item = (StoreKey, String)>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: StoreKey) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(&key).cloned())
    }

    async fn save(&self, key: StoreKey, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key, value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_overwrites() {
        let store = MemoryStore::new();

        assert_eq!(store.load(StoreKey::Theme).await.expect("load"), None);

        store.save(StoreKey::Theme, "dark").await.expect("save");
        store.save(StoreKey::Theme, "light").await.expect("save");

        assert_eq!(
            store.load(StoreKey::Theme).await.expect("load"),
            Some("light".to_string())
        );
    }
}
