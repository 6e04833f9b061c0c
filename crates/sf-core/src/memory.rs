//! In-process `KeyValueStore`. Used by tests and by the `memory` storage backend.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::traits::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, e.g. with deliberately malformed data in tests.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.get(key).map(|v| v.value().clone()))
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
