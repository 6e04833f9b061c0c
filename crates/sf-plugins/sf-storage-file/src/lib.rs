//! # sf-storage-file
//!
//! Local filesystem implementation of `KeyValueStore`.
//! Each slot is one file, `<root>/<key>.json`, replaced whole on every write.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{bail, Context};
use async_trait::async_trait;
use sf_core::traits::KeyValueStore;
use tokio::fs;

pub struct FileKeyValueStore {
    /// Directory holding one file per slot (e.g., "./data")
    root_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root_path: root }
    }

    /// Maps a key to its file, refusing anything that could escape `root_path`.
    fn slot_path(&self, key: &str) -> anyhow::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            bail!("invalid slot key {key:?}");
        }
        Ok(self.root_path.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Writes to a temporary sibling and renames it over the slot, so a
    /// crash mid-write leaves the previous contents readable.
    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.root_path)
            .await
            .with_context(|| format!("creating {}", self.root_path.display()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("replacing {}", path.display()))?;

        tracing::debug!(slot = key, bytes = value.len(), "slot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::{NewSponsor, SponsorStore, Tier};
    use std::sync::Arc;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("sf-storage-file-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_slot_reads_as_none() {
        let store = FileKeyValueStore::new(scratch_dir());
        assert_eq!(store.get_item("sportify_sponsors").await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_creates_directory_and_round_trips() {
        let dir = scratch_dir();
        let store = FileKeyValueStore::new(dir.join("nested"));
        store.set_item("slot", "[1,2,3]").await.unwrap();
        store.set_item("slot", "[]").await.unwrap();

        assert_eq!(store.get_item("slot").await.unwrap().as_deref(), Some("[]"));
        assert!(!dir.join("nested/slot.json.tmp").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn path_like_keys_are_refused() {
        let store = FileKeyValueStore::new(scratch_dir());
        for key in ["../etc/passwd", "a/b", "", ".hidden"] {
            assert!(store.set_item(key, "x").await.is_err(), "{key}");
        }
    }

    #[tokio::test]
    async fn sponsor_store_persists_across_instances() {
        let dir = scratch_dir();
        let first = SponsorStore::new(Arc::new(FileKeyValueStore::new(dir.clone())));
        first.seed_if_empty().await.unwrap();
        let added = first
            .add(
                NewSponsor {
                    company: "Disk Co".into(),
                    tier: Tier::Gold,
                    amount_lkr: 75_000,
                    website: None,
                },
                None,
            )
            .await
            .unwrap();

        let second = SponsorStore::new(Arc::new(FileKeyValueStore::new(dir.clone())));
        assert!(!second.seed_if_empty().await.unwrap());
        assert_eq!(second.list().await.first(), Some(&added));
        let _ = std::fs::remove_dir_all(dir);
    }
}
