//! # Sponsor Record Store
//!
//! Keeps the sponsor list as one JSON array in a single named slot of a
//! [`KeyValueStore`]. Reads always come back sorted newest first.
//!
//! # Developer Note
//! `add` is a read-modify-write with no lock around it. Two writers sharing
//! the same slot (two processes, two browser tabs) can lose each other's
//! records. The storage port offers no compare-and-swap to do better.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{NewSponsor, SponsorRecord};
use crate::traits::KeyValueStore;

/// Slot name used when the configuration does not override it.
pub const DEFAULT_SLOT_KEY: &str = "sportify_sponsors";

/// Demo sponsors written into an empty slot.
pub const SEED_JSON: &str = include_str!("../data/sponsors.json");

#[derive(Clone)]
pub struct SponsorStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl SponsorStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the seed dataset if the slot was never initialized.
    ///
    /// Returns `true` when seeding happened. An empty string counts as
    /// uninitialized; anything else, even malformed JSON, is left alone.
    pub async fn seed_if_empty(&self) -> Result<bool> {
        let existing = self.read_slot().await?;
        if existing.as_deref().is_some_and(|raw| !raw.is_empty()) {
            return Ok(false);
        }
        self.backend
            .set_item(&self.key, SEED_JSON)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        tracing::info!(slot = %self.key, "seeded sponsor store");
        Ok(true)
    }

    /// All records, newest `date_since` first.
    ///
    /// Never fails: unreadable or malformed slots yield an empty list so the
    /// landing page still renders.
    pub async fn list(&self) -> Vec<SponsorRecord> {
        let mut records = self.load().await;
        sort_newest_first(&mut records);
        records
    }

    /// Stores a new record with a fresh id, placed at the head of the list.
    ///
    /// `date_since` defaults to the current time. If the slot cannot be read
    /// or parsed, nothing is written and a storage error is returned.
    pub async fn add(
        &self,
        entry: NewSponsor,
        date_since: Option<DateTime<Utc>>,
    ) -> Result<SponsorRecord> {
        let company = entry.company.trim();
        if company.is_empty() {
            return Err(AppError::ValidationError("company name is required".into()));
        }

        let mut records = self.load_strict().await?;
        let taken: HashSet<Uuid> = records.iter().map(|r| r.id).collect();
        let mut id = Uuid::new_v4();
        while taken.contains(&id) {
            id = Uuid::new_v4();
        }

        let record = SponsorRecord {
            id,
            company: company.to_string(),
            tier: entry.tier,
            amount_lkr: entry.amount_lkr,
            date_since: date_since.unwrap_or_else(Utc::now),
            website: entry.website.filter(|w| !w.trim().is_empty()),
        };
        records.insert(0, record.clone());
        self.save(&records).await?;

        tracing::info!(id = %record.id, company = %record.company, tier = %record.tier, "sponsor added");
        Ok(record)
    }

    /// Raw slot contents in stored order. Malformed data reads as empty.
    pub async fn load(&self) -> Vec<SponsorRecord> {
        let raw = match self.read_slot().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(slot = %self.key, error = %e, "sponsor slot unreadable, treating as empty");
                return Vec::new();
            }
        };
        if raw.is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Vec<SponsorRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(slot = %self.key, error = %e, "malformed sponsor data, treating as empty");
                Vec::new()
            }
        }
    }

    /// Slot contents for a read-modify-write. Unlike [`Self::load`], read and
    /// parse failures are errors so the caller never writes over data it
    /// could not see.
    async fn load_strict(&self) -> Result<Vec<SponsorRecord>> {
        match self.read_slot().await? {
            Some(raw) if !raw.is_empty() => serde_json::from_str(&raw).map_err(|e| {
                AppError::Storage(format!("sponsor slot {:?} is malformed: {e}", self.key))
            }),
            _ => Ok(Vec::new()),
        }
    }

    /// Overwrites the slot with `records`.
    pub async fn save(&self, records: &[SponsorRecord]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.backend
            .set_item(&self.key, &raw)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }

    async fn read_slot(&self) -> Result<Option<String>> {
        self.backend
            .get_item(&self.key)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}

/// Stable sort; records with equal timestamps keep their stored order.
pub fn sort_newest_first(records: &mut [SponsorRecord]) {
    records.sort_by(|a, b| b.date_since.cmp(&a.date_since));
}
