//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::models::SubmissionPayload;

/// Local key-value storage holding named string slots.
///
/// Mirrors a browser's `localStorage`: one string per key, no transactions.
/// Callers doing read-modify-write get no protection against other writers.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the slot has never been written.
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Replaces the whole slot.
    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// The remote endpoint that receives sponsorship applications.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Delivers one application. Any error means the application was not accepted.
    async fn submit(&self, payload: &SubmissionPayload) -> anyhow::Result<()>;
}
