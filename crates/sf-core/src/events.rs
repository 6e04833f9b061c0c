//! Notifications published by the application form.
//!
//! List views that cache sponsors subscribe here and drop their cache when an
//! application goes through.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::models::Tier;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SponsorEvent {
    /// The submission endpoint accepted an application; sponsor lists may be stale.
    ApplicationSubmitted {
        company: String,
        level: Tier,
        submitted_at: DateTime<Utc>,
    },
}

/// Fan-out of [`SponsorEvent`]s. Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct SponsorEvents {
    tx: broadcast::Sender<SponsorEvent>,
}

impl Default for SponsorEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SponsorEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SponsorEvent> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers saw the event. Zero is not an error.
    pub fn emit(&self, event: SponsorEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }
}
