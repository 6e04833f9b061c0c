//! Cached sponsor list for the landing page and `GET /api/sponsors`.
//!
//! The cache listens to [`SponsorEvents`]; any event empties it before the
//! next read. Pending events are drained on each read, so no background task
//! is needed.
//!
//! Every invalidation bumps a generation counter. A load that started before
//! an invalidation is returned to its caller but not cached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use sf_core::{SponsorEvent, SponsorEvents, SponsorRecord, SponsorStore};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

pub struct SponsorListCache {
    cached: RwLock<Option<Vec<SponsorRecord>>>,
    generation: AtomicU64,
    events: Mutex<Receiver<SponsorEvent>>,
}

impl SponsorListCache {
    pub fn new(events: &SponsorEvents) -> Self {
        Self {
            cached: RwLock::new(None),
            generation: AtomicU64::new(0),
            events: Mutex::new(events.subscribe()),
        }
    }

    pub fn invalidate(&self) {
        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::SeqCst);
        *cached = None;
    }

    pub fn is_warm(&self) -> bool {
        self.drain_events();
        self.cached.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// The cached list, loading from `store` on a miss.
    pub async fn get_or_load(&self, store: &SponsorStore) -> Vec<SponsorRecord> {
        self.drain_events();
        if let Some(list) = self.cached.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return list.clone();
        }
        let started = self.generation.load(Ordering::SeqCst);
        let list = store.list().await;

        self.drain_events();
        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) == started {
            *cached = Some(list.clone());
        } else {
            tracing::debug!("sponsor list changed during load, not caching");
        }
        list
    }

    fn drain_events(&self) {
        let mut rx = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            match rx.try_recv() {
                Ok(SponsorEvent::ApplicationSubmitted { company, .. }) => {
                    tracing::debug!(%company, "sponsor list invalidated");
                    self.invalidate();
                }
                // Missed events still mean something changed.
                Err(TryRecvError::Lagged(_)) => self.invalidate(),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }
}
