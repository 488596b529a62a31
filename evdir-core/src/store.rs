//! The event store: the most recently loaded event list plus its load status.
//!
//! Snapshots are `Arc<[Event]>` and are replaced wholesale on every load, so
//! readers never observe a half-updated list. Overlapping refetches are
//! resolved by generation: only the most recently started request may
//! publish its result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::error::EvdirError;
use crate::event::Event;
use crate::source::EventSource;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Arc<[Event]>),
    Errored(String),
}

impl LoadState {
    /// Loaded events; empty in every other state.
    pub fn events(&self) -> &[Event] {
        match self {
            LoadState::Loaded(events) => events,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Errored(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }
}

pub struct EventStore {
    source: Arc<dyn EventSource>,
    state: watch::Sender<LoadState>,
    generation: AtomicU64,
}

impl EventStore {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);

        EventStore {
            source,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &Arc<dyn EventSource> {
        &self.source
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Initial load. Same contract as [`EventStore::refetch`].
    pub async fn load(&self) -> LoadState {
        self.refetch().await
    }

    /// Fetch the event list and publish the outcome. Returns the published
    /// state, or the current state if a newer request superseded this one.
    pub async fn refetch(&self) -> LoadState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(LoadState::Loading);
        tracing::debug!(generation, "fetching events");

        let next = match self.source.fetch_events().await {
            Ok(events) => {
                tracing::debug!(generation, count = events.len(), "events loaded");
                LoadState::Loaded(events.into())
            }
            Err(EvdirError::Fetch(message)) => LoadState::Errored(message),
            Err(e) => LoadState::Errored(e.to_string()),
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(generation, "discarding response from superseded request");
            return self.state();
        }

        self.state.send_replace(next.clone());
        next
    }
}
