//! Debounced search input.
//!
//! The draft is visible as soon as it is typed; it reaches the pipeline only
//! after the input has been quiet for the configured delay. Each keystroke
//! replaces the pending timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct SearchDebouncer {
    delay: Duration,
    draft: String,
    committed: Arc<watch::Sender<String>>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        let (committed, _) = watch::channel(String::new());

        SearchDebouncer {
            delay,
            draft: String::new(),
            committed: Arc::new(committed),
            pending: None,
        }
    }

    /// Record a new draft and restart the timer. Must be called inside a
    /// tokio runtime.
    pub fn input(&mut self, text: impl Into<String>) {
        self.draft = text.into();

        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let committed = Arc::clone(&self.committed);
        let draft = self.draft.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            commit(&committed, draft);
        }));
    }

    /// Commit the draft now, skipping the wait.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        commit(&self.committed, self.draft.clone());
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The query the pipeline should currently use.
    pub fn committed(&self) -> String {
        self.committed.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.committed.subscribe()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// Only notify when the query actually changes.
fn commit(committed: &watch::Sender<String>, draft: String) {
    committed.send_if_modified(|current| {
        if *current == draft {
            return false;
        }
        *current = draft;
        true
    });
}
