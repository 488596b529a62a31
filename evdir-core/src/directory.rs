//! The directory controller: everything one screen needs, in one place.
//!
//! `Directory` owns the viewer's selection and the currently opened event,
//! and borrows the shared store and session flag. Views are only composed
//! from loaded data; while loading or after a failed load `view()` returns
//! an error and the caller shows the load status instead.

use std::sync::Arc;
use std::time::Duration;

use crate::debounce::SearchDebouncer;
use crate::error::{EvdirError, EvdirResult};
use crate::event::{Event, EventId};
use crate::selection::{AccessFilter, CategoryFilter, FilterSelection, SortMode};
use crate::session::SessionFlag;
use crate::store::{EventStore, LoadState};
use crate::view::DirectoryView;

pub struct Directory {
    store: Arc<EventStore>,
    session: Arc<SessionFlag>,
    selection: FilterSelection,
    search: SearchDebouncer,
    selected: Option<EventId>,
}

impl Directory {
    pub fn new(store: Arc<EventStore>, session: Arc<SessionFlag>, debounce: Duration) -> Self {
        Directory {
            store,
            session,
            selection: FilterSelection::default(),
            search: SearchDebouncer::new(debounce),
            selected: None,
        }
    }

    pub fn status(&self) -> LoadState {
        self.store.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Arc<SessionFlag> {
        &self.session
    }

    pub async fn refetch(&self) -> LoadState {
        self.store.refetch().await
    }

    /// Current selection, with the committed (not draft) search query.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            search: self.search.committed(),
            ..self.selection.clone()
        }
    }

    pub fn search_draft(&self) -> &str {
        self.search.draft()
    }

    /// Debounced; see [`SearchDebouncer`].
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search.input(text);
    }

    pub fn flush_search(&mut self) {
        self.search.flush();
    }

    pub fn search_debouncer(&self) -> &SearchDebouncer {
        &self.search
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.selection.category = category;
    }

    pub fn set_access(&mut self, access: AccessFilter) {
        self.selection.access = access;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.selection.sort = sort;
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.session.login(username, password)
    }

    /// Also closes an opened event the viewer can no longer see.
    pub fn logout(&mut self) {
        self.session.logout();

        if let Some(id) = self.selected
            && self.visible_event(id).is_none()
        {
            self.selected = None;
        }
    }

    pub fn view(&self) -> EvdirResult<DirectoryView> {
        let state = self.store.state();
        match state {
            LoadState::Loaded(events) => Ok(DirectoryView::compose(
                &events,
                &self.selection(),
                self.is_authenticated(),
            )),
            LoadState::Errored(message) => Err(EvdirError::Fetch(message)),
            LoadState::Idle | LoadState::Loading => Err(EvdirError::NotLoaded),
        }
    }

    /// Open an event's detail. Only events the viewer can see may be opened.
    pub fn select(&mut self, id: EventId) -> EvdirResult<()> {
        if self.visible_event(id).is_none() {
            return Err(EvdirError::EventNotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<EventId> {
        self.selected
    }

    pub fn selected_event(&self) -> Option<Event> {
        self.selected.and_then(|id| self.visible_event(id))
    }

    fn visible_event(&self, id: EventId) -> Option<Event> {
        let state = self.store.state();
        state
            .events()
            .iter()
            .find(|e| e.id == id && (e.is_public() || self.is_authenticated()))
            .cloned()
    }
}
