//! Composition of the filter pipeline into one screen of state.
//!
//! The permission scope is computed once and then branches:
//!
//! ```text
//! events ─ permission ─┬─ totals (header)
//!                      └─ search ─┬─ access counts
//!                                 ├─ access ─ category counts
//!                                 └─ category ─ access ─ sort ─ feed
//! ```
//!
//! Category counts are taken after the access filter but before the
//! category filter, so switching category never changes the numbers on the
//! other category chips.

use serde::Serialize;

use crate::aggregates::{self, AccessCounts, CategoryCounts, Totals};
use crate::event::Event;
use crate::filters::{
    filter_by_access, filter_by_event_type, filter_by_permission, filter_by_search, sort_events,
};
use crate::selection::FilterSelection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryView {
    /// Ordered events to display.
    pub feed: Vec<Event>,
    /// Everything the viewer is allowed to see, before search. Used to
    /// resolve related events.
    #[serde(skip)]
    pub visible: Vec<Event>,
    pub totals: Totals,
    pub category_counts: CategoryCounts,
    pub access_counts: AccessCounts,
}

impl DirectoryView {
    pub fn compose(events: &[Event], selection: &FilterSelection, is_authenticated: bool) -> Self {
        let visible = filter_by_permission(events, is_authenticated);
        let searched = filter_by_search(&visible, &selection.search);

        let access_scoped = filter_by_access(&searched, selection.access, is_authenticated);
        let category_counts = aggregates::category_counts(&access_scoped);
        let access_counts = aggregates::access_counts(&searched);

        let by_type = filter_by_event_type(&searched, &selection.category);
        let narrowed = filter_by_access(&by_type, selection.access, is_authenticated);
        let feed = sort_events(&narrowed, selection.sort);

        DirectoryView {
            feed,
            totals: aggregates::totals(&visible),
            visible,
            category_counts,
            access_counts,
        }
    }

    /// First `n` events of the feed.
    pub fn upcoming(&self, n: usize) -> &[Event] {
        &self.feed[..self.feed.len().min(n)]
    }
}
