//! The filter pipeline.
//!
//! Every function here is pure: it borrows its input and returns a new
//! collection, preserving the relative order of the events it keeps. Sorts
//! are stable, so events that compare equal keep their input order.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::event::{Event, Permission};
use crate::selection::{AccessFilter, CategoryFilter, SortMode};

/// Unauthenticated viewers only see public events.
///
/// Apply this before anything else that is meant to respect access control.
pub fn filter_by_permission(events: &[Event], is_authenticated: bool) -> Vec<Event> {
    if is_authenticated {
        return events.to_vec();
    }

    events.iter().filter(|e| e.is_public()).cloned().collect()
}

/// Case-insensitive substring match on name, description and speaker names.
/// A blank query keeps everything.
pub fn filter_by_search(events: &[Event], query: &str) -> Vec<Event> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return events.to_vec();
    }

    events
        .iter()
        .filter(|e| matches_query(e, &query))
        .cloned()
        .collect()
}

/// `query` must already be trimmed and lowercased.
fn matches_query(event: &Event, query: &str) -> bool {
    event.name.to_lowercase().contains(query)
        || event
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query))
        || event
            .speakers
            .iter()
            .any(|s| s.name.to_lowercase().contains(query))
}

pub fn filter_by_event_type(events: &[Event], category: &CategoryFilter) -> Vec<Event> {
    if *category == CategoryFilter::All {
        return events.to_vec();
    }

    events
        .iter()
        .filter(|e| category.matches(&e.event_type))
        .cloned()
        .collect()
}

/// Narrow by the access chip. Asking for private events while signed out
/// is ignored rather than producing an empty list.
pub fn filter_by_access(
    events: &[Event],
    access: AccessFilter,
    is_authenticated: bool,
) -> Vec<Event> {
    let wanted = match access {
        AccessFilter::All => return events.to_vec(),
        AccessFilter::Private if !is_authenticated => return events.to_vec(),
        AccessFilter::Public => Permission::Public,
        AccessFilter::Private => Permission::Private,
    };

    events
        .iter()
        .filter(|e| e.permission == wanted)
        .cloned()
        .collect()
}

pub fn sort_by_start_time(events: &[Event]) -> Vec<Event> {
    sorted(events, |a, b| a.start_time.cmp(&b.start_time))
}

/// Alphabetical, ignoring case and accents first so "apple", "Banana" and
/// "Éclair" sort the way a reader expects. On a tie the unaccented name
/// comes first, then lowercase wins.
pub fn sort_by_name(events: &[Event]) -> Vec<Event> {
    sorted(events, |a, b| compare_names(&a.name, &b.name))
}

/// Most speakers first.
pub fn sort_by_speaker_count(events: &[Event]) -> Vec<Event> {
    sorted(events, |a, b| b.speakers.len().cmp(&a.speakers.len()))
}

pub fn sort_events(events: &[Event], mode: SortMode) -> Vec<Event> {
    match mode {
        SortMode::Start => sort_by_start_time(events),
        SortMode::Name => sort_by_name(events),
        SortMode::Speakers => sort_by_speaker_count(events),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Lowercase with diacritics stripped.
fn fold(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn sorted<F>(events: &[Event], compare: F) -> Vec<Event>
where
    F: FnMut(&Event, &Event) -> Ordering,
{
    let mut out = events.to_vec();
    // slice::sort_by is stable
    out.sort_by(compare);
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::event::{EventType, Speaker};

    pub(crate) fn event(
        id: u64,
        permission: Permission,
        event_type: EventType,
        start: i64,
    ) -> Event {
        Event {
            id,
            name: format!("Event {id}"),
            description: None,
            start_time: start,
            end_time: start + 60,
            event_type,
            permission,
            speakers: vec![],
            related_events: vec![],
            public_url: None,
            private_url: None,
        }
    }

    fn ids(events: &[Event]) -> Vec<u64> {
        events.iter().map(|e| e.id).collect()
    }

    fn sample() -> Vec<Event> {
        vec![
            event(1, Permission::Public, EventType::Workshop, 100),
            event(2, Permission::Private, EventType::TechTalk, 50),
            event(3, Permission::Public, EventType::Activity, 200),
        ]
    }

    #[test]
    fn permission_keeps_public_for_guests() {
        let events = sample();
        let visible = filter_by_permission(&events, false);

        assert_eq!(ids(&visible), vec![1, 3]);
        assert!(visible.iter().all(|e| e.permission == Permission::Public));
    }

    #[test]
    fn permission_keeps_all_when_authenticated() {
        let events = sample();
        assert_eq!(filter_by_permission(&events, true), events);
    }

    #[test]
    fn blank_search_is_identity() {
        let events = sample();
        assert_eq!(filter_by_search(&events, ""), events);
        assert_eq!(filter_by_search(&events, "   "), events);
    }

    #[test]
    fn search_matches_name_description_and_speakers() {
        let mut events = sample();
        events[0].name = "Rust for Beginners".into();
        events[1].description = Some("Deep dive into RUSTC internals".into());
        events[2].speakers = vec![Speaker {
            name: "Jane Rustacean".into(),
            profile_pic: None,
        }];

        let found = filter_by_search(&events, "  rust ");
        assert_eq!(ids(&found), vec![1, 2, 3]);

        let found = filter_by_search(&events, "beginners");
        assert_eq!(ids(&found), vec![1]);
    }

    #[test]
    fn search_is_substring_not_token() {
        let mut events = sample();
        events[0].name = "Hardware hacking".into();

        assert_eq!(ids(&filter_by_search(&events, "ware hack")), vec![1]);
        assert!(filter_by_search(&events, "hacking hardware").is_empty());
    }

    #[test]
    fn search_results_are_a_subset_of_input() {
        let events = sample();
        let found = filter_by_search(&events, "event 3");
        assert!(found.iter().all(|e| events.contains(e)));
        assert_eq!(ids(&found), vec![3]);
    }

    #[test]
    fn event_type_all_is_identity() {
        let events = sample();
        assert_eq!(filter_by_event_type(&events, &CategoryFilter::All), events);
    }

    #[test]
    fn event_type_exact_match() {
        let mut events = sample();
        events.push(event(4, Permission::Public, EventType::Other("social".into()), 10));

        let talks = filter_by_event_type(&events, &CategoryFilter::Only(EventType::TechTalk));
        assert_eq!(ids(&talks), vec![2]);

        let workshops = filter_by_event_type(&events, &CategoryFilter::Only(EventType::Workshop));
        assert_eq!(ids(&workshops), vec![1]);
    }

    #[test]
    fn unknown_event_type_only_passes_all() {
        let events = vec![event(1, Permission::Public, EventType::Other("social".into()), 10)];

        assert_eq!(ids(&filter_by_event_type(&events, &CategoryFilter::All)), vec![1]);
        let social = CategoryFilter::Only(EventType::Other("social".into()));
        assert!(filter_by_event_type(&events, &social).is_empty());
        assert!("social".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn access_private_ignored_for_guests() {
        let events = sample();
        assert_eq!(filter_by_access(&events, AccessFilter::Private, false), events);
        assert_eq!(ids(&filter_by_access(&events, AccessFilter::Private, true)), vec![2]);
        assert_eq!(ids(&filter_by_access(&events, AccessFilter::Public, true)), vec![1, 3]);
    }

    #[test]
    fn sort_by_start_is_ascending() {
        let sorted = sort_by_start_time(&sample());
        assert_eq!(ids(&sorted), vec![2, 1, 3]);
    }

    #[test]
    fn sort_by_start_is_stable_and_idempotent() {
        let events = vec![
            event(1, Permission::Public, EventType::Workshop, 100),
            event(2, Permission::Public, EventType::Workshop, 50),
            event(3, Permission::Public, EventType::Workshop, 100),
            event(4, Permission::Public, EventType::Workshop, 100),
        ];

        let once = sort_by_start_time(&events);
        assert_eq!(ids(&once), vec![2, 1, 3, 4]);
        assert_eq!(sort_by_start_time(&once), once);
    }

    #[test]
    fn sort_does_not_touch_input() {
        let events = sample();
        let before = events.clone();
        let _ = sort_by_start_time(&events);
        assert_eq!(events, before);
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let mut events = sample();
        events[0].name = "banana".into();
        events[1].name = "Cherry".into();
        events[2].name = "apple".into();

        assert_eq!(ids(&sort_by_name(&events)), vec![3, 1, 2]);
    }

    #[test]
    fn sort_by_name_ignores_accents() {
        let mut events = sample();
        events[0].name = "Zebra Talk".into();
        events[1].name = "Éclair Workshop".into();
        events[2].name = "eclair workshop".into();

        assert_eq!(ids(&sort_by_name(&events)), vec![3, 2, 1]);
    }

    #[test]
    fn sort_by_speakers_descending_and_stable() {
        let speaker = |n: &str| Speaker {
            name: n.into(),
            profile_pic: None,
        };
        let mut events = sample();
        events[0].speakers = vec![speaker("a")];
        events[1].speakers = vec![speaker("b"), speaker("c")];
        events[2].speakers = vec![speaker("d")];

        assert_eq!(ids(&sort_by_speaker_count(&events)), vec![2, 1, 3]);
    }
}
