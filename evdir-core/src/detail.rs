//! Helpers for the single-event detail view.

use crate::constants::RELATED_EVENTS_LIMIT;
use crate::event::{Event, Permission, Speaker};

/// What to show for an event's page link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLink<'a> {
    Open(&'a str),
    /// Private event seen while signed out.
    Locked,
    None,
}

pub fn event_link(event: &Event, is_authenticated: bool) -> EventLink<'_> {
    match event.url() {
        None => EventLink::None,
        Some(_) if event.permission == Permission::Private && !is_authenticated => {
            EventLink::Locked
        }
        Some(url) => EventLink::Open(url),
    }
}

/// Resolve `related_events` against `all` in listed order. Ids with no
/// matching event are dropped.
pub fn related_events<'a>(event: &Event, all: &'a [Event]) -> Vec<&'a Event> {
    event
        .related_events
        .iter()
        .filter_map(|id| all.iter().find(|candidate| candidate.id == *id))
        .take(RELATED_EVENTS_LIMIT)
        .collect()
}

/// Up to two uppercase initials, shown in place of a missing profile image.
pub fn speaker_initials(speaker: Option<&Speaker>) -> String {
    let Some(speaker) = speaker else {
        return "?".to_string();
    };

    let initials: String = speaker
        .name
        .split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() { "?".to_string() } else { initials }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::filters::tests::event;

    #[test]
    fn related_drops_dangling_ids() {
        let mut target = event(1, Permission::Public, EventType::Workshop, 0);
        target.related_events = vec![3, 42, 2];
        let all = vec![
            target.clone(),
            event(2, Permission::Public, EventType::Workshop, 0),
            event(3, Permission::Public, EventType::Activity, 0),
        ];

        let related: Vec<u64> = related_events(&target, &all).iter().map(|e| e.id).collect();
        assert_eq!(related, vec![3, 2]);
    }

    #[test]
    fn related_is_capped() {
        let mut target = event(0, Permission::Public, EventType::Workshop, 0);
        target.related_events = (1..=10).collect();
        let all: Vec<Event> = (1..=10)
            .map(|id| event(id, Permission::Public, EventType::Workshop, 0))
            .collect();

        assert_eq!(related_events(&target, &all).len(), RELATED_EVENTS_LIMIT);
    }

    #[test]
    fn initials() {
        let speaker = |name: &str| Speaker {
            name: name.into(),
            profile_pic: None,
        };

        assert_eq!(speaker_initials(Some(&speaker("ada lovelace byron"))), "AL");
        assert_eq!(speaker_initials(Some(&speaker("Grace"))), "G");
        assert_eq!(speaker_initials(Some(&speaker("  "))), "?");
        assert_eq!(speaker_initials(None), "?");
    }

    #[test]
    fn private_link_locked_for_guests() {
        let mut private = event(1, Permission::Private, EventType::TechTalk, 0);
        private.private_url = Some("https://example.com/private".into());
        private.public_url = Some("https://example.com/public".into());

        assert_eq!(event_link(&private, false), EventLink::Locked);
        assert_eq!(event_link(&private, true), EventLink::Open("https://example.com/private"));
    }

    #[test]
    fn public_link_uses_public_url() {
        let mut public = event(1, Permission::Public, EventType::Workshop, 0);
        assert_eq!(event_link(&public, false), EventLink::None);

        public.public_url = Some("https://example.com/public".into());
        assert_eq!(event_link(&public, false), EventLink::Open("https://example.com/public"));
    }
}
