//! Summary counts shown next to the filters.
//!
//! Each function walks its input once and keeps nothing afterwards.

use serde::Serialize;

use crate::event::{Event, EventType, Permission};

/// Header numbers: how many events the viewer can see and who is speaking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total: usize,
    pub public: usize,
    pub private: usize,
    pub speakers: usize,
}

/// Counts for the category chips. Events with an unknown category only
/// count towards `all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub all: usize,
    pub workshop: usize,
    pub tech_talk: usize,
    pub activity: usize,
}

impl CategoryCounts {
    pub fn get(&self, event_type: &EventType) -> usize {
        match event_type {
            EventType::Workshop => self.workshop,
            EventType::TechTalk => self.tech_talk,
            EventType::Activity => self.activity,
            EventType::Other(_) => 0,
        }
    }
}

/// Counts for the access chips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccessCounts {
    pub all: usize,
    pub public: usize,
    pub private: usize,
}

pub fn totals(events: &[Event]) -> Totals {
    events.iter().fold(Totals::default(), |mut acc, event| {
        acc.total += 1;
        match event.permission {
            Permission::Public => acc.public += 1,
            Permission::Private => acc.private += 1,
        }
        acc.speakers += event.speakers.len();
        acc
    })
}

pub fn category_counts(events: &[Event]) -> CategoryCounts {
    events.iter().fold(CategoryCounts::default(), |mut acc, event| {
        acc.all += 1;
        match event.event_type {
            EventType::Workshop => acc.workshop += 1,
            EventType::TechTalk => acc.tech_talk += 1,
            EventType::Activity => acc.activity += 1,
            EventType::Other(_) => {}
        }
        acc
    })
}

pub fn access_counts(events: &[Event]) -> AccessCounts {
    let Totals { total, public, private, .. } = totals(events);
    AccessCounts { all: total, public, private }
}

pub fn speaker_count(events: &[Event]) -> usize {
    events.iter().map(|e| e.speakers.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Speaker;
    use crate::filters::tests::event;

    #[test]
    fn category_counts_sum_when_exhaustive() {
        let events = vec![
            event(1, Permission::Public, EventType::Workshop, 1),
            event(2, Permission::Private, EventType::TechTalk, 2),
            event(3, Permission::Public, EventType::Activity, 3),
            event(4, Permission::Public, EventType::Workshop, 4),
        ];

        let counts = category_counts(&events);
        assert_eq!(counts.all, counts.workshop + counts.tech_talk + counts.activity);
        assert_eq!(counts.workshop, 2);
        assert_eq!(counts.get(&EventType::TechTalk), 1);
    }

    #[test]
    fn unknown_category_only_counts_towards_all() {
        let events = vec![
            event(1, Permission::Public, EventType::Other("social".into()), 1),
            event(2, Permission::Public, EventType::Workshop, 2),
        ];

        let counts = category_counts(&events);
        assert_eq!(counts.all, 2);
        assert_eq!(counts.workshop, 1);
        assert_eq!(counts.tech_talk + counts.activity, 0);
    }

    #[test]
    fn totals_count_permissions_and_speakers() {
        let mut events = vec![
            event(1, Permission::Public, EventType::Workshop, 1),
            event(2, Permission::Private, EventType::TechTalk, 2),
        ];
        events[0].speakers = vec![
            Speaker { name: "A".into(), profile_pic: None },
            Speaker { name: "B".into(), profile_pic: None },
        ];
        events[1].speakers = vec![Speaker { name: "C".into(), profile_pic: None }];

        let t = totals(&events);
        assert_eq!(t, Totals { total: 2, public: 1, private: 1, speakers: 3 });
        assert_eq!(speaker_count(&events), 3);
        assert_eq!(access_counts(&events), AccessCounts { all: 2, public: 1, private: 1 });
    }

    #[test]
    fn empty_input() {
        assert_eq!(totals(&[]), Totals::default());
        assert_eq!(category_counts(&[]), CategoryCounts::default());
    }
}
