//! TUI rendering traits for evdir types.
//!
//! Extension traits that add colored terminal rendering to evdir-core types
//! using owo_colors.

use evdir_core::aggregates::{AccessCounts, CategoryCounts, Totals};
use evdir_core::detail::{EventLink, event_link, related_events, speaker_initials};
use evdir_core::format::{format_date_range, format_time};
use evdir_core::selection::{AccessFilter, CategoryFilter};
use evdir_core::{Event, EventType, Permission};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Permission {
    fn render(&self) -> String {
        match self {
            Permission::Public => "○".dimmed().to_string(),
            Permission::Private => "●".yellow().to_string(),
        }
    }
}

impl Render for EventType {
    fn render(&self) -> String {
        let label = format!("[{}]", self.label());
        match self {
            EventType::Workshop => label.cyan().to_string(),
            EventType::TechTalk => label.magenta().to_string(),
            EventType::Activity => label.green().to_string(),
            EventType::Other(_) => label.dimmed().to_string(),
        }
    }
}

/// One line per event in the feed.
impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{} {:>5} {} {} {}",
            self.permission.render(),
            format!("#{}", self.id).dimmed(),
            self.name.bold(),
            self.event_type.render(),
            format_date_range(self.start_time, self.end_time).dimmed()
        )
    }
}

impl Render for Totals {
    fn render(&self) -> String {
        format!(
            "{} Events  {} Public  {} Speakers",
            self.total.bold(),
            self.public.bold(),
            self.speakers.bold()
        )
    }
}

/// Render one chip, highlighting the selected one.
fn chip(label: &str, count: usize, active: bool) -> String {
    let text = format!("{label} {count}");
    if active {
        text.reversed().to_string()
    } else {
        text.dimmed().to_string()
    }
}

pub fn render_category_chips(counts: &CategoryCounts, selected: &CategoryFilter) -> String {
    let mut chips = vec![chip("All", counts.all, *selected == CategoryFilter::All)];

    for (label, event_type) in [
        ("Workshop", EventType::Workshop),
        ("Tech Talk", EventType::TechTalk),
        ("Activity", EventType::Activity),
    ] {
        let active = *selected == CategoryFilter::Only(event_type.clone());
        chips.push(chip(label, counts.get(&event_type), active));
    }

    format!("{} {}", "Categories:".dimmed(), chips.join("  "))
}

/// The private chip is only offered to signed-in viewers.
pub fn render_access_chips(
    counts: &AccessCounts,
    selected: AccessFilter,
    is_authenticated: bool,
) -> String {
    let mut chips = vec![
        chip("All Access", counts.all, selected == AccessFilter::All),
        chip("Public", counts.public, selected == AccessFilter::Public),
    ];

    if is_authenticated {
        chips.push(chip("Private", counts.private, selected == AccessFilter::Private));
    }

    format!("{} {}", "Access:".dimmed(), chips.join("  "))
}

/// Full detail block for a single event.
pub fn render_detail(event: &Event, all: &[Event], is_authenticated: bool) -> String {
    let mut lines = Vec::new();

    let access = match event.permission {
        Permission::Public => "Public".to_string(),
        Permission::Private => "Private".yellow().to_string(),
    };
    lines.push(format!("{} {}", event.event_type.render(), access));
    lines.push(event.name.bold().to_string());
    lines.push(format_date_range(event.start_time, event.end_time).dimmed().to_string());
    lines.push(String::new());
    lines.push(
        event
            .description
            .as_deref()
            .unwrap_or("No description provided.")
            .to_string(),
    );

    if !event.speakers.is_empty() {
        lines.push(String::new());
        lines.push("Speakers".dimmed().to_string());
        for speaker in &event.speakers {
            let avatar = match &speaker.profile_pic {
                Some(pic) => pic.dimmed().to_string(),
                None => format!("({})", speaker_initials(Some(speaker))).dimmed().to_string(),
            };
            lines.push(format!("  {} {}", speaker.name, avatar));
        }
    }

    match event_link(event, is_authenticated) {
        EventLink::Open(url) => {
            lines.push(String::new());
            lines.push(format!("Event page: {}", url.underline()));
        }
        EventLink::Locked => {
            lines.push(String::new());
            lines.push("Event page locked. Run `evdir login` to unlock.".dimmed().to_string());
        }
        EventLink::None => {}
    }

    let related = related_events(event, all);
    if !related.is_empty() {
        lines.push(String::new());
        lines.push("Related events".dimmed().to_string());
        for other in related {
            lines.push(format!("  {} {}", format!("#{}", other.id).dimmed(), other.name));
        }
    }

    lines.join("\n")
}

/// Compact "upcoming" line: time and name.
pub fn render_upcoming(event: &Event) -> String {
    format!("  {:>8} {} {}", format_time(event.start_time), event.name, event.permission.render())
}
