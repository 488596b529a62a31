//! Filter and sort controls chosen by the viewer.
//!
//! These are ephemeral: they live as long as one `Directory` and are never
//! persisted.

use std::fmt;
use std::str::FromStr;

use crate::event::EventType;

/// Category chip selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(EventType),
}

impl CategoryFilter {
    /// Unrecognized event types only pass `All`.
    pub fn matches(&self, event_type: &EventType) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(EventType::Other(_)) => false,
            CategoryFilter::Only(wanted) => wanted == event_type,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("category cannot be empty".into()),
            "all" => Ok(CategoryFilter::All),
            "workshop" => Ok(CategoryFilter::Only(EventType::Workshop)),
            "tech_talk" => Ok(CategoryFilter::Only(EventType::TechTalk)),
            "activity" => Ok(CategoryFilter::Only(EventType::Activity)),
            other => Err(format!(
                "unknown category '{other}' (expected all, workshop, tech_talk or activity)"
            )),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(t) => write!(f, "{t}"),
        }
    }
}

/// Access chip selection. `Private` only takes effect for authenticated viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessFilter {
    #[default]
    All,
    Public,
    Private,
}

impl FromStr for AccessFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(AccessFilter::All),
            "public" => Ok(AccessFilter::Public),
            "private" => Ok(AccessFilter::Private),
            other => Err(format!(
                "unknown access filter '{other}' (expected all, public or private)"
            )),
        }
    }
}

impl fmt::Display for AccessFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessFilter::All => write!(f, "all"),
            AccessFilter::Public => write!(f, "public"),
            AccessFilter::Private => write!(f, "private"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ascending start time.
    #[default]
    Start,
    /// Alphabetical by name.
    Name,
    /// Most speakers first.
    Speakers,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "start" => Ok(SortMode::Start),
            "name" => Ok(SortMode::Name),
            "speakers" => Ok(SortMode::Speakers),
            other => Err(format!("unknown sort mode '{other}' (expected start, name or speakers)")),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Start => write!(f, "start"),
            SortMode::Name => write!(f, "name"),
            SortMode::Speakers => write!(f, "speakers"),
        }
    }
}

/// Everything the viewer picked, with the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub search: String,
    pub category: CategoryFilter,
    pub access: AccessFilter,
    pub sort: SortMode,
}
