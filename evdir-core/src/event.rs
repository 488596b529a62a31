//! Event data model.
//!
//! Events arrive from the events API as JSON. Timestamps are normalized to
//! milliseconds since the Unix epoch at ingestion (see [`TimestampUnit`]), so
//! everything downstream compares and formats a single unit.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::SECONDS_THRESHOLD;

pub type EventId = u64;

/// A single schedulable item from the events API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Milliseconds since the Unix epoch once normalized.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start_time: i64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end_time: i64,
    pub event_type: EventType,
    pub permission: Permission,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub related_events: Vec<EventId>,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub private_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

/// Event category. Unknown categories from the API are kept verbatim in
/// `Other` and only ever match the "all" filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Workshop,
    TechTalk,
    Activity,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Workshop => "workshop",
            EventType::TechTalk => "tech_talk",
            EventType::Activity => "activity",
            EventType::Other(s) => s,
        }
    }

    /// Human label, e.g. "tech talk".
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "workshop" => EventType::Workshop,
            "tech_talk" => EventType::TechTalk,
            "activity" => EventType::Activity,
            _ => EventType::Other(value),
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visibility tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Public,
    Private,
}

impl Permission {
    pub fn is_public(self) -> bool {
        self == Permission::Public
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Public => write!(f, "public"),
            Permission::Private => write!(f, "private"),
        }
    }
}

/// Unit of the timestamps served by the events API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
    /// Guess per value by magnitude: small values are seconds.
    #[default]
    Auto,
    Seconds,
    Milliseconds,
}

impl TimestampUnit {
    pub fn to_millis(self, raw: i64) -> i64 {
        match self {
            TimestampUnit::Seconds => raw.saturating_mul(1000),
            TimestampUnit::Milliseconds => raw,
            TimestampUnit::Auto if raw.abs() < SECONDS_THRESHOLD => raw.saturating_mul(1000),
            TimestampUnit::Auto => raw,
        }
    }
}

impl Event {
    /// Rescale both timestamps to milliseconds.
    pub fn normalized(mut self, unit: TimestampUnit) -> Self {
        self.start_time = unit.to_millis(self.start_time);
        self.end_time = unit.to_millis(self.end_time);
        self
    }

    pub fn is_public(&self) -> bool {
        self.permission.is_public()
    }

    pub fn lead_speaker(&self) -> Option<&Speaker> {
        self.speakers.first()
    }

    /// Link to show for this event: the private page for private events,
    /// the public page otherwise.
    pub fn url(&self) -> Option<&str> {
        match self.permission {
            Permission::Private => self.private_url.as_deref(),
            Permission::Public => self.public_url.as_deref(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Accept integer or floating point JSON numbers.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.round() as i64)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {number}")))
}
