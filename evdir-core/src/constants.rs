use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.hackthenorth.com/v3";

pub const EVENTS_PATH: &str = "/events";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Quiet period before a typed search query is committed to the pipeline.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Timestamps with an absolute value below this are read as seconds when
/// the unit is `auto`. 1e11 ms is early 1973; 1e11 s is far in the future.
pub const SECONDS_THRESHOLD: i64 = 100_000_000_000;

/// Related events shown on a detail view.
pub const RELATED_EVENTS_LIMIT: usize = 6;

/// Entries shown in the "upcoming" list.
pub const UPCOMING_LIMIT: usize = 8;

/// Display-only login gate. This is not a security mechanism: anyone who can
/// read this file can unlock private events, and the events API serves them
/// to everyone regardless.
pub const DEMO_USERNAME: &str = "hacker";
pub const DEMO_PASSWORD: &str = "htn2026";
