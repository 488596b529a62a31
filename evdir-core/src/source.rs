//! Where events come from.
//!
//! `HttpEventSource` talks to the events API. Every failure, be it transport,
//! status or payload, is reported as `EvdirError::Fetch` with a readable
//! message; nothing is retried here.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::EvdirConfig;
use crate::constants::EVENTS_PATH;
use crate::error::{EvdirError, EvdirResult};
use crate::event::{Event, EventId, TimestampUnit};

#[async_trait]
pub trait EventSource: Send + Sync {
    /// All events, timestamps normalized to milliseconds.
    async fn fetch_events(&self) -> EvdirResult<Vec<Event>>;

    async fn fetch_event(&self, id: EventId) -> EvdirResult<Event>;
}

pub struct HttpEventSource {
    http: reqwest::Client,
    base_url: String,
    unit: TimestampUnit,
}

impl HttpEventSource {
    pub fn new(base_url: &str, timeout: Duration, unit: TimestampUnit) -> EvdirResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EvdirError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpEventSource {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            unit,
        })
    }

    pub fn from_config(config: &EvdirConfig) -> EvdirResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout(), config.timestamp_unit)
    }

    async fn request_json<T: DeserializeOwned>(&self, path: &str) -> EvdirResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "requesting");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| EvdirError::Fetch(format!("Failed to reach events API: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EvdirError::Fetch(format!(
                "API request failed ({} {})",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| EvdirError::Fetch(format!("Failed to read API response: {e}")))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(error = %e, "bad payload");
            EvdirError::Fetch("Failed to parse API response as JSON.".into())
        })
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_events(&self) -> EvdirResult<Vec<Event>> {
        let events: Vec<Event> = self.request_json(EVENTS_PATH).await?;
        Ok(ingest(events, self.unit))
    }

    async fn fetch_event(&self, id: EventId) -> EvdirResult<Event> {
        let event: Event = self.request_json(&format!("{EVENTS_PATH}/{id}")).await?;
        Ok(ingest(vec![event], self.unit).remove(0))
    }
}

/// Normalize timestamps and flag events whose window runs backwards.
pub fn ingest(events: Vec<Event>, unit: TimestampUnit) -> Vec<Event> {
    events
        .into_iter()
        .map(|e| e.normalized(unit))
        .inspect(|e| {
            if e.start_time > e.end_time {
                tracing::warn!(id = e.id, name = %e.name, "event ends before it starts");
            }
        })
        .collect()
}
