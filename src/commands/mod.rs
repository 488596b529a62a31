pub mod browse;
pub mod list;
pub mod login;
pub mod logout;
pub mod show;
pub mod status;
pub mod upcoming;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use evdir_core::config::EvdirConfig;
use evdir_core::selection::{AccessFilter, CategoryFilter, FilterSelection, SortMode};
use evdir_core::session::{FileSessionStore, SessionFlag};
use evdir_core::source::HttpEventSource;
use evdir_core::store::{EventStore, LoadState};
use evdir_core::Event;

use crate::utils::tui::create_spinner;

/// Filter flags shared by `list` and `upcoming`.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Case-insensitive text to look for in names, descriptions and speakers
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// all, workshop, tech_talk or activity
    #[arg(short, long, default_value = "all")]
    pub category: CategoryFilter,

    /// all, public or private (private needs `evdir login`)
    #[arg(short, long, default_value = "all")]
    pub access: AccessFilter,

    /// start, name or speakers
    #[arg(long, default_value = "start")]
    pub sort: SortMode,
}

impl From<FilterArgs> for FilterSelection {
    fn from(args: FilterArgs) -> Self {
        FilterSelection {
            search: args.search,
            category: args.category,
            access: args.access,
            sort: args.sort,
        }
    }
}

/// Shared state for every command, loaded once per invocation.
pub struct DirectoryContext {
    pub config: EvdirConfig,
    pub session: Arc<SessionFlag>,
    pub store: Arc<EventStore>,
}

impl DirectoryContext {
    pub fn load() -> Result<Self> {
        let config = EvdirConfig::load().context("Failed to load configuration")?;

        let session_path = config.session_path()?;
        tracing::debug!(
            api = %config.api_base_url,
            session = %session_path.display(),
            "configuration loaded"
        );
        let session = Arc::new(SessionFlag::new(FileSessionStore::new(session_path)));

        let source = HttpEventSource::from_config(&config)?;
        let store = Arc::new(EventStore::new(Arc::new(source)));

        Ok(DirectoryContext { config, session, store })
    }

    /// Fetch the event list, with a spinner while the request is in flight.
    pub async fn load_events(&self) -> Result<Arc<[Event]>> {
        let spinner = create_spinner("Loading events".to_string());
        let state = self.store.load().await;
        spinner.finish_and_clear();

        match state {
            LoadState::Loaded(events) => Ok(events),
            LoadState::Errored(message) => anyhow::bail!(
                "Failed to load events: {message}\n\n\
                Run the command again to retry."
            ),
            LoadState::Idle | LoadState::Loading => {
                anyhow::bail!("Events are still loading, try again")
            }
        }
    }
}
