//! Core types for evdir.
//!
//! This crate holds everything the `evdir` binary renders:
//! - `event` with the event data model
//! - `source` and `store` for fetching and holding the event list
//! - `session` for the display-gating login flag
//! - `filters` and `aggregates` for the search/filter/sort pipeline
//! - `view` and `directory` for composing the pipeline into one screen of state

pub mod aggregates;
pub mod config;
pub mod constants;
pub mod debounce;
pub mod detail;
pub mod directory;
pub mod error;
pub mod event;
pub mod filters;
pub mod format;
pub mod selection;
pub mod session;
pub mod source;
pub mod store;
pub mod view;

// Re-export the event types at crate root for convenience
pub use event::*;
