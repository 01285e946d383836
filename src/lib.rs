//! dashdeck: terminal admin dashboard.
//!
//! This crate re-exports the three workspace layers so that integration tests
//! and benchmarks can import them from one place.
//!
//! # Architecture
//!
//! ```text
//! feeds (tokio tasks) ──► mpsc ──► tui (AppState) ──► core (store, feeds, prefs)
//! ```
//!
//! Generator tasks only produce records. The UI thread owns every piece of
//! state and applies incoming records once per event-loop tick.

pub use dashdeck_core;
pub use dashdeck_feeds;
pub use dashdeck_tui;
