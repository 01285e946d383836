//! Data layer behind the dashdeck terminal dashboard.
//!
//! This crate owns every piece of state the UI renders: the record
//! collections, the notification and activity feeds, the search filter, and
//! the small preference mirror that survives restarts.
//!
//! # Architecture
//!
//! ```text
//! Generators ──► Feeds ──┐
//!                        ├──► AppState (UI thread) ──► Prefs store
//! Forms ───────► Store ──┘          │
//!                                   └──► Filter ──► widgets
//! ```
//!
//! Nothing in here spawns tasks or blocks. All mutation happens on whichever
//! thread owns the values, which in the TUI is the event loop.

pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod metrics;
pub mod mock;
pub mod prefs;
pub mod settings;
pub mod store;
pub mod types;

pub use error::{PrefsError, ValidationError};
pub use feed::{ActivityFeed, NotificationCenter, NotificationView};
pub use filter::{filter, Searchable};
pub use store::{Collection, Record, Store};
pub use types::{
    Activity, ActivityKind, Actor, NewActivity, Notification, Order, OrderStatus, Product,
    ProductDraft, Role, StockStatus, Tone, User, UserDraft, UserStatus,
};
