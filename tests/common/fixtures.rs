//! Static data and temp-dir helpers shared across harnesses.

use dashdeck_core::{mock, NotificationCenter, Store};
use std::path::PathBuf;
use tempfile::TempDir;

/// Queries with known hit counts against the seeded users.
pub const USER_QUERIES: &[(&str, usize)] = &[
    ("", 5),
    ("editor", 2),
    ("EDITOR", 2),
    ("example.com", 5),
    ("pending", 1),
    ("john", 2),
    ("zzz", 0),
    (" ", 5),
];

/// Queries with known hit counts against the seeded products.
pub const PRODUCT_QUERIES: &[(&str, usize)] = &[
    ("electronics", 4),
    ("low-stock", 2),
    ("out-of-stock", 1),
    ("$", 6),
    ("ssd", 1),
];

pub fn seeded_store() -> Store {
    Store::seeded()
}

/// The three startup notifications, two of them unread.
pub fn seeded_center() -> NotificationCenter {
    NotificationCenter::with_entries(10, mock::notifications())
}

/// A fresh temp dir and a preference-file path inside it (not yet created).
/// Keep the `TempDir` alive for as long as the path is used.
pub fn temp_prefs() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("dashdeck").join("preferences.json");
    (dir, path)
}
