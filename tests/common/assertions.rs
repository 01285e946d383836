//! Domain-specific assertion macros for dashdeck harnesses.
//!
//! These add context to failure messages, naming the records and query
//! involved rather than just two unequal values.

/// Assert that a slice of records has exactly these ids, in order.
///
/// ```rust
/// assert_ids!(store.users.filter("editor"), ["2", "4"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($records:expr, [$($id:expr),* $(,)?]) => {{
        use dashdeck_core::Record as _;
        let actual: Vec<String> = $records.iter().map(|r| r.id().to_string()).collect();
        let expected: Vec<String> = vec![$($id.to_string()),*];
        if actual != expected {
            panic!("assert_ids! failed:\n  expected: {:?}\n  actual:   {:?}", expected, actual);
        }
    }};
}

/// Assert that every record in `results` matches `query` and that no record
/// of `all` outside `results` does.
#[macro_export]
macro_rules! assert_filter_exact {
    ($all:expr, $results:expr, $query:expr) => {{
        use dashdeck_core::Searchable as _;
        let query: &str = $query;
        for r in $results.iter() {
            if !r.matches(query) {
                panic!(
                    "assert_filter_exact! failed: result does not match {:?}: {:?}",
                    query,
                    r.search_fields()
                );
            }
        }
        let kept = $results.len();
        let matching = $all.iter().filter(|r| r.matches(query)).count();
        if kept != matching {
            panic!(
                "assert_filter_exact! failed: {} of {} records match {:?} but {} were returned",
                matching,
                $all.len(),
                query,
                kept
            );
        }
    }};
}

/// Assert the unread count of a notification center, and that it agrees
/// with a direct count over the entries.
#[macro_export]
macro_rules! assert_unread {
    ($center:expr, $n:expr) => {{
        let center: &dashdeck_core::NotificationCenter = &$center;
        let expected: usize = $n;
        let folded = center.iter().filter(|n| !n.read).count();
        if center.unread_count() != expected || folded != expected {
            panic!(
                "assert_unread! failed:\n  expected: {}\n  unread_count(): {}\n  entries with read=false: {}",
                expected,
                center.unread_count(),
                folded
            );
        }
    }};
}
