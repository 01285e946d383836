//! Client-side search: case-insensitive substring match over display fields.
//!
//! A record matches a query when the lowercased query occurs in at least one
//! of its lowercased display fields. The empty query matches everything.
//! [`filter`] keeps source order; nothing is re-sorted.

use crate::types::{Activity, Notification, Order, Product, User};

/// A record that can be matched against a search query.
pub trait Searchable {
    /// The text fields a query is matched against, in display order.
    fn search_fields(&self) -> Vec<&str>;

    /// Returns `true` when `query` occurs in any display field, ignoring case.
    fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        matches_lowered(self, &query.to_lowercase())
    }
}

/// Return the ordered subsequence of `items` that match `query`.
pub fn filter<'a, T, I>(items: I, query: &str) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if query.is_empty() {
        return items.into_iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| matches_lowered(*item, &needle))
        .collect()
}

fn matches_lowered<T: Searchable + ?Sized>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Impls
// ---------------------------------------------------------------------------

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.role.as_str(),
            self.status.as_str(),
        ]
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.category.as_str(),
            self.price.as_str(),
            self.status().as_str(),
        ]
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.customer.as_str(),
            self.product.as_str(),
            self.status.as_str(),
        ]
    }
}

impl Searchable for Notification {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl Searchable for Activity {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.actor.name.as_str(),
            self.action.as_str(),
            self.target.as_str(),
            self.kind.as_str(),
        ];
        if let Some(amount) = &self.amount {
            fields.push(amount.as_str());
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
