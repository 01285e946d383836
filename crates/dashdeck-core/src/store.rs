//! Ordered in-memory collections of users, products and orders.
//!
//! The store is the single source of truth; widgets read from it, forms write
//! to it through [`Collection::insert`] / [`Collection::update`], which
//! validate before touching anything. A rejected submission leaves the
//! collection exactly as it was.
//!
//! # Id assignment
//!
//! Each collection owns a monotonic counter seeded past the largest numeric
//! id it was built with. Ids are never reused, so removing the last record and
//! adding a new one cannot produce a duplicate.

use crate::error::ValidationError;
use crate::filter::{self, Searchable};
use crate::mock;
use crate::types::{Order, Product, ProductDraft, Role, User, UserDraft, UserStatus};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A record with a string id unique within its collection.
pub trait Record: Searchable {
    fn id(&self) -> &str;
}

/// A record that can be created and edited from raw form input.
pub trait Editable: Record + Sized {
    type Draft;

    /// Validate `draft` and build a new record with the given id.
    fn create(id: String, draft: &Self::Draft) -> Result<Self, ValidationError>;

    /// Validate `draft` and build the edited version of `self`.
    fn edit(&self, draft: &Self::Draft) -> Result<Self, ValidationError>;
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Id scheme
// ---------------------------------------------------------------------------

/// How a collection formats its sequential ids, e.g. `PROD-` + 3 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdScheme {
    pub prefix: &'static str,
    pub width: usize,
}

impl IdScheme {
    pub const USER: IdScheme = IdScheme { prefix: "", width: 0 };
    pub const PRODUCT: IdScheme = IdScheme { prefix: "PROD-", width: 3 };
    pub const ORDER: IdScheme = IdScheme { prefix: "ORD-", width: 3 };

    pub fn format(&self, n: u64) -> String {
        format!("{}{:0width$}", self.prefix, n, width = self.width)
    }

    /// Recover the sequence number from an id produced by this scheme.
    pub fn parse(&self, id: &str) -> Option<u64> {
        id.strip_prefix(self.prefix)?.parse().ok()
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// An insertion-ordered collection of records.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    scheme: IdScheme,
    next_seq: u64,
}

impl<T: Record> Collection<T> {
    pub fn new(scheme: IdScheme, items: Vec<T>) -> Self {
        let highest = items
            .iter()
            .filter_map(|r| scheme.parse(r.id()))
            .max()
            .unwrap_or(0);
        let next_seq = highest.max(items.len() as u64) + 1;
        Self { items, scheme, next_seq }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// The id the next successful insert will receive.
    pub fn peek_next_id(&self) -> String {
        self.scheme.format(self.next_seq)
    }

    /// Records matching `query`, in collection order.
    pub fn filter(&self, query: &str) -> Vec<&T> {
        filter::filter(&self.items, query)
    }

    /// Remove and return the record with `id`.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.items.iter().position(|r| r.id() == id)?;
        let removed = self.items.remove(idx);
        tracing::debug!(id, remaining = self.items.len(), "store: record removed");
        Some(removed)
    }
}

impl<T: Editable> Collection<T> {
    /// Validate `draft` and append a new record with the next id.
    pub fn insert(&mut self, draft: &T::Draft) -> Result<&T, ValidationError> {
        let id = self.scheme.format(self.next_seq);
        let record = T::create(id, draft)?;
        self.next_seq += 1;
        tracing::debug!(id = record.id(), "store: record inserted");
        let idx = self.items.len();
        self.items.push(record);
        Ok(&self.items[idx])
    }

    /// Validate `draft` and replace the record with `id` in place.
    pub fn update(&mut self, id: &str, draft: &T::Draft) -> Result<&T, ValidationError> {
        let idx = self
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ValidationError::UnknownId(id.to_string()))?;
        let edited = self.items[idx].edit(draft)?;
        self.items[idx] = edited;
        tracing::debug!(id, "store: record updated");
        Ok(&self.items[idx])
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_stock(value: &str) -> Result<u32, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| ValidationError::InvalidNumber {
        field: "stock",
        value: value.to_string(),
    })
}

fn normalize_price(price: String) -> String {
    if price.starts_with('$') {
        price
    } else {
        format!("${price}")
    }
}

// ---------------------------------------------------------------------------
// Editable impls
// ---------------------------------------------------------------------------

impl Editable for User {
    type Draft = UserDraft;

    fn create(id: String, draft: &UserDraft) -> Result<Self, ValidationError> {
        let name = required(&draft.name, "name")?;
        let email = required(&draft.email, "email")?;
        let role = parse_or(&draft.role, Role::Viewer)?;
        let status = parse_or(&draft.status, UserStatus::Pending)?;
        Ok(User {
            id,
            name,
            email,
            role,
            status,
            last_active: "Never".to_string(),
        })
    }

    fn edit(&self, draft: &UserDraft) -> Result<Self, ValidationError> {
        let name = required(&draft.name, "name")?;
        let email = required(&draft.email, "email")?;
        let role = parse_or(&draft.role, self.role)?;
        let status = parse_or(&draft.status, self.status)?;
        Ok(User {
            id: self.id.clone(),
            name,
            email,
            role,
            status,
            last_active: self.last_active.clone(),
        })
    }
}

impl Editable for Product {
    type Draft = ProductDraft;

    fn create(id: String, draft: &ProductDraft) -> Result<Self, ValidationError> {
        let name = required(&draft.name, "name")?;
        let category = required(&draft.category, "category")?;
        let price = normalize_price(required(&draft.price, "price")?);
        let stock = parse_stock(&draft.stock)?;
        Ok(Product { id, name, category, price, stock })
    }

    fn edit(&self, draft: &ProductDraft) -> Result<Self, ValidationError> {
        Self::create(self.id.clone(), draft)
    }
}

/// Parse a closed-enum form field, falling back to `default` when blank.
fn parse_or<T>(value: &str, default: T) -> Result<T, ValidationError>
where
    T: std::str::FromStr<Err = crate::error::ParseEnumError>,
{
    if value.trim().is_empty() {
        Ok(default)
    } else {
        Ok(value.parse()?)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// All managed collections.
#[derive(Debug, Clone)]
pub struct Store {
    pub users: Collection<User>,
    pub products: Collection<Product>,
    pub orders: Collection<Order>,
}

impl Store {
    /// A store pre-populated with the sample dashboard data.
    pub fn seeded() -> Self {
        Self {
            users: Collection::new(IdScheme::USER, mock::users()),
            products: Collection::new(IdScheme::PRODUCT, mock::products()),
            orders: Collection::new(IdScheme::ORDER, mock::orders()),
        }
    }

    pub fn empty() -> Self {
        Self {
            users: Collection::new(IdScheme::USER, Vec::new()),
            products: Collection::new(IdScheme::PRODUCT, Vec::new()),
            orders: Collection::new(IdScheme::ORDER, Vec::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StockStatus;
    use pretty_assertions::assert_eq;

    fn product_draft(name: &str, category: &str, price: &str, stock: &str) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category: category.into(),
            price: price.into(),
            stock: stock.into(),
        }
    }

    #[test]
    fn id_scheme_formats_and_parses() {
        assert_eq!(IdScheme::PRODUCT.format(7), "PROD-007");
        assert_eq!(IdScheme::PRODUCT.format(1234), "PROD-1234");
        assert_eq!(IdScheme::USER.format(6), "6");
        assert_eq!(IdScheme::PRODUCT.parse("PROD-042"), Some(42));
        assert_eq!(IdScheme::PRODUCT.parse("ORD-042"), None);
    }

    #[test]
    fn insert_assigns_next_id_and_derives_status() {
        let mut store = Store::seeded();
        let p = store
            .products
            .insert(&product_draft("USB-C Hub", "Accessories", "39.99", "4"))
            .unwrap();
        assert_eq!(p.id, "PROD-007");
        assert_eq!(p.price, "$39.99");
        assert_eq!(p.status(), StockStatus::LowStock);
        assert_eq!(store.products.len(), 7);
    }

    #[test]
    fn delete_then_add_does_not_reuse_ids() {
        let mut store = Store::seeded();
        store.products.remove("PROD-006").unwrap();
        let p = store
            .products
            .insert(&product_draft("Monitor Stand", "Accessories", "$59.99", "20"))
            .unwrap();
        assert_eq!(p.id, "PROD-007");
        let ids: std::collections::HashSet<_> = store.products.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), store.products.len());
    }

    #[test]
    fn missing_required_field_rejects_without_mutation() {
        let mut store = Store::seeded();
        let before = store.products.as_slice().to_vec();
        let err = store
            .products
            .insert(&product_draft("Mouse", "", "$19.99", "10"))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("category"));
        assert_eq!(store.products.as_slice(), &before[..]);
        // Failed inserts do not burn an id
        assert_eq!(store.products.peek_next_id(), "PROD-007");
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut store = Store::seeded();
        let err = store
            .users
            .insert(&UserDraft { name: "   ".into(), email: "x@example.com".into(), ..Default::default() })
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("name"));
    }

    #[test]
    fn bad_stock_is_rejected() {
        let mut store = Store::seeded();
        let err = store
            .products
            .insert(&product_draft("Mouse", "Accessories", "$19.99", "-3"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "stock", .. }));
    }

    #[test]
    fn new_user_defaults() {
        let mut store = Store::seeded();
        let u = store
            .users
            .insert(&UserDraft {
                name: "Jessica Taylor".into(),
                email: "jessica.taylor@example.com".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(u.id, "6");
        assert_eq!(u.role, Role::Viewer);
        assert_eq!(u.status, UserStatus::Pending);
        assert_eq!(u.last_active, "Never");
    }

    #[test]
    fn edit_user_keeps_unspecified_status() {
        let mut store = Store::seeded();
        let draft = UserDraft {
            name: "Michael Brown".into(),
            email: "m.brown@example.com".into(),
            role: "editor".into(),
            status: String::new(),
        };
        let u = store.users.update("3", &draft).unwrap();
        assert_eq!(u.email, "m.brown@example.com");
        assert_eq!(u.role, Role::Editor);
        assert_eq!(u.status, UserStatus::Inactive);
        assert_eq!(u.last_active, "3 days ago");
    }

    #[test]
    fn edit_with_unknown_role_is_rejected() {
        let mut store = Store::seeded();
        let before = store.users.get("1").cloned();
        let draft = UserDraft { role: "owner".into(), ..UserDraft::from(store.users.get("1").unwrap()) };
        assert!(matches!(
            store.users.update("1", &draft),
            Err(ValidationError::InvalidChoice(_))
        ));
        assert_eq!(store.users.get("1").cloned(), before);
    }

    #[test]
    fn edit_stock_recomputes_status() {
        let mut store = Store::seeded();
        let mut draft = ProductDraft::from(store.products.get("PROD-001").unwrap());
        draft.stock = "0".into();
        let p = store.products.update("PROD-001", &draft).unwrap();
        assert_eq!(p.status(), StockStatus::OutOfStock);
    }

    #[test]
    fn update_unknown_id() {
        let mut store = Store::seeded();
        let err = store
            .products
            .update("PROD-999", &product_draft("x", "y", "1", "1"))
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownId("PROD-999".into()));
    }

    #[test]
    fn remove_unknown_is_none() {
        let mut store = Store::seeded();
        assert!(store.users.remove("42").is_none());
        assert_eq!(store.users.len(), 5);
    }
}
