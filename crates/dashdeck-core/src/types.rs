//! Core record types for dashdeck.
//!
//! Users, products and orders are the managed collections; notifications and
//! activities are feed entries. Status tags are closed enums with a stable
//! lowercase (or title-case, for orders) text form that doubles as the search
//! field and the on-screen badge.

use crate::error::ParseEnumError;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A dashboard user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    /// Free-form label such as `"2 hours ago"` or `"Never"`.
    pub last_active: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "pending" => Ok(UserStatus::Pending),
            _ => Err(ParseEnumError::new("status", s)),
        }
    }
}

/// Raw form input for creating or editing a [`User`].
///
/// Every field is the text exactly as typed; validation and parsing happen in
/// [`crate::store::Collection::insert`] / [`crate::store::Collection::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    /// Blank means `Viewer`.
    pub role: String,
    /// Blank means `pending` for new users and "unchanged" for edits.
    pub status: String,
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            status: user.status.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Stock threshold at or below which a product counts as low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 15;

/// An inventory item. Its [`StockStatus`] is always derived from `stock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Display price, always `$`-prefixed.
    pub price: String,
    pub stock: u32,
}

impl Product {
    pub fn status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0 => StockStatus::OutOfStock,
            s if s <= LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form input for creating or editing a [`Product`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    /// Blank means 0.
    pub stock: String,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.clone(),
            stock: product.stock.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub product: String,
    pub date: NaiveDate,
    pub amount: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Completed,
    Processing,
    Pending,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Completed => "Completed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Pending => "Pending",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// A notification in the [`NotificationCenter`](crate::feed::NotificationCenter).
///
/// `read` only ever goes from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub read: bool,
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// The person an activity is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub name: String,
    pub initials: String,
}

impl Actor {
    /// Build an actor, deriving initials from the first letter of each word.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let initials = name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        Self { name, initials }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Purchase,
    Login,
    Alert,
    Refund,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::Purchase,
        ActivityKind::Login,
        ActivityKind::Alert,
        ActivityKind::Refund,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Purchase => "purchase",
            ActivityKind::Login => "login",
            ActivityKind::Alert => "alert",
            ActivityKind::Refund => "refund",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge tone for an activity's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
}

/// An activity before the feed has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub actor: Actor,
    pub action: String,
    pub target: String,
    pub at: DateTime<Utc>,
    pub kind: ActivityKind,
    pub amount: Option<String>,
    pub tone: Option<Tone>,
}

/// An entry in the live [`ActivityFeed`](crate::feed::ActivityFeed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: u64,
    pub actor: Actor,
    pub action: String,
    pub target: String,
    pub at: DateTime<Utc>,
    pub kind: ActivityKind,
    pub amount: Option<String>,
    pub tone: Option<Tone>,
}

impl Activity {
    pub(crate) fn from_new(id: u64, new: NewActivity) -> Self {
        Self {
            id,
            actor: new.actor,
            action: new.action,
            target: new.target,
            at: new.at,
            kind: new.kind,
            amount: new.amount,
            tone: new.tone,
        }
    }

    /// Relative timestamp label (`"Just now"`, `"5 minutes ago"`, …) as of `now`.
    pub fn time_label(&self, now: DateTime<Utc>) -> String {
        relative_label(self.at, now)
    }
}

/// Render the distance between `at` and `now` as a coarse human label.
/// Timestamps in the future read as `"Just now"`.
pub fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds().max(0);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };
    match secs {
        0..=59 => "Just now".to_string(),
        60..=3_599 => plural(secs / 60, "minute"),
        3_600..=86_399 => plural(secs / 3_600, "hour"),
        _ => plural(secs / 86_400, "day"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
