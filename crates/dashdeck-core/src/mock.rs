//! Sample data the dashboard starts with.

use crate::types::{
    ActivityKind, Actor, NewActivity, Order, OrderStatus, Product, Role, Tone, User, UserStatus,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};

pub fn users() -> Vec<User> {
    // (name, role, status, last active)
    const USERS: &[(&str, Role, UserStatus, &str)] = &[
        ("John Smith", Role::Admin, UserStatus::Active, "Just now"),
        ("Sarah Johnson", Role::Editor, UserStatus::Active, "2 hours ago"),
        ("Michael Brown", Role::Viewer, UserStatus::Inactive, "3 days ago"),
        ("Emily Davis", Role::Editor, UserStatus::Active, "1 hour ago"),
        ("David Wilson", Role::Viewer, UserStatus::Pending, "Never"),
    ];

    USERS
        .iter()
        .enumerate()
        .map(|(i, (name, role, status, last_active))| User {
            id: (i + 1).to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            role: *role,
            status: *status,
            last_active: last_active.to_string(),
        })
        .collect()
}

pub fn products() -> Vec<Product> {
    const PRODUCTS: &[(&str, &str, &str, u32)] = &[
        ("Premium Headphones", "Electronics", "$299.99", 45),
        ("Wireless Keyboard", "Electronics", "$89.99", 12),
        ("Smart Watch", "Electronics", "$199.99", 28),
        ("Bluetooth Speaker", "Electronics", "$129.99", 0),
        ("Laptop Stand", "Accessories", "$49.99", 56),
        ("External SSD", "Storage", "$159.99", 8),
    ];

    PRODUCTS
        .iter()
        .enumerate()
        .map(|(i, (name, category, price, stock))| Product {
            id: format!("PROD-{:03}", i + 1),
            name: name.to_string(),
            category: category.to_string(),
            price: price.to_string(),
            stock: *stock,
        })
        .collect()
}

pub fn orders() -> Vec<Order> {
    const ORDERS: &[(&str, &str, u32, &str, OrderStatus)] = &[
        ("John Smith", "Premium Headphones", 12, "$299.99", OrderStatus::Completed),
        ("Sarah Johnson", "Wireless Keyboard", 13, "$89.99", OrderStatus::Processing),
        ("Michael Brown", "Smart Watch", 14, "$199.99", OrderStatus::Completed),
        ("Emily Davis", "Bluetooth Speaker", 15, "$129.99", OrderStatus::Pending),
        ("David Wilson", "Laptop Stand", 16, "$49.99", OrderStatus::Completed),
        ("Jessica Taylor", "External SSD", 17, "$159.99", OrderStatus::Cancelled),
    ];

    ORDERS
        .iter()
        .enumerate()
        .map(|(i, (customer, product, day, amount, status))| Order {
            id: format!("ORD-{:03}", i + 1),
            customer: customer.to_string(),
            product: product.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 6, *day).unwrap_or_default(),
            amount: amount.to_string(),
            status: *status,
        })
        .collect()
}

/// `(title, description, read)` for the notifications present at startup.
pub fn notifications() -> Vec<(&'static str, &'static str, bool)> {
    vec![
        ("New order received", "Order #1234 has been placed", false),
        ("Payment successful", "Payment for order #1233 was successful", false),
        ("New user registered", "John Doe has registered", true),
    ]
}

/// The recent-activity backlog, newest first, timestamped relative to `now`.
pub fn activities(now: DateTime<Utc>) -> Vec<NewActivity> {
    let entry = |name: &str,
                 action: &str,
                 target: &str,
                 minutes_ago: i64,
                 kind: ActivityKind,
                 amount: Option<&str>,
                 tone: Option<Tone>| NewActivity {
        actor: Actor::new(name),
        action: action.to_string(),
        target: target.to_string(),
        at: now - Duration::minutes(minutes_ago),
        kind,
        amount: amount.map(str::to_string),
        tone,
    };

    vec![
        entry(
            "John Smith",
            "purchased",
            "Premium Headphones",
            0,
            ActivityKind::Purchase,
            Some("$299.99"),
            Some(Tone::Positive),
        ),
        entry("Emily Davis", "logged in from", "New York, USA", 2, ActivityKind::Login, None, None),
        entry(
            "Michael Brown",
            "requested a refund for",
            "Wireless Keyboard",
            5,
            ActivityKind::Refund,
            Some("$89.99"),
            Some(Tone::Negative),
        ),
        entry(
            "Sarah Johnson",
            "added 5 items to cart worth",
            "$450.95",
            10,
            ActivityKind::Purchase,
            Some("$450.95"),
            Some(Tone::Positive),
        ),
        entry(
            "David Wilson",
            "triggered inventory alert for",
            "Bluetooth Speakers",
            15,
            ActivityKind::Alert,
            None,
            Some(Tone::Warning),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_emails_follow_names() {
        let users = users();
        assert_eq!(users[0].email, "john.smith@example.com");
        assert_eq!(users[4].email, "david.wilson@example.com");
    }

    #[test]
    fn activity_backlog_is_newest_first() {
        let now = Utc::now();
        let backlog = activities(now);
        assert!(backlog.windows(2).all(|w| w[0].at >= w[1].at));
    }
}
