//! Test builders: readable constructors for drafts, activities and
//! notification centers.
//!
//! These are for test assertions, not production use. They panic on invalid
//! input rather than returning `Result`.

use chrono::{DateTime, Duration, Utc};
use dashdeck_core::{
    types::{ActivityKind, Actor, NewActivity, ProductDraft, Tone, UserDraft},
    NotificationCenter,
};

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// Fluent builder for [`UserDraft`].
///
/// ```rust
/// let draft = UserDraftBuilder::new("Ada", "ada@example.com").role("admin").build();
/// ```
pub struct UserDraftBuilder {
    draft: UserDraft,
}

impl UserDraftBuilder {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            draft: UserDraft { name: name.into(), email: email.into(), ..Default::default() },
        }
    }

    pub fn role(mut self, role: &str) -> Self {
        self.draft.role = role.into();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.draft.status = status.into();
        self
    }

    pub fn build(self) -> UserDraft {
        self.draft
    }
}

/// Fluent builder for [`ProductDraft`].
pub struct ProductDraftBuilder {
    draft: ProductDraft,
}

impl ProductDraftBuilder {
    pub fn new(name: &str, category: &str, price: &str) -> Self {
        Self {
            draft: ProductDraft {
                name: name.into(),
                category: category.into(),
                price: price.into(),
                stock: String::new(),
            },
        }
    }

    pub fn stock(mut self, stock: impl ToString) -> Self {
        self.draft.stock = stock.to_string();
        self
    }

    pub fn build(self) -> ProductDraft {
        self.draft
    }
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// Fluent builder for [`NewActivity`]. Defaults to a login happening now.
pub struct ActivityBuilder {
    activity: NewActivity,
}

impl ActivityBuilder {
    pub fn new(actor: &str) -> Self {
        Self {
            activity: NewActivity {
                actor: Actor::new(actor),
                action: "logged in from".into(),
                target: "Berlin, Germany".into(),
                at: Utc::now(),
                kind: ActivityKind::Login,
                amount: None,
                tone: None,
            },
        }
    }

    pub fn purchase(mut self, product: &str, amount: &str) -> Self {
        self.activity.kind = ActivityKind::Purchase;
        self.activity.action = "purchased".into();
        self.activity.target = product.into();
        self.activity.amount = Some(amount.into());
        self.activity.tone = Some(Tone::Positive);
        self
    }

    pub fn minutes_ago(mut self, now: DateTime<Utc>, minutes: i64) -> Self {
        self.activity.at = now - Duration::minutes(minutes);
        self
    }

    pub fn build(self) -> NewActivity {
        self.activity
    }
}

/// `n` distinct activities, actor names `user-0` .. `user-{n-1}`.
pub fn activities(n: usize) -> Vec<NewActivity> {
    (0..n).map(|i| ActivityBuilder::new(&format!("user-{i}")).build()).collect()
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// A center holding `titles` as unread notifications, first title newest.
pub fn center_with(capacity: usize, titles: &[&str]) -> NotificationCenter {
    NotificationCenter::with_entries(capacity, titles.iter().map(|t| (*t, "test", false)))
}
