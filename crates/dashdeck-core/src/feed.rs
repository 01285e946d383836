//! The notification center and the live activity ring.
//!
//! Both are newest-first and capacity-bounded: adding to a full feed evicts
//! the oldest entry. Both assign ids from their own monotonic counter.
//!
//! # Notification lifecycle
//!
//! ```text
//! add ──► Unread ──mark_read──► Read
//!            │                    │
//!            └──── delete / clear_all ──► (gone)
//! ```
//!
//! There is no way back from `Read` to `Unread`. The unread count is never
//! stored; [`NotificationCenter::unread_count`] folds over the entries each
//! time it is asked.

use crate::types::{Activity, NewActivity, Notification};
use std::collections::VecDeque;

/// Default bound on both feeds.
pub const DEFAULT_CAPACITY: usize = 10;

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Which subset of notifications the notification screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationView {
    #[default]
    All,
    Unread,
    Read,
}

impl NotificationView {
    pub fn next(self) -> Self {
        match self {
            NotificationView::All => NotificationView::Unread,
            NotificationView::Unread => NotificationView::Read,
            NotificationView::Read => NotificationView::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationView::All => "All",
            NotificationView::Unread => "Unread",
            NotificationView::Read => "Read",
        }
    }

    fn admits(self, n: &Notification) -> bool {
        match self {
            NotificationView::All => true,
            NotificationView::Unread => !n.read,
            NotificationView::Read => n.read,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    entries: VecDeque<Notification>,
    capacity: usize,
    next_id: u64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl NotificationCenter {
    /// An empty center holding at most `capacity` notifications (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// A center pre-filled with `(title, description, read)` triples, given
    /// newest first.
    pub fn with_entries<'a, I>(capacity: usize, seed: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, bool)>,
    {
        let mut center = Self::new(capacity);
        let seed: Vec<_> = seed.into_iter().collect();
        for (title, description, read) in seed.into_iter().rev() {
            let id = center.add(title, description);
            if read {
                center.mark_read(id);
            }
        }
        center
    }

    /// Prepend a new unread notification and return its id.
    pub fn add(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.entries.len() == self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                tracing::debug!(id = evicted.id, "notifications: evicted oldest");
            }
        }
        self.entries.push_front(Notification {
            id,
            title: title.into(),
            description: description.into(),
            read: false,
        });
        tracing::debug!(id, unread = self.unread_count(), "notifications: added");
        id
    }

    /// Mark one notification read. Returns `true` if it was unread before.
    /// Unknown ids are ignored.
    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                tracing::debug!(id, "notifications: marked read");
                true
            }
            _ => false,
        }
    }

    /// Mark every notification read. Returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.entries.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        tracing::debug!(changed, "notifications: marked all read");
        changed
    }

    /// Remove one notification.
    pub fn delete(&mut self, id: u64) -> Option<Notification> {
        let idx = self.entries.iter().position(|n| n.id == id)?;
        let removed = self.entries.remove(idx);
        tracing::debug!(id, "notifications: deleted");
        removed
    }

    /// Remove every notification. Ids keep counting from where they were.
    pub fn clear_all(&mut self) {
        tracing::debug!(cleared = self.entries.len(), "notifications: cleared");
        self.entries.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    pub fn read_count(&self) -> usize {
        self.entries.len() - self.unread_count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// All notifications, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Notifications admitted by `view`, newest first.
    pub fn view(&self, view: NotificationView) -> Vec<&Notification> {
        self.entries.iter().filter(|n| view.admits(n)).collect()
    }

    /// Number of notifications admitted by `view`.
    pub fn count(&self, view: NotificationView) -> usize {
        match view {
            NotificationView::All => self.len(),
            NotificationView::Unread => self.unread_count(),
            NotificationView::Read => self.read_count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// Fixed-capacity ring of the most recent activities.
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    entries: VecDeque<Activity>,
    capacity: usize,
    next_id: u64,
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ActivityFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// A feed pre-filled with `backlog`, given newest first.
    pub fn with_backlog(capacity: usize, backlog: Vec<NewActivity>) -> Self {
        let mut feed = Self::new(capacity);
        for activity in backlog.into_iter().rev() {
            feed.push(activity);
        }
        feed
    }

    /// Prepend an activity, evicting the oldest when full. Returns its id.
    pub fn push(&mut self, activity: NewActivity) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        tracing::debug!(id, kind = %activity.kind, "activity: pushed");
        self.entries.push_front(Activity::from_new(id, activity));
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Activities, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&Activity> {
        self.entries.front()
    }

    pub fn oldest(&self) -> Option<&Activity> {
        self.entries.back()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
