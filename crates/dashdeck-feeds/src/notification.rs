//! The periodic "new activity" notification.

use crate::Generator;
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use std::time::Duration;

pub const TITLE: &str = "New activity detected";

/// A notification before the center assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub title: String,
    pub description: String,
}

impl NewNotification {
    pub fn at(time: DateTime<Local>) -> Self {
        Self {
            title: TITLE.to_string(),
            description: format!("Activity occurred at {}", time.format("%H:%M:%S")),
        }
    }
}

/// Fires on a fixed interval.
#[derive(Debug, Clone)]
pub struct NotificationGenerator {
    every: Duration,
}

impl Default for NotificationGenerator {
    fn default() -> Self {
        Self::new(Duration::from_secs(120))
    }
}

impl NotificationGenerator {
    pub fn new(every: Duration) -> Self {
        Self { every: every.max(Duration::from_millis(1)) }
    }
}

impl Generator for NotificationGenerator {
    type Item = NewNotification;

    fn name(&self) -> &'static str {
        "notification"
    }

    fn next_delay(&mut self, _rng: &mut StdRng) -> Duration {
        self.every
    }

    fn generate(&mut self, _rng: &mut StdRng) -> NewNotification {
        NewNotification::at(Local::now())
    }
}
