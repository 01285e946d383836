//! Random live-activity events.

use crate::catalog::{LOCATIONS, PRODUCTS, USERS};
use crate::Generator;
use chrono::Utc;
use dashdeck_core::types::{ActivityKind, Actor, NewActivity, Tone};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

/// Emits one [`NewActivity`] every `[min, max)` seconds, resampled per tick.
#[derive(Debug, Clone)]
pub struct ActivityGenerator {
    min_ms: u64,
    max_ms: u64,
}

impl Default for ActivityGenerator {
    fn default() -> Self {
        Self::new(8, 15)
    }
}

impl ActivityGenerator {
    /// `max_secs` is clamped so the range holds at least one millisecond.
    /// Millisecond values saturate at `u64::MAX`.
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        let min_ms = min_secs.saturating_mul(1000).min(u64::MAX - 1);
        let max_ms = max_secs.saturating_mul(1000).max(min_ms + 1);
        Self { min_ms, max_ms }
    }

    pub fn delay_range(&self) -> (Duration, Duration) {
        (Duration::from_millis(self.min_ms), Duration::from_millis(self.max_ms))
    }
}

impl Generator for ActivityGenerator {
    type Item = NewActivity;

    fn name(&self) -> &'static str {
        "activity"
    }

    fn next_delay(&mut self, rng: &mut StdRng) -> Duration {
        Duration::from_millis(rng.random_range(self.min_ms..self.max_ms))
    }

    fn generate(&mut self, rng: &mut StdRng) -> NewActivity {
        random_activity(rng)
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

/// A dollar amount in `[low, low + span)` with cent precision.
fn dollars(rng: &mut StdRng, low: u64, span: u64) -> String {
    let cents = rng.random_range(low * 100..(low + span) * 100);
    format!("${}.{:02}", cents / 100, cents % 100)
}

pub fn random_activity(rng: &mut StdRng) -> NewActivity {
    let kind = *pick(rng, &ActivityKind::ALL);
    let actor = Actor::new(*pick(rng, &USERS));
    let product = *pick(rng, &PRODUCTS);
    let location = *pick(rng, &LOCATIONS);

    let (action, target, amount, tone) = match kind {
        ActivityKind::Purchase => {
            ("purchased", product, Some(dollars(rng, 50, 500)), Some(Tone::Positive))
        }
        ActivityKind::Login => ("logged in from", location, None, None),
        ActivityKind::Alert => ("triggered inventory alert for", product, None, Some(Tone::Warning)),
        ActivityKind::Refund => {
            ("requested a refund for", product, Some(dollars(rng, 30, 200)), Some(Tone::Negative))
        }
    };

    NewActivity {
        actor,
        action: action.to_string(),
        target: target.to_string(),
        at: Utc::now(),
        kind,
        amount,
        tone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn parse_dollars(s: &str) -> f64 {
        s.trim_start_matches('$').parse().unwrap()
    }

    #[test]
    fn delays_stay_within_range() {
        let mut generator = ActivityGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let d = generator.next_delay(&mut rng);
            assert!(d >= Duration::from_secs(8) && d < Duration::from_secs(15), "{d:?}");
        }
    }

    #[test]
    fn records_are_shaped_by_kind() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let a = random_activity(&mut rng);
            assert!(USERS.contains(&a.actor.name.as_str()));
            match a.kind {
                ActivityKind::Purchase => {
                    let v = parse_dollars(a.amount.as_deref().unwrap());
                    assert!((50.0..550.0).contains(&v));
                    assert_eq!(a.tone, Some(Tone::Positive));
                    assert!(PRODUCTS.contains(&a.target.as_str()));
                }
                ActivityKind::Login => {
                    assert!(LOCATIONS.contains(&a.target.as_str()));
                    assert_eq!((a.amount, a.tone), (None, None));
                }
                ActivityKind::Alert => {
                    assert_eq!(a.tone, Some(Tone::Warning));
                    assert!(a.amount.is_none());
                }
                ActivityKind::Refund => {
                    let v = parse_dollars(a.amount.as_deref().unwrap());
                    assert!((30.0..230.0).contains(&v));
                    assert_eq!(a.tone, Some(Tone::Negative));
                }
            }
        }
    }

    #[test]
    fn every_kind_eventually_appears() {
        let mut rng = StdRng::seed_from_u64(3);
        let seen: std::collections::HashSet<_> =
            (0..200).map(|_| random_activity(&mut rng).kind).collect();
        assert_eq!(seen.len(), ActivityKind::ALL.len());
    }

    #[test]
    fn huge_range_saturates() {
        let mut generator = ActivityGenerator::new(u64::MAX / 10, u64::MAX / 10);
        let (lo, hi) = generator.delay_range();
        assert_eq!(lo, Duration::from_millis(u64::MAX - 1));
        assert_eq!(hi, Duration::from_millis(u64::MAX));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generator.next_delay(&mut rng), lo);
    }

    #[test]
    fn degenerate_range_is_clamped() {
        let (lo, hi) = ActivityGenerator::new(5, 5).delay_range();
        assert!(hi > lo);
    }
}
