//! Configuration types for dashdeck.
//!
//! [`Config::load`] reads `$XDG_CONFIG_HOME/dashdeck/config.toml` (default
//! `~/.config`), creating it with hardcoded defaults if it does not yet
//! exist. [`Config::defaults`] returns the same defaults without touching the
//! filesystem.

use crate::metrics::Timeframe;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
tick_ms           = 250
toast_secs        = 3
default_timeframe = "yearly"

[feeds]
enabled               = true
activity_min_secs     = 8
activity_max_secs     = 15
notification_secs     = 120
activity_capacity     = 10
notification_capacity = 10
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Event-loop poll interval; feeds are drained once per tick.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
    #[serde(default)]
    pub default_timeframe: Timeframe,
}

fn default_tick_ms() -> u64 { 250 }
fn default_toast_secs() -> u64 { 3 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            toast_secs: default_toast_secs(),
            default_timeframe: Timeframe::default(),
        }
    }
}

/// `[feeds]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    /// When false no generator tasks are spawned.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_activity_min_secs")]
    pub activity_min_secs: u64,
    #[serde(default = "default_activity_max_secs")]
    pub activity_max_secs: u64,
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    #[serde(default = "default_capacity")]
    pub activity_capacity: usize,
    #[serde(default = "default_capacity")]
    pub notification_capacity: usize,
}

fn default_enabled() -> bool { true }
fn default_activity_min_secs() -> u64 { 8 }
fn default_activity_max_secs() -> u64 { 15 }
fn default_notification_secs() -> u64 { 120 }
fn default_capacity() -> usize { 10 }

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            activity_min_secs: default_activity_min_secs(),
            activity_max_secs: default_activity_max_secs(),
            notification_secs: default_notification_secs(),
            activity_capacity: default_capacity(),
            notification_capacity: default_capacity(),
        }
    }
}

/// Longest generator interval accepted from the config file (one day).
pub const MAX_FEED_SECS: u64 = 86_400;

impl FeedsConfig {
    /// The activity delay range `[min, max)` in seconds. Both ends are
    /// clamped to `1..=MAX_FEED_SECS` and the range holds at least a second.
    pub fn activity_range(&self) -> (u64, u64) {
        let min = self.activity_min_secs.clamp(1, MAX_FEED_SECS);
        let max = self.activity_max_secs.min(MAX_FEED_SECS).max(min + 1);
        (min, max)
    }

    /// The notification interval, clamped to `1..=MAX_FEED_SECS` seconds.
    pub fn notification_interval(&self) -> Duration {
        Duration::from_secs(self.notification_secs.clamp(1, MAX_FEED_SECS))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from the user config file, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer the file at `path` (if present) over the built-in defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("dashdeck")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.ui.tick_ms, 250);
        assert_eq!(cfg.ui.toast_secs, 3);
        assert_eq!(cfg.ui.default_timeframe, Timeframe::Yearly);
        assert!(cfg.feeds.enabled);
        assert_eq!(cfg.feeds.activity_range(), (8, 15));
        assert_eq!(cfg.feeds.notification_secs, 120);
        assert_eq!(cfg.feeds.activity_capacity, 10);
    }

    #[test]
    fn user_file_overrides_single_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feeds]\nenabled = false\n\n[ui]\ndefault_timeframe = \"weekly\"\n")
            .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert!(!cfg.feeds.enabled);
        assert_eq!(cfg.feeds.notification_secs, 120);
        assert_eq!(cfg.ui.default_timeframe, Timeframe::Weekly);
        assert_eq!(cfg.ui.tick_ms, 250);
    }

    #[test]
    fn missing_file_is_just_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.feeds.activity_range(), (8, 15));
    }

    #[test]
    fn degenerate_activity_range_is_widened() {
        let feeds = FeedsConfig { activity_min_secs: 0, activity_max_secs: 0, ..FeedsConfig::default() };
        assert_eq!(feeds.activity_range(), (1, 2));
    }

    #[test]
    fn huge_intervals_are_capped() {
        let feeds = FeedsConfig {
            activity_min_secs: u64::MAX / 10,
            activity_max_secs: u64::MAX,
            notification_secs: u64::MAX,
            ..FeedsConfig::default()
        };
        assert_eq!(feeds.activity_range(), (MAX_FEED_SECS, MAX_FEED_SECS + 1));
        assert_eq!(feeds.notification_interval(), Duration::from_secs(MAX_FEED_SECS));

        let zero = FeedsConfig { notification_secs: 0, ..FeedsConfig::default() };
        assert_eq!(zero.notification_interval(), Duration::from_secs(1));
    }
}
