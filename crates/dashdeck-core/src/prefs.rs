//! Preference persistence: a small durable key-value mirror.
//!
//! Three keys are used:
//!
//! | Key | Value | Written |
//! |-----|-------|---------|
//! | `dashboard-theme` | `light`, `dark` or `system` | whenever theme or tab changes |
//! | `dashboard-active-tab` | a [`Tab`] identifier | whenever theme or tab changes |
//! | `dashboard-settings` | serialized [`Settings`] | only on explicit save |
//!
//! [`FileStore`] keeps all keys in one JSON object on disk; [`MemoryStore`]
//! is the in-process equivalent used by tests. Values that fail to parse are
//! ignored in favour of defaults.

use crate::error::{ParseEnumError, PrefsError};
use crate::settings::Settings;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const THEME_KEY: &str = "dashboard-theme";
pub const ACTIVE_TAB_KEY: &str = "dashboard-active-tab";
pub const SETTINGS_KEY: &str = "dashboard-settings";

// ---------------------------------------------------------------------------
// Persisted values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Light ↔ dark, the header toggle. `System` toggles to light.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark | ThemeMode::System => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            _ => Err(ParseEnumError::new("theme", s)),
        }
    }
}

/// A top-level dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Users,
    Products,
    Notifications,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Users,
        Tab::Products,
        Tab::Notifications,
        Tab::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Users => "users",
            Tab::Products => "products",
            Tab::Notifications => "notifications",
            Tab::Settings => "settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Users => "Users",
            Tab::Products => "Products",
            Tab::Notifications => "Notifications",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn from_index(idx: usize) -> Option<Tab> {
        Tab::ALL.get(idx).copied()
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("tab", s))
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Durable string key-value storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// Non-durable store, used by tests and when the preference file is unusable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    /// Number of successful `set` calls, for asserting write behaviour.
    pub writes: usize,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// All keys in one JSON object file, rewritten in full on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`. A missing file is an
    /// empty store; an unreadable or corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| PrefsError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PrefsError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "prefs: opened");
        Ok(Self { path, values })
    }

    /// Start from an empty store at `path`, discarding whatever is on disk.
    pub fn reset(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let store = Self { path: path.into(), values: BTreeMap::new() };
        store.flush()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PrefsError> {
        let io_err = |source| PrefsError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(&self.values)
            .map_err(|source| PrefsError::Serialize { key: "preferences", source })?;
        std::fs::write(&self.path, text).map_err(io_err)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Default location: `$XDG_DATA_HOME/dashdeck/preferences.json`, falling back
/// to `~/.local/share/dashdeck/preferences.json`.
pub fn default_path() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".local")
                .join("share")
        })
        .join("dashdeck")
        .join("preferences.json")
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// The theme and active tab, mirrored to a [`PreferenceStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: ThemeMode,
    pub active_tab: Tab,
}

impl Preferences {
    /// Read both keys once. Missing or unrecognised values keep their default.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let mut prefs = Self::default();
        if let Some(raw) = store.get(THEME_KEY) {
            match raw.parse() {
                Ok(theme) => prefs.theme = theme,
                Err(e) => tracing::warn!(error = %e, "prefs: ignoring stored theme"),
            }
        }
        if let Some(raw) = store.get(ACTIVE_TAB_KEY) {
            match raw.parse() {
                Ok(tab) => prefs.active_tab = tab,
                Err(e) => tracing::warn!(error = %e, "prefs: ignoring stored tab"),
            }
        }
        tracing::debug!(theme = %prefs.theme, tab = %prefs.active_tab, "prefs: loaded");
        prefs
    }

    /// Write both keys.
    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<(), PrefsError> {
        store.set(THEME_KEY, self.theme.as_str())?;
        store.set(ACTIVE_TAB_KEY, self.active_tab.as_str())
    }

    /// Change the theme, persisting when it actually changed.
    pub fn set_theme(
        &mut self,
        theme: ThemeMode,
        store: &mut dyn PreferenceStore,
    ) -> Result<bool, PrefsError> {
        if self.theme == theme {
            return Ok(false);
        }
        self.theme = theme;
        self.save(store).map(|_| true)
    }

    /// Change the active tab, persisting when it actually changed.
    pub fn set_active_tab(
        &mut self,
        tab: Tab,
        store: &mut dyn PreferenceStore,
    ) -> Result<bool, PrefsError> {
        if self.active_tab == tab {
            return Ok(false);
        }
        self.active_tab = tab;
        self.save(store).map(|_| true)
    }
}

/// Read the saved settings object, if any. A corrupt value yields `None`.
pub fn load_settings(store: &dyn PreferenceStore) -> Option<Settings> {
    let raw = store.get(SETTINGS_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(error = %e, "prefs: ignoring stored settings");
            None
        }
    }
}

/// Serialize and write the settings object.
pub fn save_settings(
    settings: &Settings,
    store: &mut dyn PreferenceStore,
) -> Result<(), PrefsError> {
    let raw = serde_json::to_string(settings)
        .map_err(|source| PrefsError::Serialize { key: SETTINGS_KEY, source })?;
    store.set(SETTINGS_KEY, &raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_store_gives_defaults() {
        let store = MemoryStore::default();
        assert_eq!(Preferences::load(&store), Preferences::default());
        assert_eq!(Preferences::default().theme, ThemeMode::Light);
        assert_eq!(Preferences::default().active_tab, Tab::Dashboard);
    }

    #[test]
    fn garbage_values_are_ignored() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        store.set(ACTIVE_TAB_KEY, "finances").unwrap();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn changes_write_both_keys() {
        let mut store = MemoryStore::default();
        let mut prefs = Preferences::default();
        assert!(prefs.set_theme(ThemeMode::Dark, &mut store).unwrap());
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(store.get(ACTIVE_TAB_KEY).as_deref(), Some("dashboard"));
        assert!(prefs.set_active_tab(Tab::Products, &mut store).unwrap());
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn unchanged_values_do_not_write() {
        let mut store = MemoryStore::default();
        let mut prefs = Preferences::default();
        assert!(!prefs.set_theme(ThemeMode::Light, &mut store).unwrap());
        assert!(!prefs.set_active_tab(Tab::Dashboard, &mut store).unwrap());
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn tab_parse_and_cycle() {
        assert_eq!("Products".parse::<Tab>().unwrap(), Tab::Products);
        assert_eq!(Tab::Settings.next(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.prev(), Tab::Settings);
        assert_eq!(Tab::from_index(3), Some(Tab::Notifications));
        assert_eq!(Tab::from_index(5), None);
    }

    #[test]
    fn theme_toggle() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::System.toggled(), ThemeMode::Light);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        {
            let mut store = FileStore::open(&path).unwrap();
            let mut prefs = Preferences::default();
            prefs.set_theme(ThemeMode::System, &mut store).unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(Preferences::load(&store).theme, ThemeMode::System);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(FileStore::open(&path), Err(PrefsError::Corrupt { .. })));
    }

    #[test]
    fn settings_round_trip_and_corruption() {
        let mut store = MemoryStore::default();
        assert!(load_settings(&store).is_none());
        let mut settings = Settings::default();
        settings.notifications.sms = true;
        save_settings(&settings, &mut store).unwrap();
        assert_eq!(load_settings(&store), Some(settings));
        store.set(SETTINGS_KEY, "{not json").unwrap();
        assert!(load_settings(&store).is_none());
    }
}
