//! dashdeck TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod screens;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState};

use dashdeck_core::{
    config::Config,
    prefs::{self, FileStore, MemoryStore, PreferenceStore},
};
use std::path::PathBuf;

/// Startup options from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Preference file; `None` means [`prefs::default_path`].
    pub prefs_path: Option<PathBuf>,
    /// Discard stored preferences before starting.
    pub reset_prefs: bool,
}

/// Open the preference file, falling back to a non-durable store when it
/// cannot be used. The error, if any, is returned for the UI to report.
fn open_prefs(opts: &RunOptions) -> (Box<dyn PreferenceStore>, Option<String>) {
    let path = opts.prefs_path.clone().unwrap_or_else(prefs::default_path);
    let opened = if opts.reset_prefs {
        tracing::info!(path = %path.display(), "resetting preferences");
        FileStore::reset(&path)
    } else {
        FileStore::open(&path)
    };
    match opened {
        Ok(store) => (Box::new(store), None),
        Err(e) => {
            tracing::warn!(error = %e, "preferences unavailable, keeping them in memory");
            (Box::new(MemoryStore::default()), Some(e.to_string()))
        }
    }
}

/// Start the dashboard and block until the user quits.
pub fn run(opts: RunOptions) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        Config::defaults()
    });

    let (store, prefs_error) = open_prefs(&opts);
    let mut state = AppState::new(config, store);
    if let Some(msg) = prefs_error {
        state.toast("Preferences not loaded", msg, widgets::toast::ToastKind::Destructive);
    }

    // Generators need a runtime; the UI loop itself stays synchronous.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("dashdeck-feeds")
        .enable_all()
        .build()?;
    let guard = runtime.enter();

    let feeds = state
        .config
        .feeds
        .enabled
        .then(|| app::LiveFeeds::spawn(&state.config.feeds));

    let mut app = App::new(state, feeds);
    let result = app.run();
    drop(guard);

    if let Some(feeds) = app.into_feeds() {
        runtime.block_on(feeds.shutdown());
    }
    tracing::info!("dashdeck exited");
    result
}
