//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Every mutation of dashboard
//! state happens in [`AppState::handle`] or while draining the live feeds,
//! both on the event-loop thread.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    screens,
    theme::Theme,
    widgets::{
        command_bar::CommandBarState,
        form::{FormAction, FormKind, FormState},
        query_bar::QueryBarState,
        settings_panel::{self, SettingsRow},
        toast::{ToastKind, ToastQueue},
    },
};
use chrono::Utc;
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dashdeck_core::{
    config::{Config, FeedsConfig},
    feed::{ActivityFeed, NotificationCenter, NotificationView},
    filter,
    metrics::Timeframe,
    mock,
    prefs::{self, PreferenceStore, Preferences, Tab, ThemeMode},
    settings::Settings,
    store::Store,
    types::{NewActivity, Notification, Order, Product, User},
    PrefsError, Record,
};
use dashdeck_feeds::{ActivityGenerator, FeedHandle, NewNotification, NotificationGenerator};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

const PAGE: usize = 10;

// ---------------------------------------------------------------------------
// Focus + modal types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The active screen's table, list or settings panel.
    Main,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone)]
pub enum Modal {
    Form(FormState),
    /// Waiting for `y` before removing a user or product.
    ConfirmDelete { tab: Tab, id: String, name: String },
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub store: Store,
    pub notifications: NotificationCenter,
    pub activity: ActivityFeed,
    pub prefs: Preferences,
    pub prefs_store: Box<dyn PreferenceStore>,
    pub settings: Settings,
    /// Settings as last loaded or saved; the screen is dirty when they differ.
    pub saved_settings: Settings,
    pub timeframe: Timeframe,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    /// One search query per tab, indexed by [`Tab::index`].
    pub queries: [QueryBarState; 5],
    /// Selected row per tab, clamped to the visible rows when read.
    pub selected: [usize; 5],
    pub notification_view: NotificationView,
    pub modal: Option<Modal>,
    pub toasts: ToastQueue,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Whether generator tasks are feeding this state.
    pub live: bool,
    pub quit: bool,
}

impl AppState {
    /// Build the startup state: seeded records, the notification and activity
    /// backlogs, and whatever preferences `prefs_store` holds.
    pub fn new(config: Config, prefs_store: Box<dyn PreferenceStore>) -> Self {
        let prefs = Preferences::load(prefs_store.as_ref());
        let mut settings = prefs::load_settings(prefs_store.as_ref()).unwrap_or_default();
        settings.appearance.theme = prefs.theme;

        let notifications = NotificationCenter::with_entries(
            config.feeds.notification_capacity,
            mock::notifications(),
        );
        let activity =
            ActivityFeed::with_backlog(config.feeds.activity_capacity, mock::activities(Utc::now()));

        tracing::info!(theme = %prefs.theme, tab = %prefs.active_tab, "app state initialised");

        AppState {
            store: Store::seeded(),
            notifications,
            activity,
            prefs,
            prefs_store,
            saved_settings: settings.clone(),
            settings,
            timeframe: config.ui.default_timeframe,
            focus: Focus::Main,
            prev_focus: Focus::Main,
            queries: Default::default(),
            selected: [0; 5],
            notification_view: NotificationView::All,
            modal: None,
            toasts: ToastQueue::new(Duration::from_secs(config.ui.toast_secs)),
            theme: Theme::for_mode(prefs.theme),
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            live: false,
            quit: false,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.prefs.active_tab
    }

    pub fn query(&self, tab: Tab) -> &str {
        self.queries[tab.index()].query()
    }

    pub fn settings_dirty(&self) -> bool {
        self.settings != self.saved_settings
    }

    // -- visible rows ------------------------------------------------------

    pub fn visible_users(&self) -> Vec<&User> {
        self.store.users.filter(self.query(Tab::Users))
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        self.store.products.filter(self.query(Tab::Products))
    }

    /// Recent orders. A query of only whitespace counts as empty here.
    pub fn visible_orders(&self) -> Vec<&Order> {
        let query = self.query(Tab::Dashboard);
        if query.trim().is_empty() {
            return self.store.orders.iter().collect();
        }
        self.store.orders.filter(query)
    }

    /// Notifications in the current view, narrowed by the search query.
    pub fn visible_notifications(&self) -> Vec<&Notification> {
        filter(self.notifications.view(self.notification_view), self.query(Tab::Notifications))
    }

    fn row_count(&self, tab: Tab) -> usize {
        match tab {
            Tab::Dashboard => self.visible_orders().len(),
            Tab::Users => self.visible_users().len(),
            Tab::Products => self.visible_products().len(),
            Tab::Notifications => self.visible_notifications().len(),
            Tab::Settings => settings_panel::ROW_COUNT,
        }
    }

    /// Selected row of `tab`, clamped to what is currently visible.
    pub fn selection(&self, tab: Tab) -> usize {
        self.selected[tab.index()].min(self.row_count(tab).saturating_sub(1))
    }

    // -- shared mutations --------------------------------------------------

    pub fn toast(&mut self, title: impl Into<String>, description: impl Into<String>, kind: ToastKind) {
        self.toasts.push(title, description, kind, Instant::now());
    }

    fn prefs_failed(&mut self, err: PrefsError) {
        tracing::warn!(error = %err, "prefs: write failed");
        self.toast("Preferences not saved", err.to_string(), ToastKind::Destructive);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.focus == Focus::QueryBar {
            self.focus = Focus::Main;
        }
        let from = self.active_tab();
        match self.prefs.set_active_tab(tab, self.prefs_store.as_mut()) {
            Ok(true) => tracing::debug!(%from, to = %tab, "tab switched"),
            Ok(false) => {}
            Err(e) => self.prefs_failed(e),
        }
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        if let Err(e) = self.prefs.set_theme(mode, self.prefs_store.as_mut()) {
            self.prefs_failed(e);
        }
        self.theme = Theme::for_mode(mode);
        // Theme has its own key and never marks the settings screen dirty.
        self.settings.appearance.theme = mode;
        self.saved_settings.appearance.theme = mode;
        tracing::debug!(theme = %mode, dark = self.theme.dark, "theme changed");
    }

    /// Add an unread notification and announce it with a toast.
    pub fn notify(&mut self, title: impl Into<String>, description: impl Into<String>) {
        let title = title.into();
        let description = description.into();
        let id = self.notifications.add(title.clone(), description.clone());
        tracing::debug!(id, unread = self.notifications.unread_count(), "notification added");
        self.toast(title, description, ToastKind::Default);
    }

    pub fn mark_all_read(&mut self) {
        let changed = self.notifications.mark_all_read();
        tracing::debug!(changed, "notifications: all read");
        self.toast(
            "All notifications marked as read",
            "All notifications have been marked as read.",
            ToastKind::Default,
        );
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear_all();
        self.selected[Tab::Notifications.index()] = 0;
        self.toast("All notifications cleared", "All notifications have been cleared.", ToastKind::Default);
    }

    pub fn save_settings(&mut self) {
        match prefs::save_settings(&self.settings, self.prefs_store.as_mut()) {
            Ok(()) => {
                self.saved_settings = self.settings.clone();
                tracing::info!("settings saved");
                self.toast("Settings saved", "Your settings have been saved successfully.", ToastKind::Default);
            }
            Err(e) => self.prefs_failed(e),
        }
    }

    /// Quit, refusing while settings are unsaved unless `force`.
    pub fn request_quit(&mut self, force: bool) {
        if !force && self.settings_dirty() {
            tracing::debug!("quit refused: unsaved settings");
            self.toast(
                "Unsaved settings",
                "Press s or :save to keep them, or :q! to discard.",
                ToastKind::Destructive,
            );
            return;
        }
        tracing::debug!(force, "quit");
        self.quit = true;
    }

    // -- feeds -------------------------------------------------------------

    pub fn apply_activity(&mut self, activity: NewActivity) {
        let id = self.activity.push(activity);
        tracing::debug!(id, len = self.activity.len(), "activity received");
    }

    pub fn apply_notification(&mut self, n: NewNotification) {
        self.notify(n.title, n.description);
    }

    /// Apply everything the generators produced since the last tick.
    pub fn drain_feeds(&mut self, feeds: &mut LiveFeeds) -> usize {
        let mut applied = 0;
        while let Ok(a) = feeds.activity.try_recv() {
            self.apply_activity(a);
            applied += 1;
        }
        while let Ok(n) = feeds.notifications.try_recv() {
            self.apply_notification(n);
            applied += 1;
        }
        applied
    }

    // -- event handling ----------------------------------------------------

    pub fn handle(&mut self, event: AppEvent) {
        if event == AppEvent::ForceQuit {
            self.request_quit(true);
            return;
        }

        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.modal.is_some() {
            self.handle_modal(event);
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                AppEvent::Enter => match Command::parse(self.command_bar.text()) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        execute_command(self, cmd);
                    }
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => {
                        self.command_bar.error = Some(msg);
                    }
                },
                other => self.command_bar.handle(&other),
            }
            return;
        }

        if self.focus == Focus::QueryBar {
            let tab = self.active_tab();
            match event {
                AppEvent::Escape | AppEvent::Enter | AppEvent::FocusNext | AppEvent::FocusPrev => {
                    tracing::debug!("focus: QueryBar -> Main");
                    self.focus = Focus::Main;
                }
                AppEvent::Quit => self.request_quit(false),
                AppEvent::Nav(Direction::Up | Direction::Down) => {
                    self.focus = Focus::Main;
                    self.handle(event);
                }
                other => {
                    if self.queries[tab.index()].handle(&other) {
                        self.selected[tab.index()] = 0;
                    }
                }
            }
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Quit => self.request_quit(false),
            AppEvent::SelectTab(i) => {
                if let Some(tab) = Tab::from_index(i) {
                    self.select_tab(tab);
                }
            }
            AppEvent::NextTab => self.select_tab(self.active_tab().next()),
            AppEvent::PrevTab => self.select_tab(self.active_tab().prev()),
            AppEvent::QueryFocus => {
                if self.active_tab() != Tab::Settings {
                    tracing::debug!("focus -> QueryBar");
                    self.focus = Focus::QueryBar;
                }
            }
            AppEvent::Escape => {
                let tab = self.active_tab();
                if !self.queries[tab.index()].is_empty() {
                    self.queries[tab.index()].clear();
                    self.selected[tab.index()] = 0;
                }
            }
            AppEvent::Char('T') => self.set_theme(self.prefs.theme.toggled()),
            AppEvent::Nav(_)
            | AppEvent::PageUp
            | AppEvent::PageDown
            | AppEvent::Top
            | AppEvent::Bottom => self.move_selection(&event),
            AppEvent::Resize(_, _) => {}
            other => self.dispatch_to_screen(other),
        }
    }

    fn move_selection(&mut self, event: &AppEvent) {
        let tab = self.active_tab();
        let len = self.row_count(tab);
        if len == 0 {
            return;
        }
        let cur = self.selection(tab);
        let last = len - 1;
        let next = match event {
            AppEvent::Nav(Direction::Up) => cur.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (cur + 1).min(last),
            AppEvent::PageUp => cur.saturating_sub(PAGE),
            AppEvent::PageDown => (cur + PAGE).min(last),
            AppEvent::Top => 0,
            AppEvent::Bottom => last,
            _ => cur,
        };
        self.selected[tab.index()] = next;
    }

    /// Route a per-screen action key to the active tab.
    fn dispatch_to_screen(&mut self, event: AppEvent) {
        let AppEvent::Char(c) = event else {
            if event == AppEvent::Enter {
                self.screen_enter();
            }
            return;
        };
        match (self.active_tab(), c) {
            (Tab::Dashboard, 't') => {
                self.timeframe = self.timeframe.next();
                tracing::debug!(timeframe = %self.timeframe, "timeframe cycled");
            }

            (Tab::Users, 'a') => self.modal = Some(Modal::Form(FormState::add_user())),
            (Tab::Users, 'e') => {
                let form = self.selected_user().map(FormState::edit_user);
                self.open_form(form);
            }
            (Tab::Users, 'd') => {
                let modal = self.selected_user().map(|u| Modal::ConfirmDelete {
                    tab: Tab::Users,
                    id: u.id.clone(),
                    name: u.name.clone(),
                });
                if modal.is_some() {
                    self.modal = modal;
                }
            }

            (Tab::Products, 'a') => self.modal = Some(Modal::Form(FormState::add_product())),
            (Tab::Products, 'e') => {
                let form = self.selected_product().map(FormState::edit_product);
                self.open_form(form);
            }
            (Tab::Products, 'd') => {
                let modal = self.selected_product().map(|p| Modal::ConfirmDelete {
                    tab: Tab::Products,
                    id: p.id.clone(),
                    name: p.name.clone(),
                });
                if modal.is_some() {
                    self.modal = modal;
                }
            }

            (Tab::Notifications, 'r') => self.mark_selected_read(),
            (Tab::Notifications, 'R') => self.mark_all_read(),
            (Tab::Notifications, 'd') => {
                if let Some(id) = self.selected_notification_id() {
                    self.notifications.delete(id);
                    tracing::debug!(id, "notification deleted");
                    self.toast("Notification deleted", "The notification has been deleted.", ToastKind::Default);
                }
            }
            (Tab::Notifications, 'C') => self.clear_notifications(),
            (Tab::Notifications, 'f') => {
                self.notification_view = self.notification_view.next();
                self.selected[Tab::Notifications.index()] = 0;
                tracing::debug!(view = ?self.notification_view, "notification view cycled");
            }

            (Tab::Settings, ' ') => self.toggle_selected_setting(),
            (Tab::Settings, 's') => self.save_settings(),

            (tab, c) => tracing::debug!(%tab, key = %c, "unbound key"),
        }
    }

    fn screen_enter(&mut self) {
        match self.active_tab() {
            Tab::Notifications => self.mark_selected_read(),
            Tab::Settings => self.toggle_selected_setting(),
            Tab::Users => self.handle(AppEvent::Char('e')),
            Tab::Products => self.handle(AppEvent::Char('e')),
            Tab::Dashboard => {}
        }
    }

    fn selected_user(&self) -> Option<&User> {
        self.visible_users().get(self.selection(Tab::Users)).copied()
    }

    fn selected_product(&self) -> Option<&Product> {
        self.visible_products().get(self.selection(Tab::Products)).copied()
    }

    fn open_form(&mut self, form: Option<FormState>) {
        if let Some(form) = form {
            tracing::debug!(kind = ?form.kind, "form opened");
            self.modal = Some(Modal::Form(form));
        }
    }

    fn selected_notification_id(&self) -> Option<u64> {
        self.visible_notifications()
            .get(self.selection(Tab::Notifications))
            .map(|n| n.id)
    }

    fn mark_selected_read(&mut self) {
        let Some(id) = self.selected_notification_id() else {
            return;
        };
        if self.notifications.mark_read(id) {
            tracing::debug!(id, "notification read");
            self.toast("Notification marked as read", "The notification has been marked as read.", ToastKind::Default);
        }
    }

    fn toggle_selected_setting(&mut self) {
        match settings_panel::row_at(self.selection(Tab::Settings)) {
            SettingsRow::Theme => self.set_theme(settings_panel::next_theme(self.prefs.theme)),
            SettingsRow::Switch(toggle) => {
                let on = self.settings.toggle(toggle);
                tracing::debug!(setting = toggle.label(), on, "setting toggled");
            }
        }
    }

    fn handle_modal(&mut self, event: AppEvent) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        match modal {
            Modal::ConfirmDelete { tab, id, name } => {
                if event == AppEvent::Char('y') {
                    self.delete_record(tab, &id, &name);
                } else {
                    tracing::debug!(%id, "delete cancelled");
                }
            }
            Modal::Form(mut form) => match form.handle(&event) {
                FormAction::Continue => self.modal = Some(Modal::Form(form)),
                FormAction::Cancel => tracing::debug!(kind = ?form.kind, "form cancelled"),
                FormAction::Submit => {
                    if let Err(form) = self.submit_form(form) {
                        self.modal = Some(Modal::Form(form));
                    }
                }
            },
        }
    }

    fn delete_record(&mut self, tab: Tab, id: &str, name: &str) {
        let (removed, title) = match tab {
            Tab::Users => (self.store.users.remove(id).is_some(), "User deleted"),
            Tab::Products => (self.store.products.remove(id).is_some(), "Product deleted"),
            _ => (false, ""),
        };
        if removed {
            self.toast(title, format!("{name} has been removed"), ToastKind::Default);
        }
    }

    /// Apply a submitted form. On a validation error the form is handed back
    /// so it stays open with the user's input.
    fn submit_form(&mut self, form: FormState) -> Result<(), FormState> {
        let outcome = match &form.kind {
            FormKind::AddUser => self
                .store
                .users
                .insert(&form.user_draft())
                .map(|u| ("User added", format!("{} has been added successfully", u.name))),
            FormKind::EditUser(id) => self
                .store
                .users
                .update(id, &form.user_draft())
                .map(|u| ("User updated", format!("{}'s information has been updated", u.name))),
            FormKind::AddProduct => self
                .store
                .products
                .insert(&form.product_draft())
                .map(|p| ("Product added", format!("{} has been added successfully", p.name))),
            FormKind::EditProduct(id) => self
                .store
                .products
                .update(id, &form.product_draft())
                .map(|p| ("Product updated", format!("{} has been updated", p.name))),
        };

        match outcome {
            Ok((title, description)) => {
                tracing::debug!(kind = ?form.kind, "form submitted");
                self.toast(title, description, ToastKind::Default);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(kind = ?form.kind, error = %e, "form rejected");
                self.toast("Error", e.to_string(), ToastKind::Destructive);
                Err(form)
            }
        }
    }

    /// Ids of the records currently shown on `tab`, in display order.
    pub fn visible_ids(&self, tab: Tab) -> Vec<String> {
        match tab {
            Tab::Dashboard => self.visible_orders().iter().map(|o| o.id().to_string()).collect(),
            Tab::Users => self.visible_users().iter().map(|u| u.id().to_string()).collect(),
            Tab::Products => self.visible_products().iter().map(|p| p.id().to_string()).collect(),
            Tab::Notifications => self.visible_notifications().iter().map(|n| n.id.to_string()).collect(),
            Tab::Settings => Vec::new(),
        }
    }
}

/// Returns true when a text input has the keyboard, meaning alphabetic keys
/// should produce characters rather than trigger shortcuts.
fn is_insert_mode(s: &AppState) -> bool {
    matches!(s.modal, Some(Modal::Form(_))) || matches!(s.focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Live feeds
// ---------------------------------------------------------------------------

/// Receiving ends of the generator channels plus the handles that keep the
/// generator tasks alive.
pub struct LiveFeeds {
    pub activity: mpsc::UnboundedReceiver<NewActivity>,
    pub notifications: mpsc::UnboundedReceiver<NewNotification>,
    handles: Vec<FeedHandle>,
}

impl LiveFeeds {
    /// Spawn both generators on the current tokio runtime.
    pub fn spawn(cfg: &FeedsConfig) -> Self {
        let (activity_tx, activity) = mpsc::unbounded_channel();
        let (notification_tx, notifications) = mpsc::unbounded_channel();
        let (min, max) = cfg.activity_range();

        let handles = vec![
            dashdeck_feeds::spawn(
                ActivityGenerator::new(min, max),
                activity_tx,
                StdRng::from_os_rng(),
            ),
            dashdeck_feeds::spawn(
                NotificationGenerator::new(cfg.notification_interval()),
                notification_tx,
                StdRng::from_os_rng(),
            ),
        ];
        tracing::info!(feeds = handles.len(), min, max, "live feeds started");
        Self { activity, notifications, handles }
    }

    /// Cancel every generator and wait for the tasks to exit.
    pub async fn shutdown(self) {
        for handle in self.handles {
            handle.shutdown().await;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    feeds: Option<LiveFeeds>,
}

impl App {
    pub fn new(mut state: AppState, feeds: Option<LiveFeeds>) -> Self {
        state.live = feeds.is_some();
        App { state, feeds }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Hand back the feeds so the caller can shut them down.
    pub fn into_feeds(self) -> Option<LiveFeeds> {
        self.feeds
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(&mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let tick = Duration::from_millis(self.state.config.ui.tick_ms.max(16));
        loop {
            if let Some(feeds) = self.feeds.as_mut() {
                self.state.drain_feeds(feeds);
            }
            self.state.toasts.expire(Instant::now());

            {
                let s = &self.state;
                terminal.draw(|frame| screens::draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(tick)? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(&self.state) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use dashdeck_core::prefs::{MemoryStore, ACTIVE_TAB_KEY, SETTINGS_KEY, THEME_KEY};
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::new(Config::defaults(), Box::new(MemoryStore::default()))
    }

    fn state_with(store: MemoryStore) -> AppState {
        AppState::new(Config::defaults(), Box::new(store))
    }

    fn type_str(s: &mut AppState, text: &str) {
        for c in text.chars() {
            s.handle(AppEvent::Char(c));
        }
    }

    fn command(s: &mut AppState, text: &str) {
        s.handle(AppEvent::Char(':'));
        type_str(s, text);
        s.handle(AppEvent::Enter);
    }

    #[test]
    fn starts_from_stored_preferences() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "dark").unwrap();
        store.set(ACTIVE_TAB_KEY, "products").unwrap();
        let s = state_with(store);
        assert_eq!(s.prefs.theme, ThemeMode::Dark);
        assert_eq!(s.active_tab(), Tab::Products);
        assert!(s.theme.dark);
    }

    #[test]
    fn unknown_stored_tab_falls_back_to_dashboard() {
        let mut store = MemoryStore::default();
        store.set(ACTIVE_TAB_KEY, "finances").unwrap();
        assert_eq!(state_with(store).active_tab(), Tab::Dashboard);
    }

    #[test]
    fn digit_and_bracket_keys_switch_tabs() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(3));
        assert_eq!(s.active_tab(), Tab::Notifications);
        s.handle(AppEvent::NextTab);
        assert_eq!(s.active_tab(), Tab::Settings);
        s.handle(AppEvent::NextTab);
        assert_eq!(s.active_tab(), Tab::Dashboard);
        s.handle(AppEvent::PrevTab);
        assert_eq!(s.active_tab(), Tab::Settings);
    }

    #[test]
    fn search_narrows_the_active_screen_only() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(1));
        s.handle(AppEvent::QueryFocus);
        type_str(&mut s, "EDITOR");
        assert_eq!(s.visible_ids(Tab::Users), vec!["2", "4"]);
        assert_eq!(s.visible_products().len(), 6);

        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::Main);
        assert_eq!(s.query(Tab::Users), "EDITOR");
        s.handle(AppEvent::Escape);
        assert_eq!(s.query(Tab::Users), "");
    }

    #[test]
    fn query_bar_keys_are_text_not_shortcuts() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(2));
        s.handle(AppEvent::QueryFocus);
        type_str(&mut s, "a?:");
        assert_eq!(s.query(Tab::Products), "a?:");
        assert!(!s.show_help);
        assert_eq!(s.focus, Focus::QueryBar);
    }

    #[test]
    fn add_user_form_validates_before_inserting() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(1));
        s.handle(AppEvent::Char('a'));
        type_str(&mut s, "Ada Lovelace");
        s.handle(AppEvent::Enter);

        // email missing: form stays open, nothing inserted
        assert!(matches!(s.modal, Some(Modal::Form(_))));
        assert_eq!(s.store.users.len(), 5);
        assert_eq!(s.toasts.latest().map(|t| t.kind), Some(ToastKind::Destructive));

        s.handle(AppEvent::FocusNext);
        type_str(&mut s, "ada@example.com");
        s.handle(AppEvent::Enter);
        assert!(s.modal.is_none());
        assert_eq!(s.store.users.len(), 6);
        let added = s.store.users.get("6").unwrap();
        assert_eq!(added.name, "Ada Lovelace");
        assert_eq!(s.toasts.latest().map(|t| t.title.as_str()), Some("User added"));
    }

    #[test]
    fn edit_product_replaces_in_place() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(2));
        s.handle(AppEvent::Nav(Direction::Down));
        s.handle(AppEvent::Char('e'));
        for _ in 0..3 {
            s.handle(AppEvent::FocusNext);
        }
        s.handle(AppEvent::Backspace);
        s.handle(AppEvent::Backspace);
        type_str(&mut s, "40");
        s.handle(AppEvent::Enter);

        let p = s.store.products.get("PROD-002").unwrap();
        assert_eq!(p.stock, 40);
        assert_eq!(s.store.products.as_slice()[1].id, "PROD-002");
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(2));
        s.handle(AppEvent::Char('d'));
        s.handle(AppEvent::Char('n'));
        assert_eq!(s.store.products.len(), 6);

        s.handle(AppEvent::Char('d'));
        s.handle(AppEvent::Char('y'));
        assert_eq!(s.store.products.len(), 5);
        assert!(s.store.products.get("PROD-001").is_none());
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(2));
        s.handle(AppEvent::Bottom);
        s.handle(AppEvent::Char('d'));
        s.handle(AppEvent::Char('y'));
        s.handle(AppEvent::Char('a'));
        type_str(&mut s, "Desk Lamp");
        s.handle(AppEvent::FocusNext);
        type_str(&mut s, "Accessories");
        s.handle(AppEvent::FocusNext);
        type_str(&mut s, "24.50");
        s.handle(AppEvent::Enter);
        assert_eq!(s.visible_ids(Tab::Products).last().map(String::as_str), Some("PROD-007"));
    }

    #[test]
    fn notification_actions() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(3));
        assert_eq!(s.notifications.unread_count(), 2);

        s.handle(AppEvent::Char('r'));
        assert_eq!(s.notifications.unread_count(), 1);

        s.handle(AppEvent::Char('f'));
        assert_eq!(s.notification_view, NotificationView::Unread);
        assert_eq!(s.visible_notifications().len(), 1);

        s.handle(AppEvent::Char('R'));
        assert_eq!(s.notifications.unread_count(), 0);
        assert!(s.visible_notifications().is_empty());

        s.handle(AppEvent::Char('f'));
        s.handle(AppEvent::Char('d'));
        assert_eq!(s.notifications.len(), 2);

        s.handle(AppEvent::Char('C'));
        assert!(s.notifications.is_empty());
    }

    #[test]
    fn generated_records_are_applied_on_drain() {
        let mut s = state();
        let (activity_tx, activity) = mpsc::unbounded_channel();
        let (notification_tx, notifications) = mpsc::unbounded_channel();
        let mut feeds = LiveFeeds { activity, notifications, handles: Vec::new() };

        for a in mock::activities(Utc::now()) {
            activity_tx.send(a).unwrap();
        }
        notification_tx
            .send(NewNotification { title: "New activity detected".into(), description: "x".into() })
            .unwrap();

        assert!(s.drain_feeds(&mut feeds) > 1);
        assert_eq!(s.activity.len(), s.activity.capacity());
        assert_eq!(s.notifications.unread_count(), 3);
        assert_eq!(s.toasts.latest().map(|t| t.title.as_str()), Some("New activity detected"));
    }

    #[test]
    fn settings_toggle_and_save() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(4));
        s.handle(AppEvent::Nav(Direction::Down));
        s.handle(AppEvent::Char(' '));
        assert!(s.settings.appearance.sidebar_collapsed);
        assert!(s.settings_dirty());

        s.handle(AppEvent::Char('s'));
        assert!(!s.settings_dirty());
        assert!(s.prefs_store.get(SETTINGS_KEY).unwrap().contains("\"sidebarCollapsed\":true"));
    }

    #[test]
    fn quit_is_refused_with_unsaved_settings() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(4));
        s.handle(AppEvent::Nav(Direction::Down));
        s.handle(AppEvent::Char(' '));

        s.handle(AppEvent::Quit);
        assert!(!s.quit);
        command(&mut s, "q!");
        assert!(s.quit);
    }

    #[test]
    fn blank_order_query_shows_every_order() {
        let mut s = state();
        s.handle(AppEvent::QueryFocus);
        type_str(&mut s, "   ");
        assert_eq!(s.visible_orders().len(), 6);

        type_str(&mut s, "smith");
        assert!(s.visible_orders().is_empty());

        // Other screens match the query as typed.
        s.handle(AppEvent::Escape);
        s.handle(AppEvent::SelectTab(1));
        s.handle(AppEvent::QueryFocus);
        type_str(&mut s, "  ");
        assert!(s.visible_users().is_empty());
    }

    #[test]
    fn oversized_toast_secs_does_not_panic() {
        let mut cfg = Config::defaults();
        cfg.ui.toast_secs = u64::MAX;
        let mut s = AppState::new(cfg, Box::new(MemoryStore::default()));
        s.notify("Disk almost full", "91% used");
        assert_eq!(s.toasts.len(), 1);
    }

    #[test]
    fn ctrl_c_quits_past_unsaved_settings_and_open_input() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(4));
        s.handle(AppEvent::Nav(Direction::Down));
        s.handle(AppEvent::Char(' '));
        assert!(s.settings_dirty());

        s.handle(AppEvent::Char(':'));
        assert_eq!(s.focus, Focus::Command);
        s.handle(AppEvent::ForceQuit);
        assert!(s.quit);
    }

    #[test]
    fn theme_row_cycles_and_persists() {
        let mut s = state();
        s.handle(AppEvent::SelectTab(4));
        s.handle(AppEvent::Char(' '));
        assert_eq!(s.prefs.theme, ThemeMode::Dark);
        assert_eq!(s.prefs_store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(s.prefs_store.get(ACTIVE_TAB_KEY).as_deref(), Some("settings"));
        assert!(!s.settings_dirty());

        s.handle(AppEvent::Char('T'));
        assert_eq!(s.prefs.theme, ThemeMode::Light);
    }

    #[test]
    fn commands_drive_state() {
        let mut s = state();
        command(&mut s, "tab users");
        assert_eq!(s.active_tab(), Tab::Users);
        command(&mut s, "timeframe weekly");
        assert_eq!(s.timeframe, Timeframe::Weekly);
        command(&mut s, "notify Backup finished");
        assert_eq!(s.notifications.unread_count(), 3);
        command(&mut s, "readall");
        assert_eq!(s.notifications.unread_count(), 0);
        command(&mut s, "clear");
        assert!(s.notifications.is_empty());
        command(&mut s, "q");
        assert!(s.quit);
    }

    #[test]
    fn bad_command_keeps_the_bar_open() {
        let mut s = state();
        command(&mut s, "theme neon");
        assert_eq!(s.focus, Focus::Command);
        assert!(s.command_bar.error.as_deref().unwrap().starts_with("usage: theme"));
        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::Main);
    }

    #[test]
    fn dashboard_t_cycles_timeframe() {
        let mut s = state();
        assert_eq!(s.timeframe, Timeframe::Yearly);
        s.handle(AppEvent::Char('t'));
        assert_eq!(s.timeframe, Timeframe::Weekly);
    }
}
