//! The settings screen's object, saved under `dashboard-settings`.

use crate::prefs::ThemeMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    pub appearance: AppearanceSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub browser: bool,
    pub sms: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { email: true, push: true, browser: true, sms: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub share_data: bool,
    pub collect_analytics: bool,
    pub store_history: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self { share_data: false, collect_analytics: true, store_history: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceSettings {
    pub theme: ThemeMode,
    pub sidebar_collapsed: bool,
    pub dense_mode: bool,
    pub animations_enabled: bool,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            sidebar_collapsed: false,
            dense_mode: false,
            animations_enabled: true,
        }
    }
}

/// One boolean switch on the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    SidebarCollapsed,
    DenseMode,
    Animations,
    EmailNotifications,
    PushNotifications,
    BrowserNotifications,
    SmsNotifications,
    ShareData,
    CollectAnalytics,
    StoreHistory,
}

impl Toggle {
    /// Screen order, grouped as appearance, notifications, privacy.
    pub const ALL: [Toggle; 10] = [
        Toggle::SidebarCollapsed,
        Toggle::DenseMode,
        Toggle::Animations,
        Toggle::EmailNotifications,
        Toggle::PushNotifications,
        Toggle::BrowserNotifications,
        Toggle::SmsNotifications,
        Toggle::ShareData,
        Toggle::CollectAnalytics,
        Toggle::StoreHistory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Toggle::SidebarCollapsed => "Collapsed Sidebar",
            Toggle::DenseMode => "Dense Mode",
            Toggle::Animations => "Enable Animations",
            Toggle::EmailNotifications => "Email Notifications",
            Toggle::PushNotifications => "Push Notifications",
            Toggle::BrowserNotifications => "Browser Notifications",
            Toggle::SmsNotifications => "SMS Notifications",
            Toggle::ShareData => "Share Usage Data",
            Toggle::CollectAnalytics => "Collect Analytics",
            Toggle::StoreHistory => "Store History",
        }
    }

    pub fn group(self) -> &'static str {
        match self {
            Toggle::SidebarCollapsed | Toggle::DenseMode | Toggle::Animations => "Appearance",
            Toggle::EmailNotifications
            | Toggle::PushNotifications
            | Toggle::BrowserNotifications
            | Toggle::SmsNotifications => "Notifications",
            Toggle::ShareData | Toggle::CollectAnalytics | Toggle::StoreHistory => "Privacy",
        }
    }
}

impl Settings {
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::SidebarCollapsed => self.appearance.sidebar_collapsed,
            Toggle::DenseMode => self.appearance.dense_mode,
            Toggle::Animations => self.appearance.animations_enabled,
            Toggle::EmailNotifications => self.notifications.email,
            Toggle::PushNotifications => self.notifications.push,
            Toggle::BrowserNotifications => self.notifications.browser,
            Toggle::SmsNotifications => self.notifications.sms,
            Toggle::ShareData => self.privacy.share_data,
            Toggle::CollectAnalytics => self.privacy.collect_analytics,
            Toggle::StoreHistory => self.privacy.store_history,
        }
    }

    fn slot(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::SidebarCollapsed => &mut self.appearance.sidebar_collapsed,
            Toggle::DenseMode => &mut self.appearance.dense_mode,
            Toggle::Animations => &mut self.appearance.animations_enabled,
            Toggle::EmailNotifications => &mut self.notifications.email,
            Toggle::PushNotifications => &mut self.notifications.push,
            Toggle::BrowserNotifications => &mut self.notifications.browser,
            Toggle::SmsNotifications => &mut self.notifications.sms,
            Toggle::ShareData => &mut self.privacy.share_data,
            Toggle::CollectAnalytics => &mut self.privacy.collect_analytics,
            Toggle::StoreHistory => &mut self.privacy.store_history,
        }
    }

    /// Flip one switch and return its new value.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let slot = self.slot(toggle);
        *slot = !*slot;
        *slot
    }
}
