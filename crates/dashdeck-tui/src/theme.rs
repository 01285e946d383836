//! Colour themes for the dashdeck TUI.
//!
//! Themes are TOML files embedded in the binary via [`include_str!`]. The
//! persisted [`ThemeMode`] picks one: `light` and `dark` map directly, while
//! `system` is resolved against the terminal's `COLORFGBG` hint.

use config::{Config, File, FileFormat};
use dashdeck_core::prefs::ThemeMode;
use dashdeck_core::types::{OrderStatus, Role, StockStatus, Tone, UserStatus};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const LIGHT_THEME_SRC: &str = include_str!("themes/light.toml");
const DARK_THEME_SRC: &str = include_str!("themes/dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
    command_bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawText {
    title: RawStyle,
    muted: RawStyle,
    accent: RawStyle,
    selection: RawStyle,
    tab_active: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBadges {
    positive: RawStyle,
    negative: RawStyle,
    warning: RawStyle,
    neutral: RawStyle,
    unread: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawToasts {
    default: RawStyle,
    destructive: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawChart {
    revenue: RawStyle,
    profit: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    base: RawStyle,
    borders: RawBorders,
    text: RawText,
    badges: RawBadges,
    toasts: RawToasts,
    chart: RawChart,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Pre-resolved styles for one colour scheme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// The mode that was asked for, which may be `System`.
    pub mode: ThemeMode,
    /// Whether the dark palette is in effect.
    pub dark: bool,

    /// Painted over the whole frame before anything else.
    pub base: Style,

    pub border_focused: Style,
    pub border_unfocused: Style,
    pub border_command_bar: Style,

    pub title: Style,
    pub muted: Style,
    pub accent: Style,
    pub selection: Style,
    pub tab_active: Style,

    pub positive: Style,
    pub negative: Style,
    pub warning: Style,
    pub neutral: Style,
    pub unread: Style,

    pub toast_default: Style,
    pub toast_destructive: Style,

    pub chart_revenue: Style,
    pub chart_profit: Style,
}

impl Theme {
    /// Load the theme for `mode`, resolving `System` from the environment.
    pub fn for_mode(mode: ThemeMode) -> Self {
        let colorfgbg = std::env::var("COLORFGBG").ok();
        Self::resolve(mode, colorfgbg.as_deref())
    }

    /// Load the theme for `mode`, resolving `System` from `colorfgbg`.
    pub fn resolve(mode: ThemeMode, colorfgbg: Option<&str>) -> Self {
        let dark = match mode {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => system_prefers_dark(colorfgbg),
        };
        let src = if dark { DARK_THEME_SRC } else { LIGHT_THEME_SRC };
        let mut theme = Self::from_toml_str(src).expect("embedded theme must be valid TOML");
        theme.mode = mode;
        theme.dark = dark;
        theme
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            mode: ThemeMode::default(),
            dark: false,
            base: raw.base.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            title: raw.text.title.into_style(),
            muted: raw.text.muted.into_style(),
            accent: raw.text.accent.into_style(),
            selection: raw.text.selection.into_style(),
            tab_active: raw.text.tab_active.into_style(),
            positive: raw.badges.positive.into_style(),
            negative: raw.badges.negative.into_style(),
            warning: raw.badges.warning.into_style(),
            neutral: raw.badges.neutral.into_style(),
            unread: raw.badges.unread.into_style(),
            toast_default: raw.toasts.default.into_style(),
            toast_destructive: raw.toasts.destructive.into_style(),
            chart_revenue: raw.chart.revenue.into_style(),
            chart_profit: raw.chart.profit.into_style(),
        })
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    pub fn tone_style(&self, tone: Option<Tone>) -> Style {
        match tone {
            Some(Tone::Positive) => self.positive,
            Some(Tone::Negative) => self.negative,
            Some(Tone::Warning) => self.warning,
            None => self.neutral,
        }
    }

    pub fn user_status_style(&self, status: UserStatus) -> Style {
        match status {
            UserStatus::Active => self.positive,
            UserStatus::Inactive => self.neutral,
            UserStatus::Pending => self.warning,
        }
    }

    pub fn role_style(&self, role: Role) -> Style {
        match role {
            Role::Admin => self.accent,
            Role::Editor | Role::Viewer => Style::default(),
        }
    }

    pub fn stock_style(&self, status: StockStatus) -> Style {
        match status {
            StockStatus::InStock => self.positive,
            StockStatus::LowStock => self.warning,
            StockStatus::OutOfStock => self.negative,
        }
    }

    pub fn order_style(&self, status: OrderStatus) -> Style {
        match status {
            OrderStatus::Completed => self.positive,
            OrderStatus::Processing => self.accent,
            OrderStatus::Pending => self.warning,
            OrderStatus::Cancelled => self.negative,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Interpret `COLORFGBG` (`"fg;bg"` or `"fg;default;bg"`). Background colours
/// 0-6 and 8 are dark. An absent or unreadable hint counts as dark.
fn system_prefers_dark(colorfgbg: Option<&str>) -> bool {
    let Some(bg) = colorfgbg.and_then(|v| v.rsplit(';').next()) else {
        return true;
    };
    match bg.trim().parse::<u8>() {
        Ok(n) => matches!(n, 0..=6 | 8),
        Err(_) => true,
    }
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (case-insensitive), `#rrggbb`, and
/// `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
