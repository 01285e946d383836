//! Settings screen: theme selector plus grouped on/off switches.

use crate::theme::Theme;
use dashdeck_core::prefs::ThemeMode;
use dashdeck_core::settings::{Settings, Toggle};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// One selectable row on the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Theme,
    Switch(Toggle),
}

/// Number of selectable rows.
pub const ROW_COUNT: usize = Toggle::ALL.len() + 1;

pub fn row_at(index: usize) -> SettingsRow {
    match index.checked_sub(1) {
        None => SettingsRow::Theme,
        Some(i) => SettingsRow::Switch(Toggle::ALL[i.min(Toggle::ALL.len() - 1)]),
    }
}

const THEME_CHOICES: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

/// Light → dark → system → light, as Space cycles the theme row.
pub fn next_theme(mode: ThemeMode) -> ThemeMode {
    let i = THEME_CHOICES.iter().position(|m| *m == mode).unwrap_or(0);
    THEME_CHOICES[(i + 1) % THEME_CHOICES.len()]
}

pub struct SettingsPanel<'a> {
    settings: &'a Settings,
    theme_mode: ThemeMode,
    selected: usize,
    dirty: bool,
    theme: &'a Theme,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(settings: &'a Settings, theme_mode: ThemeMode, theme: &'a Theme) -> Self {
        Self { settings, theme_mode, selected: 0, dirty: false, theme }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    /// Marks the title when there are unsaved changes.
    pub fn dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.dirty {
            Line::from(vec![
                Span::raw(" Settings "),
                Span::styled("● unsaved (s to save) ", self.theme.warning),
            ])
        } else {
            Line::from(" Settings ")
        };
        let block = Block::bordered().title(title).border_style(self.theme.border_focused);

        let row_style = |index: usize| {
            if index == self.selected {
                self.theme.selection
            } else {
                ratatui::style::Style::default()
            }
        };

        let mut lines = vec![Line::from(Span::styled("Appearance", self.theme.title))];

        let mut theme_spans = vec![Span::styled("  Theme                  ", row_style(0))];
        for mode in THEME_CHOICES {
            let label = if mode == self.theme_mode {
                format!("(•) {mode}  ")
            } else {
                format!("( ) {mode}  ")
            };
            let style = if mode == self.theme_mode { self.theme.accent } else { self.theme.muted };
            theme_spans.push(Span::styled(label, style));
        }
        lines.push(Line::from(theme_spans));

        let mut group = "Appearance";
        for (i, toggle) in Toggle::ALL.iter().enumerate() {
            if toggle.group() != group {
                group = toggle.group();
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(group, self.theme.title)));
            }
            let on = self.settings.get(*toggle);
            let (mark, mark_style) =
                if on { ("[on] ", self.theme.positive) } else { ("[off]", self.theme.neutral) };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<23}", toggle.label()), row_style(i + 1)),
                Span::styled(mark, mark_style),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "↑/↓ select · Space toggle · s save",
            self.theme.muted,
        )));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn rows_cover_theme_and_every_switch() {
        assert_eq!(row_at(0), SettingsRow::Theme);
        assert_eq!(row_at(1), SettingsRow::Switch(Toggle::SidebarCollapsed));
        assert_eq!(row_at(ROW_COUNT - 1), SettingsRow::Switch(Toggle::StoreHistory));
        assert_eq!(row_at(99), SettingsRow::Switch(Toggle::StoreHistory));
    }

    #[test]
    fn theme_row_cycles_through_all_modes() {
        assert_eq!(next_theme(ThemeMode::Light), ThemeMode::Dark);
        assert_eq!(next_theme(ThemeMode::Dark), ThemeMode::System);
        assert_eq!(next_theme(ThemeMode::System), ThemeMode::Light);
    }

    #[test]
    fn renders_groups_and_switch_states() {
        let theme = Theme::resolve(ThemeMode::Light, None);
        let settings = Settings::default();
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    SettingsPanel::new(&settings, ThemeMode::Light, &theme).dirty(true),
                    f.area(),
                )
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        let text: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Notifications"));
        assert!(text.contains("Privacy"));
        assert!(text.contains("(•) light"));
        assert!(text.contains("SMS Notifications"));
        assert!(text.contains("unsaved"));
    }
}
