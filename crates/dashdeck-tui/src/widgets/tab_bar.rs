//! Tab bar: the strip of screens at the top, with the unread badge on
//! Notifications and the current theme on the right.

use crate::theme::Theme;
use dashdeck_core::prefs::Tab;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Tabs, Widget},
};

pub struct TabBar<'a> {
    active: Tab,
    unread: usize,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(active: Tab, unread: usize, theme: &'a Theme) -> Self {
        Self { active, unread, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = Tab::ALL
            .iter()
            .map(|tab| {
                let badge = match tab {
                    Tab::Notifications if self.unread > 0 => format!(" ({})", self.unread),
                    _ => String::new(),
                };
                Line::from(format!(" {}:{}{} ", tab.index() + 1, tab.title(), badge))
            })
            .collect();

        Tabs::new(labels)
            .select(self.active.index())
            .highlight_style(self.theme.tab_active)
            .divider("")
            .render(area, buf);

        let hint = format!(" theme:{}  q:quit  ?:help ", self.theme.mode);
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashdeck_core::prefs::ThemeMode;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(active: Tab, unread: usize) -> String {
        let theme = Theme::resolve(ThemeMode::Dark, None);
        let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
        terminal
            .draw(|f| f.render_widget(TabBar::new(active, unread, &theme), f.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn shows_every_tab_and_the_unread_badge() {
        let row = render(Tab::Users, 2);
        for title in ["1:Dashboard", "2:Users", "3:Products", "4:Notifications (2)", "5:Settings"] {
            assert!(row.contains(title), "missing {title:?} in {row:?}");
        }
        assert!(row.contains("theme:dark"));
    }

    #[test]
    fn badge_hidden_when_all_read() {
        assert!(!render(Tab::Dashboard, 0).contains("Notifications ("));
    }
}
