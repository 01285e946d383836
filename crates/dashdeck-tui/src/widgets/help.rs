//! Help popup: centred overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use super::centered_rect;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("1-5  /  [ ]", "Select / cycle screens"),
    ("/", "Search the current screen"),
    ("Escape", "Leave search, close popups"),
    ("↑ k  /  ↓ j", "Move selection"),
    ("a / e / d", "Add, edit, delete (users, products)"),
    ("r / R", "Mark read / mark all read"),
    ("d / C / f", "Delete, clear all, cycle view (notifications)"),
    ("t", "Cycle chart timeframe (dashboard)"),
    ("Space / s", "Toggle / save settings"),
    ("T", "Toggle light and dark theme"),
    (":", "Command line (:help lists commands)"),
    ("q", "Quit (refused while settings are unsaved)"),
    ("Ctrl+c", "Quit and discard unsaved settings"),
    ("?", "Toggle this help popup"),
];

const COMMANDS: &str =
    ":q  :q!  :theme <mode>  :tab <name>  :timeframe <range>  :notify <title>  :readall  :clear  :save";

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(96, BINDINGS.len() as u16 + 5, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" dashdeck keybindings (? to close) ")
            .border_style(self.theme.border_focused)
            .style(self.theme.base);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {key:<18}"), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(*desc),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(format!("  {COMMANDS}"), self.theme.muted)));

        Paragraph::new(lines).render(inner, buf);
    }
}
