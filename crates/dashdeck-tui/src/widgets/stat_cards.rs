//! The four headline figures across the top of the dashboard.

use crate::theme::Theme;
use dashdeck_core::metrics::StatCard;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct StatCards<'a> {
    cards: &'a [StatCard],
    theme: &'a Theme,
}

impl<'a> StatCards<'a> {
    pub fn new(cards: &'a [StatCard], theme: &'a Theme) -> Self {
        Self { cards, theme }
    }
}

impl Widget for StatCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() {
            return;
        }
        let columns = Layout::horizontal(self.cards.iter().map(|_| Constraint::Fill(1))).split(area);

        for (card, col) in self.cards.iter().zip(columns.iter()) {
            let block = Block::bordered()
                .title(Span::styled(card.title, self.theme.muted))
                .border_style(self.theme.border_unfocused);
            let lines = vec![
                Line::from(Span::styled(card.value, self.theme.title)),
                Line::from(Span::styled(card.trend, self.theme.muted)),
            ];
            Paragraph::new(lines).block(block).render(*col, buf);
        }
    }
}
