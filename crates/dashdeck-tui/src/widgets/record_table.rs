//! Bordered table of records with a highlighted selection row.
//!
//! Screens build the [`Row`]s themselves (they know which fields to show and
//! how to colour status badges); this widget only handles layout, the header,
//! the empty state and the selection highlight.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Modifier,
    text::Line,
    widgets::{Block, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

pub struct RecordTable<'a> {
    title: Line<'a>,
    header: Vec<&'static str>,
    widths: Vec<Constraint>,
    rows: Vec<Row<'a>>,
    selected: Option<usize>,
    focused: bool,
    empty: &'a str,
    theme: &'a Theme,
}

impl<'a> RecordTable<'a> {
    pub fn new(
        title: impl Into<Line<'a>>,
        columns: &[(&'static str, Constraint)],
        rows: Vec<Row<'a>>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title: title.into(),
            header: columns.iter().map(|(h, _)| *h).collect(),
            widths: columns.iter().map(|(_, w)| *w).collect(),
            rows,
            selected: None,
            focused: false,
            empty: "No records found.",
            theme,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Text shown instead of rows when there are none.
    pub fn empty_message(mut self, msg: &'a str) -> Self {
        self.empty = msg;
        self
    }
}

impl Widget for RecordTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(self.title).border_style(self.theme.border(self.focused));

        if self.rows.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            let header = Row::new(self.header).style(self.theme.muted.add_modifier(Modifier::BOLD));
            Widget::render(Table::new([header], self.widths), inner, buf);
            if inner.height > 2 {
                let msg_area = Rect { y: inner.y + 2, height: 1, ..inner };
                Paragraph::new(Line::from(self.empty).centered()).style(self.theme.muted).render(msg_area, buf);
            }
            return;
        }

        let selected = self.selected.map(|i| i.min(self.rows.len() - 1));
        let table = Table::new(self.rows, self.widths)
            .header(
                Row::new(self.header)
                    .style(self.theme.muted.add_modifier(Modifier::BOLD))
                    .bottom_margin(1),
            )
            .block(block)
            .row_highlight_style(self.theme.selection)
            .highlight_symbol("▌");

        let mut state = TableState::default().with_selected(selected);
        StatefulWidget::render(table, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashdeck_core::prefs::ThemeMode;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(table: RecordTable<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(50, 8)).unwrap();
        terminal.draw(|f| f.render_widget(table, f.area())).unwrap();
        let buf = terminal.backend().buffer();
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_header_and_rows() {
        let theme = Theme::resolve(ThemeMode::Light, None);
        let cols = [("Name", Constraint::Fill(1)), ("Stock", Constraint::Length(6))];
        let rows = vec![Row::new(["Laptop Stand", "56"]), Row::new(["External SSD", "8"])];
        let text = screen(RecordTable::new("Products", &cols, rows, &theme).selected(Some(9)));
        assert!(text.contains("Name"));
        assert!(text.contains("Laptop Stand"));
        assert!(text.contains("External SSD"));
    }

    #[test]
    fn empty_state_message() {
        let theme = Theme::resolve(ThemeMode::Light, None);
        let cols = [("Name", Constraint::Fill(1))];
        let text = screen(
            RecordTable::new("Users", &cols, Vec::new(), &theme).empty_message("No users found."),
        );
        assert!(text.contains("No users found."));
        assert!(text.contains("Name"));
    }
}
