//! Search bar: a one-line filter input above each searchable screen.
//!
//! The query is matched as a case-insensitive substring against the screen's
//! display fields on every keystroke. Nothing is trimmed; a leading space is
//! part of the needle.

use crate::event::{AppEvent, LineInput};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct QueryBarState {
    pub input: LineInput,
}

impl QueryBarState {
    pub fn query(&self) -> &str {
        &self.input.text
    }

    pub fn is_empty(&self) -> bool {
        self.input.text.is_empty()
    }

    /// Apply an editing event. Returns `true` when the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let changed = self.input.edit(event);
        if changed {
            tracing::debug!(query = %self.input.text, "query changed");
        }
        changed
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    /// Result count shown in the title, e.g. `Search (3/6)`.
    matches: Option<(usize, usize)>,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, matches: None, theme }
    }

    pub fn matches(mut self, shown: usize, total: usize) -> Self {
        self.matches = Some((shown, total));
        self
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let x = (area.x + 1 + self.state.input.cursor_col()).min(area.right().saturating_sub(2));
        (x, area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.matches {
            Some((shown, total)) if !self.state.is_empty() => format!("Search ({shown}/{total})"),
            _ => "Search".to_string(),
        };
        let block = Block::bordered().title(title).border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.state.is_empty() && !self.focused {
            Line::from(Span::styled("press / to search", self.theme.muted))
        } else {
            Line::from(self.state.query())
        };
        Paragraph::new(line).render(inner, buf);
    }
}
