//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Opened with `:` from any screen. `Enter` parses and executes the command,
//! `Escape` cancels. See [`crate::commands`] for the command set.

use crate::event::{AppEvent, LineInput};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CommandBarState {
    pub input: LineInput,
    /// Error from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    pub fn text(&self) -> &str {
        &self.input.text
    }

    /// Apply an editing key. `Enter` and `Escape` are the app shell's job.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        self.input.edit(event);
    }

    /// Absolute terminal column of the text cursor. The `:` glyph occupies
    /// column 0.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        (area.x + 1 + self.input.cursor_col()).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row overlay. The caller passes a 1-row `Rect`.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(format!("E  {err}"), self.theme.negative))
        } else {
            Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::raw(self.state.text()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_insert_and_backspace() {
        let mut s = CommandBarState::default();
        for c in "foo".chars() {
            s.handle(&AppEvent::Char(c));
        }
        assert_eq!(s.text(), "foo");
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.text(), "fo");
        assert_eq!(s.input.cursor, 2);
    }

    #[test]
    fn error_cleared_on_next_key() {
        let mut s = CommandBarState::default();
        s.error = Some("oops".to_string());
        s.handle(&AppEvent::Char('x'));
        assert!(s.error.is_none());
    }

    #[test]
    fn cursor_follows_prefix() {
        let mut s = CommandBarState::default();
        s.handle(&AppEvent::Char('q'));
        let area = Rect::new(0, 10, 40, 1);
        assert_eq!(s.cursor_col(area), 2);
    }
}
