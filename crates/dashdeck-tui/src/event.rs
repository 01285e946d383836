//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`                     | `Quit`                     |
//! | `Ctrl+c`                | `ForceQuit`                |
//! | `1`-`5`                 | `SelectTab(n)`             |
//! | `]` / `[`               | `NextTab` / `PrevTab`      |
//! | `Tab` / `Shift+Tab`     | `FocusNext` / `FocusPrev`  |
//! | `/`                     | `QueryFocus`               |
//! | `↑` / `k`, `↓` / `j`    | `Nav(Up)`, `Nav(Down)`     |
//! | `←` / `h`, `→` / `l`    | `Nav(Left)`, `Nav(Right)`  |
//! | `PageUp` / `PageDown`   | `PageUp` / `PageDown`      |
//! | `Home` / `End`          | `Top` / `Bottom`           |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! Per-screen action letters (`a`, `e`, `d`, `r`, ...) arrive as `Char` and are
//! interpreted by the app shell according to the active tab.
//!
//! ## Insert mode
//!
//! While a text input (search, command line, form) is focused the event loop
//! calls [`to_app_event_insert`] instead. Every printable character, including
//! the digits and letters bound above, is forwarded as `Char`.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Quit even with unsaved settings.
    ForceQuit,
    /// Jump to the tab at this zero-based index.
    SelectTab(usize),
    NextTab,
    PrevTab,
    /// Move to the next form field.
    FocusNext,
    FocusPrev,
    QueryFocus,
    Nav(Direction),
    PageUp,
    PageDown,
    Top,
    Bottom,
    Char(char),
    Backspace,
    Enter,
    Escape,
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
///
/// Returns `None` for mouse events, focus events and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::ForceQuit),

        Char(d @ '1'..='5') if key.modifiers == Mod::NONE => {
            Some(AppEvent::SelectTab(d as usize - '1' as usize))
        }
        Char(']') if key.modifiers == Mod::NONE => Some(AppEvent::NextTab),
        Char('[') if key.modifiers == Mod::NONE => Some(AppEvent::PrevTab),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),

        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::QueryFocus),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),
        Home => Some(AppEvent::Top),
        End => Some(AppEvent::Bottom),

        // Shifted letters (R, C, T) may or may not carry SHIFT depending on
        // the terminal.
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::ForceQuit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),
        Home => Some(AppEvent::Top),
        End => Some(AppEvent::Bottom),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Text editing
// ---------------------------------------------------------------------------

/// A single-line text buffer with a byte-offset cursor, shared by the search
/// bar, the command line and form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    pub text: String,
    /// Byte offset of the cursor within `text`.
    pub cursor: usize,
}

impl LineInput {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing event. Returns `true` when the text changed.
    pub fn edit(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.text.len() {
                    self.cursor = self.text[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.text.len());
                }
                false
            }
            AppEvent::Top => {
                self.cursor = 0;
                false
            }
            AppEvent::Bottom => {
                self.cursor = self.text.len();
                false
            }
            _ => false,
        }
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_col(&self) -> u16 {
        self.text[..self.cursor].chars().count() as u16
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
