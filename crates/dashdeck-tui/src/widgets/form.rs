//! Add/edit form popup and the delete confirmation dialog.
//!
//! # Editing
//!
//! - `Tab` / `↓` move to the next field, `Shift+Tab` / `↑` to the previous.
//! - Printable keys edit the focused field.
//! - `Enter` submits; the app shell validates and either closes the form or
//!   raises a destructive toast and leaves it open.
//! - `Escape` cancels.

use super::centered_rect;
use crate::event::{AppEvent, Direction, LineInput};
use crate::theme::Theme;
use dashdeck_core::types::{Product, ProductDraft, User, UserDraft};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What the form will do on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    AddUser,
    EditUser(String),
    AddProduct,
    EditProduct(String),
}

impl FormKind {
    pub fn title(&self) -> String {
        match self {
            FormKind::AddUser => " Add New User ".to_string(),
            FormKind::EditUser(id) => format!(" Edit User {id} "),
            FormKind::AddProduct => " Add New Product ".to_string(),
            FormKind::EditProduct(id) => format!(" Edit Product {id} "),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    /// Allowed values or format, shown dimmed after the input.
    pub hint: &'static str,
    pub input: LineInput,
}

impl FormField {
    fn new(label: &'static str, hint: &'static str, value: &str) -> Self {
        Self { label, hint, input: LineInput::with_text(value) }
    }
}

/// Outcome of a key press inside the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Submit,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl FormState {
    pub fn add_user() -> Self {
        Self::user(FormKind::AddUser, &UserDraft::default())
    }

    pub fn edit_user(user: &User) -> Self {
        Self::user(FormKind::EditUser(user.id.clone()), &UserDraft::from(user))
    }

    fn user(kind: FormKind, draft: &UserDraft) -> Self {
        Self {
            kind,
            fields: vec![
                FormField::new("Name", "required", &draft.name),
                FormField::new("Email", "required", &draft.email),
                FormField::new("Role", "admin | editor | viewer", &draft.role),
                FormField::new("Status", "active | inactive | pending", &draft.status),
            ],
            focused: 0,
        }
    }

    pub fn add_product() -> Self {
        Self::product(FormKind::AddProduct, &ProductDraft::default())
    }

    pub fn edit_product(product: &Product) -> Self {
        Self::product(FormKind::EditProduct(product.id.clone()), &ProductDraft::from(product))
    }

    fn product(kind: FormKind, draft: &ProductDraft) -> Self {
        Self {
            kind,
            fields: vec![
                FormField::new("Name", "required", &draft.name),
                FormField::new("Category", "required", &draft.category),
                FormField::new("Price", "required, e.g. 49.99", &draft.price),
                FormField::new("Stock", "whole number, blank = 0", &draft.stock),
            ],
            focused: 0,
        }
    }

    fn value(&self, i: usize) -> String {
        self.fields.get(i).map(|f| f.input.text.clone()).unwrap_or_default()
    }

    pub fn user_draft(&self) -> UserDraft {
        UserDraft { name: self.value(0), email: self.value(1), role: self.value(2), status: self.value(3) }
    }

    pub fn product_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.value(0),
            category: self.value(1),
            price: self.value(2),
            stock: self.value(3),
        }
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focused)
    }

    pub fn handle(&mut self, event: &AppEvent) -> FormAction {
        let n = self.fields.len().max(1);
        match event {
            AppEvent::Escape => return FormAction::Cancel,
            AppEvent::Enter => return FormAction::Submit,
            AppEvent::FocusNext | AppEvent::Nav(Direction::Down) => {
                self.focused = (self.focused + 1) % n;
            }
            AppEvent::FocusPrev | AppEvent::Nav(Direction::Up) => {
                self.focused = (self.focused + n - 1) % n;
            }
            other => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    field.input.edit(other);
                }
            }
        }
        FormAction::Continue
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

const LABEL_WIDTH: u16 = 10;

pub struct FormPopup<'a> {
    state: &'a FormState,
    theme: &'a Theme,
}

impl<'a> FormPopup<'a> {
    pub fn new(state: &'a FormState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn area(&self, area: Rect) -> Rect {
        centered_rect(64, self.state.fields.len() as u16 * 2 + 4, area)
    }

    /// Terminal cursor position for the focused field.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let popup = self.area(area);
        let col = self.state.focused_field().map(|f| f.input.cursor_col()).unwrap_or(0);
        let x = (popup.x + 2 + LABEL_WIDTH + col).min(popup.right().saturating_sub(2));
        let y = popup.y + 1 + self.state.focused as u16 * 2;
        (x, y)
    }
}

impl Widget for FormPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = self.area(area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(self.state.kind.title())
            .title_bottom(Line::from(" Enter save · Esc cancel · Tab next field ").centered())
            .border_style(self.theme.border_focused)
            .style(self.theme.base);

        let mut lines = Vec::new();
        for (i, field) in self.state.fields.iter().enumerate() {
            let label_style = if i == self.state.focused { self.theme.accent } else { self.theme.muted };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<w$}", field.label, w = LABEL_WIDTH as usize), label_style),
                Span::raw(field.input.text.as_str()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("{:<w$}{}", "", field.hint, w = LABEL_WIDTH as usize),
                self.theme.muted,
            )));
        }

        Paragraph::new(lines).block(block.padding(Padding::horizontal(1))).render(popup, buf);
    }
}

/// "Delete X? (y/n)" dialog.
pub struct ConfirmPopup<'a> {
    prompt: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmPopup<'a> {
    pub fn new(prompt: &'a str, theme: &'a Theme) -> Self {
        Self { prompt, theme }
    }
}

impl Widget for ConfirmPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.prompt.chars().count() as u16 + 6).max(30);
        let popup = centered_rect(width, 5, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" Confirm ")
            .border_style(self.theme.negative)
            .style(self.theme.base);
        let lines = vec![
            Line::from(self.prompt).centered(),
            Line::from(Span::styled("y delete · any other key cancels", self.theme.muted)).centered(),
        ];
        Paragraph::new(lines).block(block).render(popup, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use dashdeck_core::mock;
    use pretty_assertions::assert_eq;

    fn type_str(form: &mut FormState, s: &str) {
        for c in s.chars() {
            form.handle(&AppEvent::Char(c));
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut form = FormState::add_user();
        type_str(&mut form, "Ada");
        form.handle(&AppEvent::FocusNext);
        type_str(&mut form, "ada@example.com");
        form.handle(&AppEvent::FocusNext);
        type_str(&mut form, "admin");

        assert_eq!(
            form.user_draft(),
            UserDraft {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                role: "admin".into(),
                status: String::new(),
            }
        );
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = FormState::add_product();
        form.handle(&AppEvent::FocusPrev);
        assert_eq!(form.focused, 3);
        form.handle(&AppEvent::FocusNext);
        assert_eq!(form.focused, 0);
    }

    #[test]
    fn edit_form_is_prefilled() {
        let products = mock::products();
        let form = FormState::edit_product(&products[1]);
        assert_eq!(form.kind, FormKind::EditProduct("PROD-002".into()));
        assert_eq!(form.product_draft().stock, "12");
        assert_eq!(form.fields[0].input.cursor, "Wireless Keyboard".len());
    }

    #[test]
    fn enter_and_escape_end_the_form() {
        let mut form = FormState::add_user();
        assert_eq!(form.handle(&AppEvent::Char('x')), FormAction::Continue);
        assert_eq!(form.handle(&AppEvent::Enter), FormAction::Submit);
        assert_eq!(form.handle(&AppEvent::Escape), FormAction::Cancel);
    }
}
