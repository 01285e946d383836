//! Transient toasts stacked in the top-right corner.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_VISIBLE: usize = 3;
const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;
/// Upper bound on a configured toast lifetime.
pub const MAX_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Default,
    /// Validation failures and other errors.
    Destructive,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    ttl: Duration,
}

impl ToastQueue {
    /// `ttl` is capped at [`MAX_TTL`].
    pub fn new(ttl: Duration) -> Self {
        Self { items: VecDeque::new(), ttl: ttl.min(MAX_TTL) }
    }

    pub fn push(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: ToastKind,
        now: Instant,
    ) {
        let toast = Toast {
            title: title.into(),
            description: description.into(),
            kind,
            expires_at: now.checked_add(self.ttl).unwrap_or(now),
        };
        tracing::debug!(title = %toast.title, ?kind, "toast");
        self.items.push_back(toast);
    }

    /// Drop every toast whose time is up. Returns how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|t| t.expires_at > now);
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter().rev()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.back()
    }
}

pub struct ToastStack<'a> {
    queue: &'a ToastQueue,
    theme: &'a Theme,
}

impl<'a> ToastStack<'a> {
    pub fn new(queue: &'a ToastQueue, theme: &'a Theme) -> Self {
        Self { queue, theme }
    }
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.right().saturating_sub(width + 1).max(area.x);
        let mut y = area.y + 1;

        for toast in self.queue.iter().take(MAX_VISIBLE) {
            if y + TOAST_HEIGHT > area.bottom() {
                break;
            }
            let rect = Rect { x, y, width, height: TOAST_HEIGHT };
            let border = match toast.kind {
                ToastKind::Default => self.theme.toast_default,
                ToastKind::Destructive => self.theme.toast_destructive,
            };
            Clear.render(rect, buf);
            Paragraph::new(vec![
                Line::from(Span::styled(toast.title.as_str(), border)),
                Line::from(toast.description.as_str()),
            ])
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(border).style(self.theme.base))
            .render(rect, buf);
            y += TOAST_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashdeck_core::prefs::ThemeMode;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn toasts_expire_after_ttl() {
        let start = Instant::now();
        let mut q = ToastQueue::new(Duration::from_secs(3));
        q.push("Saved", "Settings saved", ToastKind::Default, start);
        q.push("Error", "Name is required", ToastKind::Destructive, start + Duration::from_secs(2));

        assert_eq!(q.expire(start + Duration::from_secs(1)), 0);
        assert_eq!(q.expire(start + Duration::from_secs(3)), 1);
        assert_eq!(q.latest().map(|t| t.title.as_str()), Some("Error"));
        assert_eq!(q.expire(start + Duration::from_secs(5)), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn oversized_ttl_is_capped() {
        let start = Instant::now();
        let mut q = ToastQueue::new(Duration::from_secs(u64::MAX));
        q.push("Saved", "Settings saved", ToastKind::Default, start);

        assert_eq!(q.latest().map(|t| t.expires_at), Some(start + MAX_TTL));
        assert_eq!(q.expire(start + MAX_TTL - Duration::from_secs(1)), 0);
        assert_eq!(q.expire(start + MAX_TTL), 1);
    }

    #[test]
    fn stack_shows_newest_first() {
        let now = Instant::now();
        let mut q = ToastQueue::new(Duration::from_secs(3));
        for i in 0..5 {
            q.push(format!("toast-{i}"), "", ToastKind::Default, now);
        }
        let titles: Vec<_> = q.iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles[0], "toast-4");

        let theme = Theme::resolve(ThemeMode::Dark, None);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| f.render_widget(ToastStack::new(&q, &theme), f.area())).unwrap();
        let text: String =
            terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("toast-4"));
        assert!(text.contains("toast-2"));
        assert!(!text.contains("toast-1"));
    }
}
