//! Notification center: All / Unread / Read sub-tabs over a selectable list.

use crate::theme::Theme;
use dashdeck_core::{
    feed::{NotificationCenter, NotificationView},
    types::Notification,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Tabs, Widget},
};

const VIEWS: [NotificationView; 3] =
    [NotificationView::All, NotificationView::Unread, NotificationView::Read];

pub struct NotificationList<'a> {
    center: &'a NotificationCenter,
    view: NotificationView,
    /// Entries to show, already narrowed by view and search.
    entries: &'a [&'a Notification],
    selected: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> NotificationList<'a> {
    pub fn new(
        center: &'a NotificationCenter,
        view: NotificationView,
        entries: &'a [&'a Notification],
        theme: &'a Theme,
    ) -> Self {
        Self { center, view, entries, selected: 0, focused: false, theme }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

fn empty_message(view: NotificationView) -> &'static str {
    match view {
        NotificationView::All => "No notifications",
        NotificationView::Unread => "No unread notifications",
        NotificationView::Read => "No read notifications",
    }
}

impl Widget for NotificationList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let unread = self.center.unread_count();
        let title = format!(" Notifications · {unread} unread ");
        let block = Block::bordered().title(title).border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let [tabs_area, list_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

        let labels: Vec<Line> = VIEWS
            .iter()
            .map(|v| Line::from(format!("{} ({})", v.label(), self.center.count(*v))))
            .collect();
        let selected_view = VIEWS.iter().position(|v| *v == self.view).unwrap_or(0);
        Tabs::new(labels)
            .select(selected_view)
            .highlight_style(self.theme.tab_active)
            .render(tabs_area, buf);

        if self.entries.is_empty() {
            Paragraph::new(Line::from(empty_message(self.view)).centered())
                .style(self.theme.muted)
                .render(list_area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|n| {
                let (marker, title_style) = if n.read {
                    ("  ", self.theme.muted)
                } else {
                    ("● ", self.theme.title)
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, self.theme.unread),
                        Span::styled(n.title.as_str(), title_style),
                    ]),
                    Line::from(Span::styled(format!("  {}", n.description), self.theme.muted)),
                ])
            })
            .collect();

        let list = List::new(items).highlight_style(self.theme.selection);
        let mut state =
            ListState::default().with_selected(Some(self.selected.min(self.entries.len() - 1)));
        StatefulWidget::render(list, list_area, buf, &mut state);
    }
}
