//! Live activity pane: the newest events, timestamps relative to `now`.

use crate::theme::Theme;
use chrono::{DateTime, Utc};
use dashdeck_core::{feed::ActivityFeed, types::{Activity, ActivityKind}};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, Widget},
};

pub struct ActivityPane<'a> {
    feed: &'a ActivityFeed,
    now: DateTime<Utc>,
    live: bool,
    theme: &'a Theme,
}

impl<'a> ActivityPane<'a> {
    pub fn new(feed: &'a ActivityFeed, now: DateTime<Utc>, theme: &'a Theme) -> Self {
        Self { feed, now, live: true, theme }
    }

    /// Whether generators are running; controls the `Live` badge.
    pub fn live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }
}

fn kind_glyph(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Purchase => "$",
        ActivityKind::Login => "@",
        ActivityKind::Alert => "!",
        ActivityKind::Refund => "↩",
    }
}

fn activity_item<'a>(a: &'a Activity, now: DateTime<Utc>, theme: &Theme) -> ListItem<'a> {
    let mut head = vec![
        Span::styled(format!("[{}] ", a.actor.initials), theme.accent),
        Span::styled(a.actor.name.as_str(), theme.title),
    ];
    if let Some(amount) = &a.amount {
        head.push(Span::raw("  "));
        head.push(Span::styled(amount.as_str(), theme.tone_style(a.tone)));
    } else if a.tone.is_some() {
        head.push(Span::raw("  "));
        head.push(Span::styled(a.kind.as_str(), theme.tone_style(a.tone)));
    }

    ListItem::new(vec![
        Line::from(head),
        Line::from(vec![
            Span::styled(format!(" {} ", kind_glyph(a.kind)), theme.muted),
            Span::raw(format!("{} ", a.action)),
            Span::styled(a.target.as_str(), theme.title),
        ]),
        Line::from(Span::styled(format!("   {}", a.time_label(now)), theme.muted)),
    ])
}

impl Widget for ActivityPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.live {
            Line::from(vec![Span::raw(" Live Activity "), Span::styled("● Live ", self.theme.positive)])
        } else {
            Line::from(" Live Activity ")
        };
        let block = Block::bordered().title(title).border_style(self.theme.border_unfocused);

        if self.feed.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_string(inner.x + 1, inner.y, "No recent activity", self.theme.muted);
            return;
        }

        let items: Vec<ListItem> =
            self.feed.iter().map(|a| activity_item(a, self.now, self.theme)).collect();
        List::new(items).block(block).render(area, buf);
    }
}
