//! Ratatui widgets for the dashdeck TUI.

pub mod activity_feed;
pub mod command_bar;
pub mod form;
pub mod help;
pub mod notification_list;
pub mod query_bar;
pub mod record_table;
pub mod revenue_chart;
pub mod settings_panel;
pub mod stat_cards;
pub mod tab_bar;
pub mod toast;

use ratatui::layout::Rect;

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
