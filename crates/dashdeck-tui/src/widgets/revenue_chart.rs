//! Revenue and gross-profit bar charts for the selected timeframe.

use crate::theme::Theme;
use dashdeck_core::metrics::{self, Timeframe};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Bar, BarChart, BarGroup, Block, Widget},
};

pub struct RevenueChart<'a> {
    timeframe: Timeframe,
    theme: &'a Theme,
}

impl<'a> RevenueChart<'a> {
    pub fn new(timeframe: Timeframe, theme: &'a Theme) -> Self {
        Self { timeframe, theme }
    }
}

/// Compact dollar label: `$1.2k`, `$68k`.
fn short_dollars(value: u64) -> String {
    if value >= 10_000 {
        format!("${}k", value / 1000)
    } else if value >= 1000 {
        format!("${:.1}k", value as f64 / 1000.0)
    } else {
        format!("${value}")
    }
}

/// Bar width that spreads `n` bars over `width` columns with 1-column gaps.
fn bar_width(width: u16, n: usize) -> u16 {
    if n == 0 {
        return 1;
    }
    let n = n as u16;
    (width.saturating_sub(n) / n).clamp(1, 9)
}

impl Widget for RevenueChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [revenue_area, profit_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

        let revenue = metrics::revenue(self.timeframe);
        let bars: Vec<Bar> = revenue
            .iter()
            .map(|(label, value)| {
                Bar::default()
                    .label(*label)
                    .value(*value)
                    .text_value(short_dollars(*value))
                    .style(self.theme.chart_revenue)
            })
            .collect();
        let inner_width = revenue_area.width.saturating_sub(2);
        BarChart::default()
            .block(
                Block::bordered()
                    .title(format!(" Revenue ({}) ", self.timeframe.label()))
                    .title_bottom(self.timeframe.caption())
                    .border_style(self.theme.border_unfocused),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width(inner_width, bars.len()))
            .bar_gap(1)
            .render(revenue_area, buf);

        let profit = metrics::profit(self.timeframe);
        let bars: Vec<Bar> = profit
            .iter()
            .map(|p| {
                Bar::default()
                    .label(p.label)
                    .value(p.profit)
                    .text_value(format!("{}%", p.margin))
                    .style(self.theme.chart_profit)
            })
            .collect();
        let inner_width = profit_area.width.saturating_sub(2);
        BarChart::default()
            .block(
                Block::bordered()
                    .title(" Gross Profit & Margin ")
                    .border_style(self.theme.border_unfocused),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width(inner_width, bars.len()))
            .bar_gap(1)
            .render(profit_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_labels_shorten() {
        assert_eq!(short_dollars(680), "$680");
        assert_eq!(short_dollars(1200), "$1.2k");
        assert_eq!(short_dollars(68000), "$68k");
    }

    #[test]
    fn bars_fit_the_available_width() {
        assert_eq!(bar_width(0, 12), 1);
        assert_eq!(bar_width(60, 12), 4);
        assert_eq!(bar_width(200, 3), 9);
    }
}
