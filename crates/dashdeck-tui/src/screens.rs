//! Frame layout: tab bar, the active screen, status hints and overlays.

use crate::{
    app::{AppState, Focus, Modal},
    widgets::{
        activity_feed::ActivityPane,
        command_bar::CommandBar,
        form::{ConfirmPopup, FormPopup},
        help::HelpPopup,
        notification_list::NotificationList,
        query_bar::QueryBar,
        record_table::RecordTable,
        revenue_chart::RevenueChart,
        settings_panel::SettingsPanel,
        stat_cards::StatCards,
        tab_bar::TabBar,
        toast::ToastStack,
    },
};
use chrono::Utc;
use dashdeck_core::{metrics, prefs::Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Cell, Paragraph, Row},
    Frame,
};

fn hints(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => " t timeframe · / search orders · : command · ? help",
        Tab::Users | Tab::Products => " a add · e edit · d delete · / search · ? help",
        Tab::Notifications => " r read · R read all · d delete · C clear · f view · / search",
        Tab::Settings => " ↑/↓ select · Space toggle · s save · T theme",
    }
}

pub fn draw(frame: &mut Frame, s: &AppState) {
    let area = frame.area();
    frame.render_widget(Block::default().style(s.theme.base), area);

    // Vertical: 1-line tab bar | body | 1-line status hints
    let [tabs_area, body, status] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)])
            .areas(area);

    let tab = s.active_tab();
    frame.render_widget(TabBar::new(tab, s.notifications.unread_count(), &s.theme), tabs_area);

    let query_area = match tab {
        Tab::Dashboard => draw_dashboard(frame, body, s),
        Tab::Users => draw_users(frame, body, s),
        Tab::Products => draw_products(frame, body, s),
        Tab::Notifications => draw_notifications(frame, body, s),
        Tab::Settings => {
            let panel = SettingsPanel::new(&s.settings, s.prefs.theme, &s.theme)
                .selected(s.selection(Tab::Settings))
                .dirty(s.settings_dirty());
            frame.render_widget(panel, body);
            None
        }
    };

    frame.render_widget(Paragraph::new(Line::from(hints(tab))).style(s.theme.muted), status);

    let mut cursor = None;
    match &s.modal {
        Some(Modal::Form(form)) => {
            let popup = FormPopup::new(form, &s.theme);
            cursor = Some(popup.cursor_position(area));
            frame.render_widget(popup, area);
        }
        Some(Modal::ConfirmDelete { name, .. }) => {
            let prompt = format!("Delete {name}? (y/n)");
            frame.render_widget(ConfirmPopup::new(&prompt, &s.theme), area);
        }
        None => {}
    }

    if s.show_help {
        frame.render_widget(HelpPopup::new(&s.theme), area);
    }

    // Command bar overlays the status row
    if s.focus == Focus::Command {
        frame.render_widget(CommandBar::new(&s.command_bar, &s.theme), status);
        cursor = Some((s.command_bar.cursor_col(status), status.y));
    } else if let (Focus::QueryBar, None, Some(qa)) = (s.focus, cursor, query_area) {
        let qb = QueryBar::new(&s.queries[tab.index()], true, &s.theme);
        cursor = Some(qb.cursor_position(qa));
    }

    // Toasts sit above everything, including popups
    frame.render_widget(ToastStack::new(&s.toasts, &s.theme), body);

    if let Some(pos) = cursor {
        frame.set_cursor_position(pos);
    }
}

/// Render the 3-line search bar at the bottom of `area`. Returns the space
/// left above it and the bar itself.
fn with_query_bar(
    frame: &mut Frame,
    area: Rect,
    s: &AppState,
    tab: Tab,
    shown: usize,
    total: usize,
) -> (Rect, Rect) {
    let [main, query] = Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);
    let focused = s.focus == Focus::QueryBar && s.active_tab() == tab;
    frame.render_widget(
        QueryBar::new(&s.queries[tab.index()], focused, &s.theme).matches(shown, total),
        query,
    );
    (main, query)
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn draw_dashboard(frame: &mut Frame, area: Rect, s: &AppState) -> Option<Rect> {
    let orders = s.visible_orders();
    let (main, query) =
        with_query_bar(frame, area, s, Tab::Dashboard, orders.len(), s.store.orders.len());

    let [welcome, cards, middle, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(10),
    ])
    .areas(main);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Dashboard  ", s.theme.title),
            Span::styled(metrics::welcome_line(s.notifications.unread_count()), s.theme.muted),
        ])),
        welcome,
    );
    frame.render_widget(StatCards::new(&metrics::STAT_CARDS, &s.theme), cards);

    let [chart, activity] =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Fill(1)]).areas(middle);
    frame.render_widget(RevenueChart::new(s.timeframe, &s.theme), chart);
    frame.render_widget(ActivityPane::new(&s.activity, Utc::now(), &s.theme).live(s.live), activity);

    let [orders_area, traffic] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(34)]).areas(bottom);

    let rows: Vec<Row> = orders
        .iter()
        .map(|o| {
            Row::new(vec![
                Cell::from(o.id.as_str()),
                Cell::from(o.customer.as_str()),
                Cell::from(o.product.as_str()),
                Cell::from(o.date.format("%Y-%m-%d").to_string()),
                Cell::from(o.amount.as_str()),
                Cell::from(Span::styled(o.status.as_str(), s.theme.order_style(o.status))),
            ])
        })
        .collect();
    let columns = [
        ("Order", Constraint::Length(8)),
        ("Customer", Constraint::Fill(2)),
        ("Product", Constraint::Fill(2)),
        ("Date", Constraint::Length(11)),
        ("Amount", Constraint::Length(9)),
        ("Status", Constraint::Length(11)),
    ];
    frame.render_widget(
        RecordTable::new(" Recent Orders ", &columns, rows, &s.theme)
            .selected(Some(s.selection(Tab::Dashboard)))
            .focused(s.focus == Focus::Main)
            .empty_message("No orders found."),
        orders_area,
    );

    let sources = metrics::traffic_sources();
    let bars: Vec<Bar> = sources
        .iter()
        .map(|(label, value)| {
            Bar::default().label(*label).value(*value).style(s.theme.chart_revenue)
        })
        .collect();
    frame.render_widget(
        BarChart::default()
            .block(Block::bordered().title(" Traffic Sources ").border_style(s.theme.border_unfocused))
            .direction(Direction::Horizontal)
            .data(BarGroup::default().bars(&bars))
            .bar_width(1)
            .bar_gap(1),
        traffic,
    );

    Some(query)
}

// ---------------------------------------------------------------------------
// Users / Products
// ---------------------------------------------------------------------------

fn draw_users(frame: &mut Frame, area: Rect, s: &AppState) -> Option<Rect> {
    let users = s.visible_users();
    let (main, query) = with_query_bar(frame, area, s, Tab::Users, users.len(), s.store.users.len());

    let rows: Vec<Row> = users
        .iter()
        .map(|u| {
            Row::new(vec![
                Cell::from(u.id.as_str()),
                Cell::from(u.name.as_str()),
                Cell::from(u.email.as_str()),
                Cell::from(Span::styled(u.role.as_str(), s.theme.role_style(u.role))),
                Cell::from(Span::styled(u.status.as_str(), s.theme.user_status_style(u.status))),
                Cell::from(u.last_active.as_str()),
            ])
        })
        .collect();
    let columns = [
        ("ID", Constraint::Length(4)),
        ("Name", Constraint::Fill(2)),
        ("Email", Constraint::Fill(3)),
        ("Role", Constraint::Length(8)),
        ("Status", Constraint::Length(10)),
        ("Last Active", Constraint::Length(13)),
    ];
    let title = format!(" Users ({}) ", s.store.users.len());
    frame.render_widget(
        RecordTable::new(title, &columns, rows, &s.theme)
            .selected(Some(s.selection(Tab::Users)))
            .focused(s.focus == Focus::Main)
            .empty_message("No users found."),
        main,
    );
    Some(query)
}

fn draw_products(frame: &mut Frame, area: Rect, s: &AppState) -> Option<Rect> {
    let products = s.visible_products();
    let (main, query) =
        with_query_bar(frame, area, s, Tab::Products, products.len(), s.store.products.len());

    let rows: Vec<Row> = products
        .iter()
        .map(|p| {
            let status = p.status();
            Row::new(vec![
                Cell::from(p.id.as_str()),
                Cell::from(p.name.as_str()),
                Cell::from(p.category.as_str()),
                Cell::from(p.price.as_str()),
                Cell::from(p.stock.to_string()),
                Cell::from(Span::styled(status.as_str(), s.theme.stock_style(status))),
            ])
        })
        .collect();
    let columns = [
        ("ID", Constraint::Length(9)),
        ("Name", Constraint::Fill(3)),
        ("Category", Constraint::Fill(2)),
        ("Price", Constraint::Length(10)),
        ("Stock", Constraint::Length(6)),
        ("Status", Constraint::Length(13)),
    ];
    let title = format!(" Products ({}) ", s.store.products.len());
    frame.render_widget(
        RecordTable::new(title, &columns, rows, &s.theme)
            .selected(Some(s.selection(Tab::Products)))
            .focused(s.focus == Focus::Main)
            .empty_message("No products found."),
        main,
    );
    Some(query)
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

fn draw_notifications(frame: &mut Frame, area: Rect, s: &AppState) -> Option<Rect> {
    let entries = s.visible_notifications();
    let in_view = s.notifications.count(s.notification_view);
    let (main, query) = with_query_bar(frame, area, s, Tab::Notifications, entries.len(), in_view);

    frame.render_widget(
        NotificationList::new(&s.notifications, s.notification_view, &entries, &s.theme)
            .selected(s.selection(Tab::Notifications))
            .focused(s.focus == Focus::Main),
        main,
    );
    Some(query)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
