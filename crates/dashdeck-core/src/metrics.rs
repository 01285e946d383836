//! Static dashboard metrics: stat cards and the revenue/profit series.

use crate::error::ParseEnumError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Chart range selector on the dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Weekly,
    Monthly,
    Quarterly,
    #[default]
    Yearly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] =
        [Timeframe::Weekly, Timeframe::Monthly, Timeframe::Quarterly, Timeframe::Yearly];

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
            Timeframe::Quarterly => "quarterly",
            Timeframe::Yearly => "yearly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
            Timeframe::Quarterly => "Quarterly",
            Timeframe::Yearly => "Yearly",
        }
    }

    /// The revenue chart's subtitle for this range.
    pub fn caption(self) -> &'static str {
        match self {
            Timeframe::Weekly => "Daily revenue for the current week",
            Timeframe::Monthly => "Weekly revenue for the current month",
            Timeframe::Quarterly => "Monthly revenue for the current quarter",
            Timeframe::Yearly => "Monthly revenue for the current year",
        }
    }

    /// Cycles weekly → monthly → quarterly → yearly → weekly.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| ParseEnumError::new("timeframe", s))
    }
}

/// A headline figure on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub trend: &'static str,
}

pub const STAT_CARDS: [StatCard; 4] = [
    StatCard { title: "Total Revenue", value: "$45,231.89", trend: "+20.1% from last month" },
    StatCard { title: "New Customers", value: "+2,350", trend: "+18.1% from last month" },
    StatCard { title: "Total Orders", value: "+12,234", trend: "+12.2% from last month" },
    StatCard { title: "Active Users", value: "+573", trend: "+201 since last hour" },
];

/// One bar of the profit chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitPoint {
    pub label: &'static str,
    pub profit: u64,
    /// Margin in whole percent.
    pub margin: u8,
}

const MONTHS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
const WEEKS: [&str; 4] = ["Week 1", "Week 2", "Week 3", "Week 4"];
const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const YEARLY_REVENUE: [u64; 12] =
    [18000, 22000, 32000, 26000, 42000, 35000, 31000, 48000, 52000, 45000, 55000, 68000];
const MONTHLY_REVENUE: [u64; 4] = [8500, 10200, 12400, 14100];
const WEEKLY_REVENUE: [u64; 7] = [1200, 1800, 2200, 1900, 2400, 2800, 1600];

const YEARLY_PROFIT: [(u64, u8); 12] = [
    (7200, 40),
    (9900, 45),
    (14400, 45),
    (10400, 40),
    (18900, 45),
    (15750, 45),
    (13950, 45),
    (21600, 45),
    (23400, 45),
    (20250, 45),
    (24750, 45),
    (30600, 45),
];
const MONTHLY_PROFIT: [(u64, u8); 4] = [(3400, 40), (4080, 40), (5580, 45), (6345, 45)];
const WEEKLY_PROFIT: [(u64, u8); 7] =
    [(480, 40), (720, 40), (990, 45), (760, 40), (1080, 45), (1260, 45), (640, 40)];

fn labels(timeframe: Timeframe) -> &'static [&'static str] {
    match timeframe {
        Timeframe::Weekly => &DAYS,
        Timeframe::Monthly => &WEEKS,
        Timeframe::Quarterly => &MONTHS[..3],
        Timeframe::Yearly => &MONTHS,
    }
}

/// `(label, revenue)` pairs for the revenue chart.
pub fn revenue(timeframe: Timeframe) -> Vec<(&'static str, u64)> {
    let values: &[u64] = match timeframe {
        Timeframe::Weekly => &WEEKLY_REVENUE,
        Timeframe::Monthly => &MONTHLY_REVENUE,
        Timeframe::Quarterly => &YEARLY_REVENUE[..3],
        Timeframe::Yearly => &YEARLY_REVENUE,
    };
    labels(timeframe).iter().copied().zip(values.iter().copied()).collect()
}

pub fn profit(timeframe: Timeframe) -> Vec<ProfitPoint> {
    let values: &[(u64, u8)] = match timeframe {
        Timeframe::Weekly => &WEEKLY_PROFIT,
        Timeframe::Monthly => &MONTHLY_PROFIT,
        Timeframe::Quarterly => &YEARLY_PROFIT[..3],
        Timeframe::Yearly => &YEARLY_PROFIT,
    };
    labels(timeframe)
        .iter()
        .zip(values)
        .map(|(label, (profit, margin))| ProfitPoint { label, profit: *profit, margin: *margin })
        .collect()
}

/// Visitor acquisition channels.
pub fn traffic_sources() -> [(&'static str, u64); 4] {
    [("Direct", 1200), ("Organic", 2100), ("Social", 800), ("Referral", 600)]
}

/// The dashboard welcome line, carrying the live unread count.
pub fn welcome_line(unread: usize) -> String {
    format!("Welcome back, you have {unread} new notifications.")
}
