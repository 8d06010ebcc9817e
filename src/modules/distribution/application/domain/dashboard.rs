use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Days covered by the activity chart: today and the seven before it.
pub const ACTIVITY_DAYS: i64 = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_businesses: u64,
    pub active_deals: u64,
    pub total_views: u64,
    pub total_clicks: u64,
    pub featured_businesses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub views: u64,
    pub clicks: u64,
}

impl DailyActivity {
    /// Short weekday name, e.g. `Mon`.
    pub fn label(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// Oldest first, ending with `today`.
pub fn activity_days(today: NaiveDate) -> Vec<NaiveDate> {
    (0..ACTIVITY_DAYS)
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}
