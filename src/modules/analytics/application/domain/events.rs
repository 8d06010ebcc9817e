use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of the "weekly" aggregation window.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickKind {
    Phone,
    Email,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown click type: {0}")]
pub struct UnknownClickKind(pub String);

impl ClickKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickKind::Phone => "phone",
            ClickKind::Email => "email",
            ClickKind::Website => "website",
        }
    }
}

impl FromStr for ClickKind {
    type Err = UnknownClickKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(ClickKind::Phone),
            "email" => Ok(ClickKind::Email),
            "website" => Ok(ClickKind::Website),
            other => Err(UnknownClickKind(other.to_string())),
        }
    }
}

impl fmt::Display for ClickKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened. A click may or may not say which contact link was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    View,
    Click(Option<ClickKind>),
}

impl EventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            EventKind::View => "view",
            EventKind::Click(_) => "click",
        }
    }

    pub fn click_kind(&self) -> Option<ClickKind> {
        match self {
            EventKind::View => None,
            EventKind::Click(kind) => *kind,
        }
    }
}

/// Which events a count includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    Views,
    Clicks,
    ClicksOf(ClickKind),
}

impl EventFilter {
    pub fn matches(&self, kind: &EventKind) -> bool {
        match (self, kind) {
            (EventFilter::Views, EventKind::View) => true,
            (EventFilter::Clicks, EventKind::Click(_)) => true,
            (EventFilter::ClicksOf(wanted), EventKind::Click(Some(actual))) => wanted == actual,
            _ => false,
        }
    }
}

/// Half-open `[since, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeWindow {
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        Self {
            since: now - Duration::days(days),
            until: now,
        }
    }

    /// The UTC calendar day `date`.
    pub fn day(date: NaiveDate) -> Self {
        let since = date.and_time(NaiveTime::MIN).and_utc();
        Self {
            since,
            until: since + Duration::days(1),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.since <= at && at < self.until
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_views: u64,
    pub total_clicks: u64,
    pub weekly_views: u64,
    pub weekly_clicks: u64,
    pub phone_clicks: u64,
    pub email_clicks: u64,
    pub website_clicks: u64,
}
