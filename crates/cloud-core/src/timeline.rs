//! Timeline events: ordering, grouping and severity/status styling

use crate::colors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Event severity, drives the icon and accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
    Info,
    #[default]
    Default,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Success => colors::SUCCESS,
            Self::Warning => colors::WARN,
            Self::Error => colors::DANGER,
            Self::Info => colors::INFO,
            Self::Default => colors::NEUTRAL,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Warning => "⚠",
            Self::Error => "✖",
            Self::Info => "ℹ",
            Self::Default => "●",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "tl-success",
            Self::Warning => "tl-warning",
            Self::Error => "tl-error",
            Self::Info => "tl-info",
            Self::Default => "tl-default",
        }
    }
}

/// Event progress status, styled independently of severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    Completed,
    InProgress,
    Failed,
    Pending,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Completed => "badge badge-completed",
            Self::InProgress => "badge badge-in-progress",
            Self::Failed => "badge badge-failed",
            Self::Pending => "badge badge-pending",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Completed => colors::SUCCESS,
            Self::InProgress => colors::PRIMARY,
            Self::Failed => colors::DANGER,
            Self::Pending => colors::NEUTRAL,
        }
    }
}

/// One entry on an activity timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, rename = "type")]
    pub severity: Severity,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl TimelineEvent {
    /// New event with a generated id
    pub fn new(title: impl Into<String>, timestamp: DateTime<Utc>, severity: Severity) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            timestamp,
            severity,
            user: None,
            status: None,
            duration: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn duration(mut self, seconds: u64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Duration as `1h 5m`, `3m 20s` or `45s`
    pub fn duration_str(&self) -> Option<String> {
        self.duration.map(format_duration)
    }

    /// Metadata values rendered as display text
    pub fn metadata_pairs(&self) -> Vec<(String, String)> {
        self.metadata
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect()
    }
}

pub fn format_duration(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{}h {}m", h, m)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

// ============================================================================
// STRATEGY PATTERN: Date bucketing
// ============================================================================

/// Formats a timestamp into a bucket key / display string
pub trait DateFormatter: Send + Sync {
    fn format(&self, timestamp: &DateTime<Utc>) -> String;
}

impl<F> DateFormatter for F
where
    F: Fn(&DateTime<Utc>) -> String + Send + Sync,
{
    fn format(&self, timestamp: &DateTime<Utc>) -> String {
        self(timestamp)
    }
}

/// `chrono` pattern-based formatter
#[derive(Debug, Clone)]
pub struct PatternDateFormatter {
    pub pattern: &'static str,
}

impl PatternDateFormatter {
    /// Date-only buckets, e.g. `Mar 04, 2025`
    pub const DATE: Self = Self { pattern: "%b %d, %Y" };
    /// Time of day, e.g. `14:05`
    pub const TIME: Self = Self { pattern: "%H:%M" };
}

impl Default for PatternDateFormatter {
    fn default() -> Self {
        Self::DATE
    }
}

impl DateFormatter for PatternDateFormatter {
    fn format(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp.format(self.pattern).to_string()
    }
}

pub type SharedDateFormatter = Arc<dyn DateFormatter>;

/// Events in one bucket
#[derive(Debug, Clone, PartialEq)]
pub struct EventGroup {
    pub key: String,
    pub events: Vec<TimelineEvent>,
}

/// Newest first; ties keep their input order
pub fn sort_newest_first(events: &[TimelineEvent]) -> Vec<TimelineEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

/// Bucket already-sorted events by the formatter's output string.
///
/// Buckets appear in the order their first event appears, so newest-first
/// input yields newest-first buckets. Events with the same key that are not
/// adjacent still land in one bucket.
pub fn group_events(sorted: &[TimelineEvent], formatter: &dyn DateFormatter) -> Vec<EventGroup> {
    let mut groups: Vec<EventGroup> = Vec::new();
    for event in sorted {
        let key = formatter.format(&event.timestamp);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.events.push(event.clone()),
            None => groups.push(EventGroup {
                key,
                events: vec![event.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_sorted_newest_first() {
        let t1 = TimelineEvent::new("t1", at(1, 1), Severity::Info);
        let t2 = TimelineEvent::new("t2", at(2, 1), Severity::Info);
        let t3 = TimelineEvent::new("t3", at(3, 1), Severity::Info);

        let sorted = sort_newest_first(&[t2.clone(), t1.clone(), t3.clone()]);
        let titles: Vec<&str> = sorted.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_group_by_date_only() {
        let events = sort_newest_first(&[
            TimelineEvent::new("a", at(9, 1), Severity::Info),
            TimelineEvent::new("b", at(18, 1), Severity::Warning),
            TimelineEvent::new("c", at(10, 2), Severity::Error),
        ]);
        let groups = group_events(&events, &PatternDateFormatter::DATE);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Mar 02, 2025");
        assert_eq!(groups[0].events[0].title, "c");
        assert_eq!(groups[1].events.len(), 2);
        assert_eq!(groups[1].events[0].title, "b");
    }

    #[test]
    fn test_group_by_time_granularity_splits_same_day() {
        let events = sort_newest_first(&[
            TimelineEvent::new("a", at(9, 1), Severity::Info),
            TimelineEvent::new("b", at(18, 1), Severity::Info),
        ]);
        let groups = group_events(&events, &|ts: &DateTime<Utc>| ts.format("%Y-%m-%d %H").to_string());
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(200), "3m 20s");
        assert_eq!(format_duration(3900), "1h 5m");
    }

    #[test]
    fn test_deserialize_event() {
        let json = r#"{
            "id": "evt-1",
            "title": "Instance launched",
            "timestamp": "2025-03-01T12:00:00Z",
            "type": "success",
            "status": "in-progress",
            "metadata": {"region": "us-east-1", "count": 3}
        }"#;
        let event: TimelineEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.severity, Severity::Success);
        assert_eq!(event.status, Some(EventStatus::InProgress));
        assert_eq!(
            event.metadata_pairs(),
            vec![
                ("count".to_string(), "3".to_string()),
                ("region".to_string(), "us-east-1".to_string()),
            ]
        );
    }

    #[test]
    fn test_severity_and_status_independent() {
        let e = TimelineEvent::new("deploy", at(1, 1), Severity::Error).status(EventStatus::Completed);
        assert_eq!(e.severity.color(), colors::DANGER);
        assert_eq!(e.status.unwrap().color(), colors::SUCCESS);
    }
}
