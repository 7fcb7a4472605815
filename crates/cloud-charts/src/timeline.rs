//! Vertical activity timeline

use crate::{container::titled, theme::ThemeConfig};
use cloud_core::{
    colors, group_events, sort_newest_first, DateFormatter, EventGroup, PatternDateFormatter, SharedDateFormatter,
    TimelineEvent,
};
use leptos::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TimelineConfig {
    pub group_by_date: bool,
    /// Keep only the newest `n` events
    pub max_events: Option<usize>,
    pub show_user: bool,
    pub show_metadata: bool,
    pub show_duration: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            group_by_date: false,
            max_events: None,
            show_user: true,
            show_metadata: true,
            show_duration: true,
        }
    }
}

impl TimelineConfig {
    pub fn compact() -> Self {
        Self {
            max_events: Some(5),
            show_metadata: false,
            ..Self::default()
        }
    }

    pub fn grouped(mut self, group: bool) -> Self {
        self.group_by_date = group;
        self
    }

    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = Some(max);
        self
    }
}

/// Sort newest first, truncate, then bucket when grouping is on.
///
/// Without grouping the result is a single bucket with an empty key.
pub fn timeline_groups(events: &[TimelineEvent], config: &TimelineConfig, formatter: &dyn DateFormatter) -> Vec<EventGroup> {
    let mut sorted = sort_newest_first(events);
    if let Some(max) = config.max_events {
        sorted.truncate(max);
    }
    if sorted.is_empty() {
        return Vec::new();
    }
    if config.group_by_date {
        group_events(&sorted, formatter)
    } else {
        vec![EventGroup {
            key: String::new(),
            events: sorted,
        }]
    }
}

#[component]
fn TimelineItem(event: TimelineEvent, config: TimelineConfig, time: String, theme: ThemeConfig) -> impl IntoView {
    let severity = event.severity;
    let status = event.status.map(|s| {
        view! {
            <span
                class=format!("timeline-badge {}", s.badge_class())
                style=format!(
                    "margin-left: 8px; padding: 1px 8px; border-radius: 9999px; font-size: 11px; color: {}; border: 1px solid {};",
                    s.color(),
                    s.color()
                )
            >
                {s.label()}
            </span>
        }
    });
    let user = config.show_user.then_some(event.user.clone()).flatten();
    let duration = config.show_duration.then(|| event.duration_str()).flatten();
    let details = (user.is_some() || duration.is_some()).then(|| {
        let parts: Vec<String> = [user.map(|u| format!("by {}", u)), duration].into_iter().flatten().collect();
        view! {
            <div class="timeline-details" style=format!("font-size: 12px; color: {};", theme.text_muted)>
                {parts.join(" · ")}
            </div>
        }
    });
    let chip_bg = colors::with_alpha(theme.text_muted, 0.15);
    let chips = (config.show_metadata && !event.metadata.is_empty()).then(|| {
        event
            .metadata_pairs()
            .into_iter()
            .map(|(key, value)| {
                view! {
                    <span
                        class="timeline-chip"
                        style=format!("font-size: 11px; padding: 1px 6px; border-radius: 4px; background-color: {};", chip_bg)
                    >
                        {format!("{}: {}", key, value)}
                    </span>
                }
            })
            .collect_view()
    });

    view! {
        <li class=format!("timeline-item {}", severity.css_class()) style="display: flex; gap: 12px; padding: 8px 0;">
            <span
                class="timeline-icon"
                style=format!(
                    "flex: none; width: 24px; height: 24px; border-radius: 9999px; display: inline-flex; align-items: center; justify-content: center; color: #ffffff; font-size: 12px; background-color: {};",
                    severity.color()
                )
            >
                {severity.icon()}
            </span>
            <div class="timeline-body" style="flex: 1; min-width: 0;">
                <div style="display: flex; align-items: center; justify-content: space-between;">
                    <div>
                        <span class="timeline-title" style=format!("font-weight: 500; color: {};", theme.text)>
                            {event.title.clone()}
                        </span>
                        {status}
                    </div>
                    <time style=format!("font-size: 12px; color: {};", theme.text_muted)>{time}</time>
                </div>
                {event.description.clone().map(|d| {
                    view! { <p class="timeline-description" style=format!("margin: 2px 0; font-size: 13px; color: {};", theme.text_muted)>{d}</p> }
                })}
                {details}
                <div class="timeline-chips" style="display: flex; flex-wrap: wrap; gap: 4px; margin-top: 4px;">
                    {chips}
                </div>
            </div>
        </li>
    }
}

#[component]
pub fn Timeline(
    #[prop(into)] events: Signal<Vec<TimelineEvent>>,
    #[prop(optional)] config: Option<TimelineConfig>,
    #[prop(optional)] date_formatter: Option<SharedDateFormatter>,
    #[prop(optional)] time_formatter: Option<SharedDateFormatter>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let config = StoredValue::new(config.unwrap_or_default());
    let date_formatter = StoredValue::new(date_formatter.unwrap_or_else(|| Arc::new(PatternDateFormatter::DATE)));
    let time_formatter = StoredValue::new(time_formatter.unwrap_or_else(|| Arc::new(PatternDateFormatter::TIME)));

    let groups = Memo::new(move |_| {
        events.with(|e| config.with_value(|c| date_formatter.with_value(|f| timeline_groups(e, c, f.as_ref()))))
    });

    let body = move || {
        let theme = ThemeConfig::tracked(dark);
        let config = config.get_value();
        let groups = groups.get();
        if groups.is_empty() {
            return view! {
                <p class="timeline-empty" style=format!("font-size: 13px; color: {};", theme.text_muted)>
                    "No events"
                </p>
            }
            .into_any();
        }

        groups
            .into_iter()
            .map(|group| {
                let heading = (!group.key.is_empty()).then(|| {
                    view! {
                        <h4 class="timeline-date" style=format!("margin: 8px 0 4px; font-size: 12px; font-weight: 600; color: {};", theme.text_muted)>
                            {group.key.clone()}
                        </h4>
                    }
                });
                let items = group
                    .events
                    .into_iter()
                    .map(|event| {
                        let time = time_formatter.with_value(|f| f.format(&event.timestamp));
                        view! { <TimelineItem event=event config=config.clone() time=time theme=theme.clone() /> }
                    })
                    .collect_view();
                view! {
                    <section class="timeline-group">
                        {heading}
                        <ul class="timeline-list" style="list-style: none; margin: 0; padding: 0;">{items}</ul>
                    </section>
                }
            })
            .collect_view()
            .into_any()
    };

    let chart = view! { <div class="timeline">{body}</div> }.into_any();

    titled(title, dark, chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cloud_core::Severity;

    fn at(day: u32, hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn events() -> Vec<TimelineEvent> {
        vec![
            TimelineEvent::new("deploy", at(4, 9), Severity::Success),
            TimelineEvent::new("alarm", at(5, 14), Severity::Error),
            TimelineEvent::new("scale-out", at(4, 18), Severity::Info),
            TimelineEvent::new("backup", at(3, 1), Severity::Default),
        ]
    }

    fn titles(groups: &[EventGroup]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|g| g.events.iter().map(|e| e.title.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_ungrouped_single_bucket_newest_first() {
        let groups = timeline_groups(&events(), &TimelineConfig::default(), &PatternDateFormatter::DATE);
        assert_eq!(groups.len(), 1);
        assert_eq!(titles(&groups), vec![vec!["alarm", "scale-out", "deploy", "backup"]]);
    }

    #[test]
    fn test_grouped_by_day() {
        let config = TimelineConfig::default().grouped(true);
        let groups = timeline_groups(&events(), &config, &PatternDateFormatter::DATE);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Mar 05, 2025", "Mar 04, 2025", "Mar 03, 2025"]);
        assert_eq!(titles(&groups)[1], vec!["scale-out", "deploy"]);
    }

    #[test]
    fn test_max_events_after_sorting() {
        let config = TimelineConfig::default().with_max_events(2);
        let groups = timeline_groups(&events(), &config, &PatternDateFormatter::DATE);
        assert_eq!(titles(&groups), vec![vec!["alarm", "scale-out"]]);
    }

    #[test]
    fn test_custom_formatter_sets_granularity() {
        let by_hour = |ts: &chrono::DateTime<Utc>| ts.format("%d %H").to_string();
        let config = TimelineConfig::default().grouped(true);
        let groups = timeline_groups(&events(), &config, &by_hour);
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn test_empty_events() {
        assert!(timeline_groups(&[], &TimelineConfig::default(), &PatternDateFormatter::DATE).is_empty());
    }
}
