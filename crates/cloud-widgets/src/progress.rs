//! Progress bar card with optional breakdown segments

use crate::{card_style, icons::{Icon, IconBadge, ProviderBadge}, Skeleton};
use cloud_charts::ThemeConfig;
use cloud_core::{colors, percent_of, CloudProvider, MetricStatus};
use leptos::prelude::*;

/// One labelled share shown under the bar. Segments are display data only and
/// are not checked against the total.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSegment {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl ProgressSegment {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

/// Fill of the bar in `[0, 100]`; a non-positive max yields 0
pub fn progress_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    percent_of(value, max)
}

/// Bar colour by fill level when no status is forced
pub fn progress_status(percent: f64) -> MetricStatus {
    if percent >= 90.0 {
        MetricStatus::Critical
    } else if percent >= 75.0 {
        MetricStatus::Warning
    } else {
        MetricStatus::Good
    }
}

#[derive(Clone)]
pub struct ProgressCard {
    pub title: String,
    pub value: Signal<f64>,
    pub max: f64,
    pub unit: Option<String>,
    pub segments: Vec<ProgressSegment>,
    /// Forced colour; otherwise derived from the fill level
    pub status: Option<MetricStatus>,
    pub is_loading: Option<Signal<bool>>,
    pub icon: Option<Icon>,
    pub provider: Option<CloudProvider>,
    pub dark: Option<Signal<bool>>,
}

pub fn progress_card(card: ProgressCard) -> impl IntoView {
    let ProgressCard {
        title,
        value,
        max,
        unit,
        segments,
        status,
        is_loading,
        icon,
        provider,
        dark,
    } = card;
    let unit = StoredValue::new(unit.unwrap_or_default());
    let segments = StoredValue::new(segments);
    let percent = Memo::new(move |_| progress_percent(value.get(), max));
    let color = move || status.unwrap_or_else(|| progress_status(percent.get())).color();

    let breakdown = move || {
        let theme = ThemeConfig::tracked(dark);
        segments.with_value(|segments| {
            segments
                .iter()
                .map(|s| {
                    let share = progress_percent(s.value, max);
                    let unit = unit.get_value();
                    view! {
                        <li style="display: flex; align-items: center; gap: 6px; font-size: 12px;">
                            <span style=format!("width: 8px; height: 8px; border-radius: 2px; background-color: {};", s.color) />
                            <span style=format!("flex: 1; color: {};", theme.text_muted)>{s.label.clone()}</span>
                            <span style=format!("color: {};", theme.text)>{format!("{}{}", s.value, unit)}</span>
                            <span style=format!("width: 48px; text-align: right; color: {};", theme.text_muted)>
                                {format!("{:.0}%", share)}
                            </span>
                        </li>
                    }
                })
                .collect_view()
        })
    };

    let body = move || {
        if is_loading.is_some_and(|l| l.get()) {
            return view! { <Skeleton lines=3 dark=dark /> }.into_any();
        }
        let theme = ThemeConfig::tracked(dark);
        let track = colors::with_alpha(theme.text_muted, 0.2);
        view! {
            <div style="display: flex; align-items: baseline; justify-content: space-between; margin: 8px 0 6px;">
                <span style=format!("font-size: 22px; font-weight: 700; color: {};", theme.text)>
                    {move || format!("{}{}", value.get(), unit.get_value())}
                    <span style=format!("font-size: 13px; font-weight: 400; color: {};", theme.text_muted)>
                        {format!(" / {}{}", max, unit.get_value())}
                    </span>
                </span>
                <span style=move || format!("font-size: 13px; font-weight: 600; color: {};", color())>
                    {move || format!("{:.1}%", percent.get())}
                </span>
            </div>
            <div
                class="progress-track"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=move || format!("{:.0}", percent.get())
                style=format!("height: 8px; border-radius: 9999px; overflow: hidden; background-color: {};", track)
            >
                <div
                    class="progress-fill"
                    style=move || format!("height: 100%; width: {}%; background-color: {}; transition: width 0.3s;", percent.get(), color())
                />
            </div>
            <ul class="progress-segments" style="list-style: none; margin: 8px 0 0; padding: 0; display: grid; gap: 4px;">
                {breakdown}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="widget progress-widget" style=move || card_style(dark, color())>
            <div style="display: flex; align-items: center; justify-content: space-between;">
                <span style=move || format!("font-size: 13px; color: {};", ThemeConfig::tracked(dark).text_muted)>{title}</span>
                <span style="display: inline-flex; gap: 6px; align-items: center;">
                    {provider.map(|p| view! { <ProviderBadge provider=p /> })}
                    {icon.map(|i| view! { <IconBadge icon=i /> })}
                </span>
            </div>
            {body}
        </div>
    }
}

#[component]
pub fn ProgressWidget(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<f64>,
    #[prop(default = 100.0)] max: f64,
    #[prop(optional, into)] unit: Option<String>,
    #[prop(optional)] segments: Vec<ProgressSegment>,
    #[prop(optional)] status: Option<MetricStatus>,
    #[prop(optional, into)] is_loading: Option<Signal<bool>>,
    #[prop(optional)] icon: Option<Icon>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    progress_card(ProgressCard {
        title,
        value,
        max,
        unit,
        segments,
        status,
        is_loading,
        icon,
        provider: None,
        dark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_clamped() {
        assert_eq!(progress_percent(50.0, 200.0), 25.0);
        assert_eq!(progress_percent(150.0, 100.0), 100.0);
        assert_eq!(progress_percent(-5.0, 100.0), 0.0);
    }

    #[test]
    fn test_non_positive_max_is_zero() {
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
        assert_eq!(progress_percent(10.0, -4.0), 0.0);
    }

    #[test]
    fn test_status_by_fill() {
        assert_eq!(progress_status(40.0), MetricStatus::Good);
        assert_eq!(progress_status(80.0), MetricStatus::Warning);
        assert_eq!(progress_status(95.0), MetricStatus::Critical);
    }

    #[test]
    fn test_segments_not_validated_against_total() {
        let segments = vec![ProgressSegment::new("a", 80.0, "#111"), ProgressSegment::new("b", 70.0, "#222")];
        let shares: Vec<f64> = segments.iter().map(|s| progress_percent(s.value, 100.0)).collect();
        assert_eq!(shares, vec![80.0, 70.0]);
    }
}
