//! Single-value metric card

use crate::{card_style, icons::{Icon, IconBadge, ProviderBadge}, Skeleton};
use cloud_charts::{Sparkline, SparklineConfig, ThemeConfig};
use cloud_core::{colors, CloudProvider, MetricStatus, Trend};
use leptos::prelude::*;

/// Explicit trend wins, otherwise derive it from the sign of the change
pub fn resolve_trend(trend: Option<Trend>, change: Option<f64>) -> Option<Trend> {
    trend.or_else(|| change.filter(|c| c.is_finite()).map(Trend::from_change))
}

pub fn trend_color(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => colors::SUCCESS,
        Trend::Down => colors::DANGER,
        Trend::Neutral => colors::NEUTRAL,
    }
}

/// `▲ 12.5%`; the arrow carries the sign
pub fn trend_label(trend: Trend, change: Option<f64>) -> String {
    match change.filter(|c| c.is_finite()) {
        Some(change) => format!("{} {:.1}%", trend.arrow(), change.abs()),
        None => trend.arrow().to_string(),
    }
}

/// Everything a metric card renders; shared by the plain and cloud variants
#[derive(Clone)]
pub struct MetricCard {
    pub title: String,
    pub value: Signal<String>,
    pub unit: Option<String>,
    pub trend: Option<Trend>,
    /// Percentage change shown next to the trend arrow
    pub change: Option<Signal<f64>>,
    pub status: MetricStatus,
    pub is_loading: Option<Signal<bool>>,
    pub sparkline: Option<Signal<Vec<f64>>>,
    pub description: Option<String>,
    pub icon: Option<Icon>,
    pub provider: Option<CloudProvider>,
    pub dark: Option<Signal<bool>>,
}

pub fn metric_card(card: MetricCard) -> impl IntoView {
    let MetricCard {
        title,
        value,
        unit,
        trend,
        change,
        status,
        is_loading,
        sparkline,
        description,
        icon,
        provider,
        dark,
    } = card;
    let loading = move || is_loading.is_some_and(|l| l.get());
    let accent = status.color();
    let unit = StoredValue::new(unit);
    let description = StoredValue::new(description);

    let header = move || {
        let theme = ThemeConfig::tracked(dark);
        view! {
            <div class="metric-header" style="display: flex; align-items: center; justify-content: space-between; gap: 8px;">
                <span class="metric-title" style=format!("font-size: 13px; color: {};", theme.text_muted)>
                    {title.clone()}
                </span>
                <span style="display: inline-flex; gap: 6px; align-items: center;">
                    {provider.map(|p| view! { <ProviderBadge provider=p /> })}
                    {icon.map(|i| view! { <IconBadge icon=i color=accent /> })}
                </span>
            </div>
        }
    };

    let trend_view = move || {
        let change = change.map(|c| c.get());
        let trend = resolve_trend(trend, change)?;
        Some(view! {
            <span class=format!("metric-trend {}", trend.css_class()) style=format!("font-size: 12px; color: {};", trend_color(trend))>
                {trend_label(trend, change)}
            </span>
        })
    };

    let body = move || {
        if loading() {
            return view! { <Skeleton lines=2 dark=dark /> }.into_any();
        }
        let theme = ThemeConfig::tracked(dark);
        view! {
            <div class="metric-value" style="display: flex; align-items: baseline; gap: 4px; margin-top: 8px;">
                <span style=format!("font-size: 28px; font-weight: 700; color: {};", theme.text)>{move || value.get()}</span>
                {unit.get_value().map(|u| view! { <span style=format!("font-size: 14px; color: {};", theme.text_muted)>{u}</span> })}
            </div>
            <div class="metric-footer" style="display: flex; align-items: center; justify-content: space-between; margin-top: 4px;">
                {trend_view}
                {description.get_value().map(|d| view! { <span style=format!("font-size: 12px; color: {};", theme.text_muted)>{d}</span> })}
            </div>
            {sparkline.map(|values| {
                let config = SparklineConfig {
                    height: 28.0,
                    ..SparklineConfig::default()
                };
                view! {
                    <div class="metric-sparkline" style="height: 28px; margin-top: 8px;">
                        <Sparkline values=values config=config color=accent />
                    </div>
                }
            })}
        }
        .into_any()
    };

    view! {
        <div class=format!("widget metric-widget {}", status.css_class()) style=move || card_style(dark, accent)>
            {header}
            {body}
        </div>
    }
}

#[component]
pub fn MetricWidget(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] unit: Option<String>,
    #[prop(optional)] trend: Option<Trend>,
    #[prop(optional, into)] change: Option<Signal<f64>>,
    #[prop(optional)] status: MetricStatus,
    #[prop(optional, into)] is_loading: Option<Signal<bool>>,
    #[prop(optional, into)] sparkline: Option<Signal<Vec<f64>>>,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional)] icon: Option<Icon>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    metric_card(MetricCard {
        title,
        value,
        unit,
        trend,
        change,
        status,
        is_loading,
        sparkline,
        description,
        icon,
        provider: None,
        dark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_resolution() {
        assert_eq!(resolve_trend(Some(Trend::Down), Some(4.0)), Some(Trend::Down));
        assert_eq!(resolve_trend(None, Some(4.0)), Some(Trend::Up));
        assert_eq!(resolve_trend(None, Some(0.0)), Some(Trend::Neutral));
        assert_eq!(resolve_trend(None, Some(f64::NAN)), None);
        assert_eq!(resolve_trend(None, None), None);
    }

    #[test]
    fn test_trend_label() {
        assert_eq!(trend_label(Trend::Down, Some(-3.24)), "▼ 3.2%");
        assert_eq!(trend_label(Trend::Up, Some(12.0)), "▲ 12.0%");
        assert_eq!(trend_label(Trend::Neutral, None), "●");
    }

    #[test]
    fn test_trend_colors() {
        assert_eq!(trend_color(Trend::Up), colors::SUCCESS);
        assert_eq!(trend_color(Trend::Down), colors::DANGER);
    }
}
