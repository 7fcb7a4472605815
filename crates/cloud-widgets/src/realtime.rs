//! Live performance monitor fed by the synthetic metric stream

use crate::{
    card_style,
    metric::{metric_card, MetricCard},
};
use cloud_charts::{LineChart, LineChartConfig, ThemeConfig};
use cloud_core::{colors, formatter, ChartDatum, MetricStatus, PercentFormatter, SeriesDescriptor};
use cloud_state::{use_realtime_metrics, FeedConfig, MetricField, MetricPoint};
use leptos::prelude::*;

/// One field across the window, oldest first
pub fn field_values(points: &[MetricPoint], field: MetricField) -> Vec<f64> {
    points.iter().filter_map(|p| p.value(field)).collect()
}

/// Health bucket for a live reading
pub fn field_status(field: MetricField, value: f64) -> MetricStatus {
    let (warn, critical) = match field {
        MetricField::Cpu | MetricField::Memory => (75.0, 90.0),
        MetricField::Latency => (120.0, 200.0),
        MetricField::Network => return MetricStatus::Neutral,
    };
    if value >= critical {
        MetricStatus::Critical
    } else if value >= warn {
        MetricStatus::Warning
    } else {
        MetricStatus::Good
    }
}

/// Change between the last two readings, as a percentage of the earlier one
pub fn last_change(values: &[f64]) -> Option<f64> {
    match values {
        [.., prev, last] if *prev != 0.0 => Some((last - prev) / prev * 100.0),
        _ => None,
    }
}

#[component]
fn LiveMetric(points: Signal<Vec<MetricPoint>>, field: MetricField, dark: Option<Signal<bool>>) -> impl IntoView {
    let values = Memo::new(move |_| points.with(|p| field_values(p, field)));
    let latest = move || values.with(|v| v.last().copied().unwrap_or(0.0));
    let status = Memo::new(move |_| field_status(field, latest()));

    // the accent follows the status, so the card is rebuilt when it changes
    move || {
        metric_card(MetricCard {
            title: field.label().to_string(),
            value: Signal::derive(move || format!("{:.1}", latest())),
            unit: Some(field.unit().trim().to_string()),
            trend: None,
            change: Some(Signal::derive(move || values.with(|v| last_change(v)).unwrap_or(0.0))),
            status: status.get(),
            is_loading: None,
            sparkline: Some(values.into()),
            description: None,
            icon: None,
            provider: None,
            dark,
        })
    }
}

#[component]
pub fn RealtimeMetricsPanel(
    #[prop(optional)] config: Option<FeedConfig>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let metrics = use_realtime_metrics(config.unwrap_or_default());
    let points = metrics.points();
    let collecting = metrics.collecting;

    let usage = vec![
        SeriesDescriptor::new(MetricField::Cpu, "CPU").color(colors::PRIMARY),
        SeriesDescriptor::new(MetricField::Memory, "Memory").color(colors::SUCCESS),
    ];
    let latency = vec![SeriesDescriptor::new(MetricField::Latency, "Latency").color(colors::WARN)];
    let chart_config = LineChartConfig::default().with_dots(false);
    let percent = formatter(PercentFormatter::default());
    let millis = formatter(|v: f64| format!("{:.0} ms", v));

    let toggle_style = move || {
        let theme = ThemeConfig::tracked(dark);
        let color = if collecting.get() { colors::SUCCESS } else { colors::NEUTRAL };
        format!(
            "font-size: 12px; padding: 4px 10px; border-radius: 6px; cursor: pointer; border: 1px solid {}; color: {}; background-color: {};",
            color, color, theme.panel_background
        )
    };

    view! {
        <section class="realtime-panel" style=move || card_style(dark, colors::PRIMARY)>
            <header style="display: flex; align-items: center; justify-content: space-between; margin-bottom: 12px;">
                <span style=move || format!("font-weight: 600; color: {};", ThemeConfig::tracked(dark).text)>
                    "Performance Monitor"
                </span>
                <button class="collect-toggle" style=toggle_style on:click=move |_| metrics.toggle()>
                    {move || if collecting.get() { "Pause collection" } else { "Resume collection" }}
                </button>
            </header>
            <div class="realtime-metrics" style="display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px;">
                {MetricField::all()
                    .iter()
                    .map(|field| view! { <LiveMetric points=points field=*field dark=dark /> })
                    .collect_view()}
            </div>
            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 12px; margin-top: 12px;">
                <LineChart
                    data=points
                    series=usage
                    config=chart_config.clone()
                    tooltip_formatter=percent.clone()
                    axis_formatter=percent
                    title="Resource Usage"
                    dark=dark.unwrap_or_else(|| Signal::stored(false))
                />
                <LineChart
                    data=points
                    series=latency
                    config=chart_config
                    tooltip_formatter=millis.clone()
                    axis_formatter=millis
                    title="Request Latency"
                    dark=dark.unwrap_or_else(|| Signal::stored(false))
                />
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_status_thresholds() {
        assert_eq!(field_status(MetricField::Cpu, 50.0), MetricStatus::Good);
        assert_eq!(field_status(MetricField::Memory, 80.0), MetricStatus::Warning);
        assert_eq!(field_status(MetricField::Cpu, 92.0), MetricStatus::Critical);
        assert_eq!(field_status(MetricField::Latency, 130.0), MetricStatus::Warning);
        assert_eq!(field_status(MetricField::Network, 999.0), MetricStatus::Neutral);
    }

    #[test]
    fn test_last_change() {
        assert_eq!(last_change(&[40.0, 50.0]), Some(25.0));
        assert_eq!(last_change(&[10.0, 0.0, 5.0]), None);
        assert_eq!(last_change(&[5.0]), None);
    }
}
