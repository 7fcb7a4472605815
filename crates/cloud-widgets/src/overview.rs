//! Overview page composing the chart layer and widgets

use crate::{
    cloud::{CloudMetricWidget, CloudProgressWidget, CloudStatusWidget},
    progress::ProgressSegment,
    realtime::RealtimeMetricsPanel,
    status::StatusItem,
};
use chrono::{Duration, Utc};
use cloud_charts::{
    AreaChart, BarChart, BarChartConfig, GaugeChart, Heatmap, PieChart, PieChartConfig, Timeline, TimelineConfig,
};
use cloud_core::{
    colors, formatter, ChartDatum, CloudProvider, CloudService, ColorRamp, CurrencyFormatter, EventStatus, HeatmapCell,
    MetricStatus, NamedValue, SeriesDescriptor, ServiceStatus, Severity, Threshold, TimelineEvent, Trend, ValueField,
};
use cloud_state::use_app_state;
use leptos::prelude::*;

/// Monthly spend per provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSpend {
    pub month: String,
    pub aws: f64,
    pub azure: f64,
    pub gcp: Option<f64>,
}

impl ChartDatum for ProviderSpend {
    type Field = CloudProvider;

    fn category(&self) -> String {
        self.month.clone()
    }

    fn value(&self, provider: CloudProvider) -> Option<f64> {
        match provider {
            CloudProvider::Aws => Some(self.aws),
            CloudProvider::Azure => Some(self.azure),
            CloudProvider::Gcp => self.gcp,
        }
    }
}

fn spend() -> Vec<ProviderSpend> {
    [
        ("Jan", 4200.0, 2100.0, None),
        ("Feb", 4550.0, 2250.0, Some(640.0)),
        ("Mar", 4380.0, 2600.0, Some(910.0)),
        ("Apr", 4900.0, 2480.0, Some(1180.0)),
        ("May", 5120.0, 2710.0, Some(1320.0)),
        ("Jun", 5340.0, 2890.0, Some(1475.0)),
    ]
    .into_iter()
    .map(|(month, aws, azure, gcp)| ProviderSpend {
        month: month.to_string(),
        aws,
        azure,
        gcp,
    })
    .collect()
}

fn provider_series(stack: Option<&str>) -> Vec<SeriesDescriptor<CloudProvider>> {
    CloudProvider::all()
        .iter()
        .map(|p| {
            let series = SeriesDescriptor::new(*p, p.label()).color(p.brand_color());
            match stack {
                Some(id) => series.stack(id),
                None => series,
            }
        })
        .collect()
}

fn service_share() -> Vec<NamedValue> {
    vec![
        NamedValue::new("Compute", 5340.0),
        NamedValue::new("Storage", 1810.0),
        NamedValue::new("Database", 1420.0),
        NamedValue::new("Network", 760.0),
        NamedValue::new("Analytics", 335.0),
    ]
}

fn request_heatmap() -> Vec<HeatmapCell> {
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri"];
    let hours = ["00", "04", "08", "12", "16", "20"];
    days.iter()
        .enumerate()
        .flat_map(|(d, day)| {
            hours.iter().enumerate().map(move |(h, hour)| {
                let load = 20.0 + ((d * 7 + h * 13) % 17) as f64 * 5.0 + if (2..5).contains(&h) { 30.0 } else { 0.0 };
                HeatmapCell::new(*hour, *day, load)
            })
        })
        .collect()
}

fn recent_events() -> Vec<TimelineEvent> {
    let now = Utc::now();
    vec![
        TimelineEvent::new("Autoscaling group expanded", now - Duration::minutes(12), Severity::Info)
            .description("web-tier scaled from 4 to 6 instances")
            .status(EventStatus::Completed)
            .duration(95)
            .meta("region", "us-east-1"),
        TimelineEvent::new("Database failover", now - Duration::hours(3), Severity::Warning)
            .user("ops-bot")
            .status(EventStatus::Completed)
            .duration(240),
        TimelineEvent::new("Deploy api v2.14.0", now - Duration::hours(26), Severity::Success)
            .user("release")
            .status(EventStatus::Completed)
            .duration(610)
            .meta("commit", "9f2c1e7"),
        TimelineEvent::new("Budget alert", now - Duration::hours(30), Severity::Error)
            .description("Monthly spend passed 90% of budget")
            .status(EventStatus::Pending),
    ]
}

fn storage_segments() -> Vec<ProgressSegment> {
    vec![
        ProgressSegment::new("Objects", 2.4, colors::PRIMARY),
        ProgressSegment::new("Snapshots", 1.1, colors::SUCCESS),
        ProgressSegment::new("Logs", 0.6, colors::WARN),
    ]
}

fn services() -> Vec<StatusItem> {
    vec![
        StatusItem::new("api-gateway", ServiceStatus::Online),
        StatusItem::new("orders-db", ServiceStatus::Warning).detail("replica lag 4s"),
        StatusItem::new("cdn-edge", ServiceStatus::Online),
        StatusItem::new("batch-workers", ServiceStatus::Maintenance),
    ]
}

#[component]
pub fn Overview() -> impl IntoView {
    let state = use_app_state();
    let dark = state.dark();
    let loading = state.loading;

    let usd = formatter(CurrencyFormatter::default());
    let spend = Signal::stored(spend());

    view! {
        <div class="overview">
            <header class="overview-header" style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;">
                <h1 style="margin: 0; font-size: 20px;">"Cloud Overview"</h1>
                <div style="display: flex; gap: 8px;">
                    <button class="btn" on:click=move |_| state.toggle_loading()>
                        {move || if loading.get() { "Show data" } else { "Show loading" }}
                    </button>
                    <button class="btn" on:click=move |_| state.toggle_theme()>
                        {move || format!("Theme: {}", state.ui.get().theme.toggle().label())}
                    </button>
                </div>
            </header>

            <section class="overview-widgets" style="display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px;">
                <CloudMetricWidget
                    provider=CloudProvider::Aws
                    service=CloudService::Compute
                    title="Running instances"
                    value="128"
                    trend=Trend::Up
                    change=4.8
                    status=MetricStatus::Good
                    is_loading=loading
                    sparkline=vec![96.0, 104.0, 110.0, 107.0, 118.0, 122.0, 128.0]
                    dark=dark
                />
                <CloudMetricWidget
                    provider=CloudProvider::Gcp
                    service=CloudService::Cost
                    title="Month-to-date spend"
                    value="$9,705"
                    change=-2.1
                    status=MetricStatus::Warning
                    description="of $11,000 budget"
                    is_loading=loading
                    dark=dark
                />
                <CloudProgressWidget
                    provider=CloudProvider::Azure
                    service=CloudService::Storage
                    title="Blob storage"
                    value=4.1
                    max=5.0
                    unit=" TB"
                    segments=storage_segments()
                    is_loading=loading
                    dark=dark
                />
                <CloudStatusWidget
                    provider=CloudProvider::Aws
                    service=CloudService::Network
                    title="Service health"
                    items=services()
                    is_loading=loading
                    dark=dark
                />
            </section>

            <section class="overview-charts" style="display: grid; grid-template-columns: repeat(auto-fit, minmax(420px, 1fr)); gap: 16px; margin-top: 16px;">
                <BarChart
                    data=spend
                    series=provider_series(Some("spend"))
                    config=BarChartConfig::default()
                    tooltip_formatter=usd.clone()
                    axis_formatter=formatter(cloud_core::CompactNumberFormatter)
                    title="Spend by provider"
                    dark=dark
                />
                <AreaChart
                    data=spend
                    series=provider_series(None)
                    tooltip_formatter=usd.clone()
                    title="Spend trend"
                    dark=dark
                />
                <PieChart
                    data=Signal::stored(service_share())
                    series=SeriesDescriptor::new(ValueField, "Spend")
                    config=PieChartConfig::donut()
                    tooltip_formatter=usd
                    title="Spend by service"
                    dark=dark
                />
                <GaugeChart
                    value=72.0
                    thresholds=vec![
                        Threshold::new(0.0, colors::SUCCESS).label("Healthy"),
                        Threshold::new(70.0, colors::WARN).label("Busy"),
                        Threshold::new(90.0, colors::DANGER).label("Saturated"),
                    ]
                    label="Cluster CPU"
                    unit="%"
                    title="Capacity"
                    dark=dark
                />
                <Heatmap
                    cells=request_heatmap()
                    ramp=ColorRamp::Thermal
                    title="Requests by hour"
                    dark=dark
                />
                <Timeline
                    events=recent_events()
                    config=TimelineConfig::default().grouped(true)
                    title="Recent activity"
                    dark=dark
                />
            </section>

            <section style="margin-top: 16px;">
                <RealtimeMetricsPanel dark=dark />
            </section>

            <footer class="overview-footer">
                <StatusBar />
            </footer>
        </div>
    }
}

#[component]
fn StatusBar() -> impl IntoView {
    let state = use_app_state();
    let ui = state.ui;
    let loading = state.loading;

    view! {
        <div class="status-bar" style="display: flex; justify-content: space-between; font-size: 12px; opacity: 0.7;">
            <div class="sb-state">
                <span>{move || format!("{} theme", ui.get().theme.label())}</span>
                {move || loading.get().then(|| view! { <span class="sb-loading">" · loading"</span> })}
            </div>

            <div class="sb-version">
                <span>"v0.1.0"</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_rows_expose_provider_fields() {
        let rows = spend();
        assert_eq!(rows[0].value(CloudProvider::Gcp), None);
        assert_eq!(rows[1].value(CloudProvider::Azure), Some(2250.0));
        assert_eq!(rows[5].category(), "Jun");
    }

    #[test]
    fn test_provider_series_stacking() {
        let stacked = provider_series(Some("spend"));
        assert_eq!(stacked.len(), 3);
        assert!(stacked.iter().all(|s| s.stack_id.as_deref() == Some("spend")));
        assert!(provider_series(None).iter().all(|s| s.stack_id.is_none()));
    }

    #[test]
    fn test_heatmap_grid_is_complete() {
        assert_eq!(request_heatmap().len(), 30);
    }
}
