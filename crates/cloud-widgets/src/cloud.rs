//! Provider-pinned variants of the metric, progress and status cards.
//!
//! Each one fixes a `(provider, service)` pair, which selects the header icon
//! and provider badge, and otherwise renders the plain card unchanged.

use crate::{
    icons::resolve_icon,
    metric::{metric_card, MetricCard},
    progress::{progress_card, ProgressCard, ProgressSegment},
    status::{status_card, StatusCard, StatusItem},
};
use cloud_core::{CloudProvider, CloudService, MetricStatus, Trend};
use leptos::prelude::*;

#[component]
pub fn CloudMetricWidget(
    provider: CloudProvider,
    service: CloudService,
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] unit: Option<String>,
    #[prop(optional)] trend: Option<Trend>,
    #[prop(optional, into)] change: Option<Signal<f64>>,
    #[prop(optional)] status: MetricStatus,
    #[prop(optional, into)] is_loading: Option<Signal<bool>>,
    #[prop(optional, into)] sparkline: Option<Signal<Vec<f64>>>,
    #[prop(optional, into)] description: Option<String>,
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
        icon: Some(resolve_icon(service)),
        provider: Some(provider),
        dark,
    })
}

#[component]
pub fn CloudProgressWidget(
    provider: CloudProvider,
    service: CloudService,
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<f64>,
    #[prop(default = 100.0)] max: f64,
    #[prop(optional, into)] unit: Option<String>,
    #[prop(optional)] segments: Vec<ProgressSegment>,
    #[prop(optional)] status: Option<MetricStatus>,
    #[prop(optional, into)] is_loading: Option<Signal<bool>>,
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
        icon: Some(resolve_icon(service)),
        provider: Some(provider),
        dark,
    })
}

#[component]
pub fn CloudStatusWidget(
    provider: CloudProvider,
    service: CloudService,
    #[prop(into)] title: String,
    #[prop(into)] items: Signal<Vec<StatusItem>>,
    #[prop(optional, into)] is_loading: Option<Signal<bool>>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    status_card(StatusCard {
        title,
        items,
        is_loading,
        icon: Some(resolve_icon(service)),
        provider: Some(provider),
        dark,
    })
}
