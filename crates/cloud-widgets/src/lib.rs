//! # cloud-widgets
//!
//! Dashboard cards composed from the chart layer: metric, progress and status
//! widgets, their provider-pinned variants, and the live performance monitor.

pub mod cloud;
pub mod icons;
pub mod metric;
pub mod overview;
pub mod progress;
pub mod realtime;
pub mod status;

pub use cloud::*;
pub use icons::*;
pub use metric::*;
pub use overview::*;
pub use progress::*;
pub use realtime::*;
pub use status::*;

use cloud_charts::ThemeConfig;
use cloud_core::colors;
use leptos::prelude::*;

/// Card shell shared by every widget, with a coloured top edge
pub(crate) fn card_style(dark: Option<Signal<bool>>, accent: &str) -> String {
    let theme = ThemeConfig::tracked(dark);
    format!(
        "background-color: {}; border: 1px solid {}; border-top: 3px solid {}; border-radius: 8px; padding: 16px; color: {};",
        theme.panel_background, theme.border, accent, theme.text
    )
}

/// Placeholder bars shown while a widget is loading
#[component]
pub fn Skeleton(lines: usize, dark: Option<Signal<bool>>) -> impl IntoView {
    let shade = move || colors::with_alpha(ThemeConfig::tracked(dark).text_muted, 0.2);
    (0..lines.max(1))
        .map(|i| {
            let width = if i == 0 { 60 } else { 100 - (i % 3) * 15 };
            view! {
                <div
                    class="skeleton"
                    style=move || format!("height: 12px; margin-top: 10px; border-radius: 4px; width: {}%; background-color: {};", width, shade())
                />
            }
        })
        .collect_view()
}
