//! Pie and donut charts

use crate::{
    axis::{ChartLegend, ChartTooltip},
    chartkit::{format_percent, polar, slice_path},
    colors,
    container::titled,
    series::{default_value_text, TooltipContent, TooltipRow},
    theme::ThemeConfig,
};
use cloud_core::{finite_value, percent_of, ChartDatum, SeriesDescriptor, SharedFormatter, ValueFormatter};
use leptos::prelude::*;
use std::f64::consts::TAU;

#[derive(Debug, Clone)]
pub struct PieChartConfig {
    /// Side of the square viewBox
    pub size: f64,
    /// Inner radius as a fraction of the outer radius; 0 draws a full pie
    pub inner_ratio: f64,
    pub show_labels: bool,
    /// Slices below this percentage get no label
    pub min_label_percent: f64,
    pub show_legend: bool,
    pub show_tooltip: bool,
    /// Explicit slice colors, cycled; palette otherwise
    pub colors: Vec<String>,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            size: 300.0,
            inner_ratio: 0.0,
            show_labels: true,
            min_label_percent: 5.0,
            show_legend: true,
            show_tooltip: true,
            colors: Vec::new(),
        }
    }
}

impl PieChartConfig {
    pub fn donut() -> Self {
        Self {
            inner_ratio: 0.6,
            ..Self::default()
        }
    }

    pub fn compact() -> Self {
        Self {
            size: 160.0,
            show_labels: false,
            show_legend: false,
            ..Self::default()
        }
    }

    pub fn with_inner_ratio(mut self, ratio: f64) -> Self {
        self.inner_ratio = ratio.clamp(0.0, 0.95);
        self
    }

    pub fn with_min_label_percent(mut self, percent: f64) -> Self {
        self.min_label_percent = percent;
        self
    }

    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = colors;
        self
    }

    fn slice_color(&self, index: usize) -> String {
        if self.colors.is_empty() {
            colors::palette_color(index).to_string()
        } else {
            self.colors[index % self.colors.len()].clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub label: String,
    pub value: f64,
    /// Share of the total in `[0, 100]`
    pub percent: f64,
    pub start: f64,
    pub end: f64,
    pub path: String,
    pub color: String,
    /// Label anchor, `None` when the slice is under the label threshold
    pub label_at: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub size: f64,
    pub outer: f64,
    pub inner: f64,
    pub total: f64,
    pub slices: Vec<PieSlice>,
}

/// Slice geometry for one series.
///
/// Percentages divide by the plain sum of values, so a zero total yields 0%.
/// Negative values keep their (clamped) percentage but span no angle; angles
/// are shared out among the positive values only.
pub fn pie_layout<D: ChartDatum>(data: &[D], series: &SeriesDescriptor<D::Field>, config: &PieChartConfig) -> PieLayout {
    let values: Vec<(String, f64)> = data
        .iter()
        .filter_map(|d| finite_value(d, series.data_key).map(|v| (d.category(), v)))
        .collect();

    let total: f64 = values.iter().map(|(_, v)| v).sum();
    let positive: f64 = values.iter().map(|(_, v)| v.max(0.0)).sum();

    let size = config.size.max(1.0);
    let center = size / 2.0;
    let outer = (center - 8.0).max(1.0);
    let inner = outer * config.inner_ratio.clamp(0.0, 0.95);
    let label_radius = if inner > 0.0 { (inner + outer) / 2.0 } else { outer * 0.65 };

    let mut angle = 0.0;
    let slices = values
        .into_iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let sweep = if positive > 0.0 { value.max(0.0) / positive * TAU } else { 0.0 };
            let start = angle;
            angle += sweep;
            let percent = percent_of(value, total);
            let label_at = (config.show_labels && sweep > 0.0 && percent >= config.min_label_percent)
                .then(|| polar(center, center, label_radius, start + sweep / 2.0));
            PieSlice {
                index,
                label,
                value,
                percent,
                start,
                end: angle,
                path: slice_path(center, center, outer, inner, start, angle),
                color: config.slice_color(index),
                label_at,
            }
        })
        .collect();

    PieLayout {
        size,
        outer,
        inner,
        total,
        slices,
    }
}

/// `name: value (pct)` for one slice
pub fn slice_tooltip(slice: &PieSlice, formatter: Option<&SharedFormatter>) -> TooltipContent {
    let value = formatter.map_or_else(|| default_value_text(slice.value), |f| f.format(slice.value));
    TooltipContent {
        title: slice.label.clone(),
        rows: vec![TooltipRow {
            color: slice.color.clone(),
            text: format!("{}: {} ({})", slice.label, value, format_percent(slice.percent)),
        }],
    }
}

#[component]
pub fn PieChart<D: ChartDatum>(
    data: Signal<Vec<D>>,
    series: SeriesDescriptor<D::Field>,
    #[prop(optional)] config: Option<PieChartConfig>,
    #[prop(optional)] tooltip_formatter: Option<SharedFormatter>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let show_legend = config.show_legend;
    let show_tooltip = config.show_tooltip;

    let config = StoredValue::new(config);
    let series = StoredValue::new(series);
    let tooltip_formatter = StoredValue::new(tooltip_formatter);
    let hover = RwSignal::new(None::<usize>);

    let layout = Memo::new(move |_| {
        data.with(|d| series.with_value(|s| config.with_value(|c| pie_layout(d, s, c))))
    });

    let plot = move || {
        let theme = ThemeConfig::tracked(dark);
        layout.with(|l| {
            let size = l.size;
            let slices = l
                .slices
                .iter()
                .map(|slice| {
                    let index = slice.index;
                    view! {
                        <path
                            d=slice.path.clone()
                            fill=slice.color.clone()
                            stroke=theme.panel_background
                            stroke-width="1"
                            opacity=move || match hover.get() {
                                Some(i) if i != index => 0.7,
                                _ => 1.0,
                            }
                            on:mouseenter=move |_| hover.set(Some(index))
                        />
                    }
                })
                .collect_view();
            let labels = l
                .slices
                .iter()
                .filter_map(|slice| {
                    slice.label_at.map(|(x, y)| {
                        view! {
                            <text
                                x=x y=y
                                text-anchor="middle"
                                dominant-baseline="middle"
                                fill="#ffffff"
                                font-size="12"
                                pointer-events="none"
                            >
                                {format!("{:.0}%", slice.percent)}
                            </text>
                        }
                    })
                })
                .collect_view();

            view! {
                <svg
                    viewBox=format!("0 0 {} {}", size, size)
                    preserveAspectRatio="xMidYMid meet"
                    style="width: 100%; height: auto; display: block; max-height: 320px;"
                    on:mouseleave=move |_| hover.set(None)
                >
                    <g class="pie-slices">{slices}</g>
                    <g class="pie-labels">{labels}</g>
                </svg>
            }
        })
    };

    let tooltip = move || {
        if !show_tooltip {
            return None;
        }
        let index = hover.get()?;
        let theme = ThemeConfig::tracked(dark);
        layout.with(|l| {
            let slice = l.slices.get(index)?;
            let content = tooltip_formatter.with_value(|f| slice_tooltip(slice, f.as_ref()));
            let (x, _) = polar(l.size / 2.0, l.size / 2.0, l.outer, (slice.start + slice.end) / 2.0);
            Some(view! { <ChartTooltip content=content left_percent={x / l.size * 100.0} theme=theme /> })
        })
    };

    let legend = move || {
        show_legend.then(|| {
            let items = layout.with(|l| l.slices.iter().map(|s| (s.label.clone(), s.color.clone())).collect::<Vec<_>>());
            view! { <ChartLegend items=items theme=ThemeConfig::tracked(dark) /> }
        })
    };

    let chart = view! {
        <div class="chart pie-chart" style="position: relative; width: 100%;">
            {plot}
            {tooltip}
            {legend}
        </div>
    }
    .into_any();

    titled(title, dark, chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_core::{formatter, NamedValue, ValueField};

    fn slices(values: &[(&str, f64)]) -> PieLayout {
        let data: Vec<NamedValue> = values.iter().map(|&(n, v)| NamedValue::new(n, v)).collect();
        pie_layout(&data, &SeriesDescriptor::new(ValueField, "share"), &PieChartConfig::default())
    }

    #[test]
    fn test_percentages_and_angles() {
        let layout = slices(&[("compute", 50.0), ("storage", 30.0), ("network", 20.0)]);
        let pct: Vec<f64> = layout.slices.iter().map(|s| s.percent).collect();
        assert_eq!(pct, vec![50.0, 30.0, 20.0]);
        assert!((layout.slices[2].end - TAU).abs() < 1e-9);
        assert_eq!(layout.slices[1].start, layout.slices[0].end);
    }

    #[test]
    fn test_zero_total_is_zero_percent() {
        let layout = slices(&[("a", 0.0), ("b", 0.0)]);
        assert!(layout.slices.iter().all(|s| s.percent == 0.0 && s.path.is_empty()));
    }

    #[test]
    fn test_negative_slice_has_no_angle() {
        let layout = slices(&[("a", 10.0), ("refund", -5.0)]);
        let refund = &layout.slices[1];
        assert_eq!(refund.start, refund.end);
        assert_eq!(refund.percent, 0.0);
        // the positive slice takes the whole circle
        assert!((layout.slices[0].end - TAU).abs() < 1e-9);
        assert_eq!(layout.slices[0].percent, 100.0);
    }

    #[test]
    fn test_small_slices_hide_label() {
        let layout = slices(&[("big", 97.0), ("tiny", 3.0)]);
        assert!(layout.slices[0].label_at.is_some());
        assert!(layout.slices[1].label_at.is_none());
    }

    #[test]
    fn test_donut_inner_radius() {
        let data = vec![NamedValue::new("a", 1.0)];
        let layout = pie_layout(&data, &SeriesDescriptor::new(ValueField, "v"), &PieChartConfig::donut());
        assert!((layout.inner - layout.outer * 0.6).abs() < 1e-9);
        // full circle donut has two subpaths
        assert_eq!(layout.slices[0].path.matches('M').count(), 2);
    }

    #[test]
    fn test_custom_colors_cycle() {
        let data: Vec<NamedValue> = (0..3).map(|i| NamedValue::new(i.to_string(), 1.0)).collect();
        let config = PieChartConfig::default().with_colors(vec!["#111111".into(), "#222222".into()]);
        let layout = pie_layout(&data, &SeriesDescriptor::new(ValueField, "v"), &config);
        assert_eq!(layout.slices[2].color, "#111111");
    }

    #[test]
    fn test_slice_tooltip_text() {
        let layout = slices(&[("compute", 75.0), ("storage", 25.0)]);
        let plain = slice_tooltip(&layout.slices[0], None);
        assert_eq!(plain.rows[0].text, "compute: 75 (75.0%)");

        let usd = formatter(|v: f64| format!("${v:.2}"));
        let money = slice_tooltip(&layout.slices[1], Some(&usd));
        assert_eq!(money.rows[0].text, "storage: $25.00 (25.0%)");
    }
}
