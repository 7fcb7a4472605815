//! Area chart with optional cumulative stacking

use crate::{
    axis::{cartesian_axes, hover_guide, pointer_in_viewbox, ChartLegend, ChartTooltip},
    chartkit::{area_path, band_path, line_path},
    container::titled,
    series::{
        categories, legend_items, resolve_series, segments, stack_series, stacked_extent, tooltip_content,
        CartesianConfig, CartesianFrame, ResolvedSeries,
    },
    theme::ThemeConfig,
};
use cloud_core::{ChartDatum, SeriesDescriptor, SharedFormatter};
use leptos::prelude::*;

#[derive(Debug, Clone)]
pub struct AreaChartConfig {
    pub cartesian: CartesianConfig,
    pub fill_opacity: f64,
    pub show_line: bool,
}

impl Default for AreaChartConfig {
    fn default() -> Self {
        Self {
            cartesian: CartesianConfig::default(),
            fill_opacity: 0.3,
            show_line: true,
        }
    }
}

impl AreaChartConfig {
    pub fn compact() -> Self {
        Self {
            cartesian: CartesianConfig::compact(),
            fill_opacity: 0.2,
            show_line: true,
        }
    }

    pub fn with_cartesian(mut self, cartesian: CartesianConfig) -> Self {
        self.cartesian = cartesian;
        self
    }

    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// Filled region(s) and outline(s) of one series
#[derive(Debug, Clone, PartialEq)]
pub struct AreaMark {
    pub name: String,
    pub color: String,
    pub fills: Vec<String>,
    pub outlines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaLayout {
    pub frame: CartesianFrame,
    pub categories: Vec<String>,
    pub series: Vec<ResolvedSeries>,
    pub areas: Vec<AreaMark>,
}

/// Stacked series form one continuous band, a gap adds zero to the stack.
/// Unstacked series fill down to zero and break at gaps.
pub fn area_layout<D: ChartDatum>(
    data: &[D],
    series: &[SeriesDescriptor<D::Field>],
    config: &AreaChartConfig,
) -> AreaLayout {
    let categories = categories(data);
    let resolved = resolve_series(data, series);
    let stacked = stack_series(&resolved, categories.len());
    let frame = CartesianFrame::new(
        config.cartesian.dimensions(),
        categories.len(),
        stacked_extent(&stacked),
        config.cartesian.y_ticks,
        0.0,
    );
    let zero = frame.y_of(0.0);

    let areas = resolved
        .iter()
        .zip(&stacked)
        .map(|(s, values)| {
            let (fills, outlines) = if s.stack_id.is_some() {
                let upper: Vec<(f64, f64)> = values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (frame.x.scale_center(i), frame.y_of(v.upper)))
                    .collect();
                let lower: Vec<(f64, f64)> = values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (frame.x.scale_center(i), frame.y_of(v.lower)))
                    .collect();
                if upper.is_empty() {
                    (Vec::new(), Vec::new())
                } else {
                    (vec![band_path(&upper, &lower)], vec![line_path(&upper)])
                }
            } else {
                let points: Vec<Option<(f64, f64)>> = s
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| v.map(|v| (frame.x.scale_center(i), frame.y_of(v))))
                    .collect();
                let runs = segments(&points);
                (
                    runs.iter().map(|run| area_path(run, zero)).collect(),
                    runs.iter().map(|run| line_path(run)).collect(),
                )
            };
            AreaMark {
                name: s.name.clone(),
                color: s.color.clone(),
                fills,
                outlines,
            }
        })
        .collect();

    tracing::debug!("Area layout: {} categories, {} series", categories.len(), resolved.len());

    AreaLayout {
        frame,
        categories,
        series: resolved,
        areas,
    }
}

#[component]
pub fn AreaChart<D: ChartDatum>(
    data: Signal<Vec<D>>,
    series: Vec<SeriesDescriptor<D::Field>>,
    #[prop(optional)] config: Option<AreaChartConfig>,
    #[prop(optional)] tooltip_formatter: Option<SharedFormatter>,
    #[prop(optional)] axis_formatter: Option<SharedFormatter>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let show_grid = config.cartesian.show_grid;
    let show_legend = config.cartesian.show_legend;
    let show_tooltip = config.cartesian.show_tooltip;
    let show_line = config.show_line;
    let fill_opacity = config.fill_opacity;

    let config = StoredValue::new(config);
    let series = StoredValue::new(series);
    let tooltip_formatter = StoredValue::new(tooltip_formatter);
    let axis_formatter = StoredValue::new(axis_formatter);
    let hover = RwSignal::new(None::<usize>);

    let layout = Memo::new(move |_| {
        data.with(|d| series.with_value(|s| config.with_value(|c| area_layout(d, s, c))))
    });

    let on_move = move |ev: web_sys::MouseEvent| {
        let index = layout.with_untracked(|l| {
            pointer_in_viewbox(&ev, l.frame.dims.width, l.frame.dims.height).and_then(|(x, _)| l.frame.category_at(x))
        });
        if hover.get_untracked() != index {
            hover.set(index);
        }
    };

    let guide = move || {
        let index = hover.get()?;
        let theme = ThemeConfig::tracked(dark);
        Some(layout.with(|l| hover_guide(&l.frame, index, &theme)))
    };

    let plot = move || {
        let theme = ThemeConfig::tracked(dark);
        layout.with(|l| {
            let dims = l.frame.dims;
            let axes = cartesian_axes(&l.frame, &l.categories, &theme, show_grid, axis_formatter.get_value());
            let areas = l
                .areas
                .iter()
                .map(|area| {
                    let fills = area
                        .fills
                        .iter()
                        .map(|d| view! { <path d=d.clone() fill=area.color.clone() fill-opacity=fill_opacity stroke="none" /> })
                        .collect_view();
                    let outlines = show_line.then(|| {
                        area.outlines
                            .iter()
                            .map(|d| {
                                view! {
                                    <path
                                        d=d.clone()
                                        fill="none"
                                        stroke=area.color.clone()
                                        stroke-width=theme.stroke_width
                                        stroke-linejoin="round"
                                    />
                                }
                            })
                            .collect_view()
                    });
                    view! {
                        <g class="area-series">
                            {fills}
                            {outlines}
                        </g>
                    }
                })
                .collect_view();

            view! {
                <svg
                    viewBox=dims.viewbox()
                    preserveAspectRatio="xMidYMid meet"
                    style="width: 100%; height: auto; display: block;"
                    on:mousemove=on_move
                    on:mouseleave=move |_| hover.set(None)
                >
                    <g transform=dims.inner_transform()>
                        {axes}
                        {areas}
                        {guide}
                    </g>
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
            let content =
                tooltip_formatter.with_value(|f| tooltip_content(&l.categories, &l.series, index, f.as_ref()))?;
            Some(view! { <ChartTooltip content=content left_percent=l.frame.left_percent(index) theme=theme /> })
        })
    };

    let legend = move || {
        show_legend.then(|| {
            view! {
                <ChartLegend items=layout.with(|l| legend_items(&l.series)) theme=ThemeConfig::tracked(dark) />
            }
        })
    };

    let chart = view! {
        <div class="chart area-chart" style="position: relative; width: 100%;">
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

    #[derive(Debug, Clone)]
    struct Traffic {
        day: &'static str,
        inbound: Option<f64>,
        outbound: Option<f64>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TrafficField {
        Inbound,
        Outbound,
    }

    impl ChartDatum for Traffic {
        type Field = TrafficField;

        fn category(&self) -> String {
            self.day.to_string()
        }

        fn value(&self, field: TrafficField) -> Option<f64> {
            match field {
                TrafficField::Inbound => self.inbound,
                TrafficField::Outbound => self.outbound,
            }
        }
    }

    fn traffic() -> Vec<Traffic> {
        vec![
            Traffic { day: "Mon", inbound: Some(10.0), outbound: Some(4.0) },
            Traffic { day: "Tue", inbound: None, outbound: Some(6.0) },
            Traffic { day: "Wed", inbound: Some(12.0), outbound: Some(5.0) },
        ]
    }

    #[test]
    fn test_unstacked_area_breaks_at_gap() {
        let series = vec![SeriesDescriptor::new(TrafficField::Inbound, "In")];
        let layout = area_layout(&traffic(), &series, &AreaChartConfig::default());
        assert_eq!(layout.areas[0].fills.len(), 2);
        assert!(layout.areas[0].fills.iter().all(|d| d.ends_with('Z')));
    }

    #[test]
    fn test_stacked_area_gap_contributes_zero() {
        let series = vec![
            SeriesDescriptor::new(TrafficField::Inbound, "In").stack("t"),
            SeriesDescriptor::new(TrafficField::Outbound, "Out").stack("t"),
        ];
        let layout = area_layout(&traffic(), &series, &AreaChartConfig::default());

        // one continuous band per stacked series
        assert_eq!(layout.areas[0].fills.len(), 1);
        assert_eq!(layout.areas[1].fills.len(), 1);

        // top of the stack reaches inbound + outbound
        assert!(layout.frame.y_ticks.last().copied().unwrap_or(0.0) >= 17.0);
    }

    #[test]
    fn test_fill_opacity_clamped() {
        assert_eq!(AreaChartConfig::default().with_fill_opacity(3.0).fill_opacity, 1.0);
    }
}
