//! Multi-series line chart

use crate::{
    axis::{cartesian_axes, hover_guide, pointer_in_viewbox, ChartLegend, ChartTooltip},
    chartkit::{LinePath, PathGenerator, SmoothPath},
    container::titled,
    series::{
        categories, legend_items, raw_extent, resolve_series, segments, tooltip_content, CartesianConfig,
        CartesianFrame, ResolvedSeries,
    },
    theme::ThemeConfig,
};
use cloud_core::{ChartDatum, SeriesDescriptor, SharedFormatter};
use leptos::prelude::*;

/// Line chart configuration
#[derive(Debug, Clone)]
pub struct LineChartConfig {
    pub cartesian: CartesianConfig,
    pub smooth: bool,
    pub show_dots: bool,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            cartesian: CartesianConfig::default(),
            smooth: true,
            show_dots: true,
        }
    }
}

impl LineChartConfig {
    /// Small dashboard variant: no grid, legend or dots
    pub fn compact() -> Self {
        Self {
            cartesian: CartesianConfig::compact(),
            smooth: true,
            show_dots: false,
        }
    }

    pub fn with_cartesian(mut self, cartesian: CartesianConfig) -> Self {
        self.cartesian = cartesian;
        self
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn with_dots(mut self, show: bool) -> Self {
        self.show_dots = show;
        self
    }
}

/// One rendered series: path per unbroken run plus point markers
#[derive(Debug, Clone, PartialEq)]
pub struct LineMark {
    pub name: String,
    pub color: String,
    pub paths: Vec<String>,
    /// `(category index, x, y)` of each present point
    pub dots: Vec<(usize, f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub frame: CartesianFrame,
    pub categories: Vec<String>,
    pub series: Vec<ResolvedSeries>,
    pub lines: Vec<LineMark>,
}

/// Map data and series onto line paths inside the configured frame
pub fn line_layout<D: ChartDatum>(
    data: &[D],
    series: &[SeriesDescriptor<D::Field>],
    config: &LineChartConfig,
) -> LineLayout {
    let categories = categories(data);
    let resolved = resolve_series(data, series);
    let frame = CartesianFrame::new(
        config.cartesian.dimensions(),
        categories.len(),
        raw_extent(&resolved),
        config.cartesian.y_ticks,
        0.0,
    );

    let generator: &dyn PathGenerator = if config.smooth { &SmoothPath } else { &LinePath };

    let lines = resolved
        .iter()
        .map(|s| {
            let points: Vec<Option<(f64, f64)>> = s
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| v.map(|v| (frame.x.scale_center(i), frame.y_of(v))))
                .collect();
            LineMark {
                name: s.name.clone(),
                color: s.color.clone(),
                paths: segments(&points).iter().map(|run| generator.generate(run)).collect(),
                dots: points
                    .iter()
                    .enumerate()
                    .filter_map(|(i, p)| p.map(|(x, y)| (i, x, y)))
                    .collect(),
            }
        })
        .collect();

    tracing::debug!("Line layout: {} categories, {} series", categories.len(), resolved.len());

    LineLayout {
        frame,
        categories,
        series: resolved,
        lines,
    }
}

#[component]
pub fn LineChart<D: ChartDatum>(
    data: Signal<Vec<D>>,
    series: Vec<SeriesDescriptor<D::Field>>,
    #[prop(optional)] config: Option<LineChartConfig>,
    #[prop(optional)] tooltip_formatter: Option<SharedFormatter>,
    #[prop(optional)] axis_formatter: Option<SharedFormatter>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let show_grid = config.cartesian.show_grid;
    let show_legend = config.cartesian.show_legend;
    let show_tooltip = config.cartesian.show_tooltip;
    let show_dots = config.show_dots;

    let config = StoredValue::new(config);
    let series = StoredValue::new(series);
    let tooltip_formatter = StoredValue::new(tooltip_formatter);
    let axis_formatter = StoredValue::new(axis_formatter);
    let hover = RwSignal::new(None::<usize>);

    let layout = Memo::new(move |_| {
        data.with(|d| series.with_value(|s| config.with_value(|c| line_layout(d, s, c))))
    });

    let on_move = move |ev: web_sys::MouseEvent| {
        let index = layout.with_untracked(|l| {
            pointer_in_viewbox(&ev, l.frame.dims.width, l.frame.dims.height).and_then(|(x, _)| l.frame.category_at(x))
        });
        if hover.get_untracked() != index {
            hover.set(index);
        }
    };

    let hover_marks = move || {
        let index = hover.get()?;
        let theme = ThemeConfig::tracked(dark);
        layout.with(|l| {
            let active = l
                .lines
                .iter()
                .filter_map(|line| {
                    line.dots.iter().find(|d| d.0 == index).map(|&(_, x, y)| {
                        view! {
                            <circle
                                cx=x cy=y
                                r=theme.dot.active_radius
                                fill=line.color.clone()
                                stroke=theme.dot.active_stroke
                                stroke-width=theme.dot.active_stroke_width
                            />
                        }
                    })
                })
                .collect_view();
            Some(view! {
                <g class="hover-marks" pointer-events="none">
                    {hover_guide(&l.frame, index, &theme)}
                    {active}
                </g>
            })
        })
    };

    let plot = move || {
        let theme = ThemeConfig::tracked(dark);
        layout.with(|l| {
            let dims = l.frame.dims;
            let axes = cartesian_axes(&l.frame, &l.categories, &theme, show_grid, axis_formatter.get_value());
            let lines = l
                .lines
                .iter()
                .map(|line| {
                    let paths = line
                        .paths
                        .iter()
                        .map(|d| {
                            view! {
                                <path
                                    d=d.clone()
                                    fill="none"
                                    stroke=line.color.clone()
                                    stroke-width=theme.stroke_width
                                    stroke-linecap="round"
                                    stroke-linejoin="round"
                                />
                            }
                        })
                        .collect_view();
                    let dots = show_dots.then(|| {
                        line.dots
                            .iter()
                            .map(|&(_, x, y)| view! { <circle cx=x cy=y r=theme.dot.radius fill=line.color.clone() /> })
                            .collect_view()
                    });
                    view! {
                        <g class="line-series">
                            {paths}
                            {dots}
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
                        {lines}
                        {hover_marks}
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
        <div class="chart line-chart" style="position: relative; width: 100%;">
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
    use cloud_core::{colors, NamedValue, ValueField};

    #[derive(Debug, Clone)]
    struct Latency {
        hour: u32,
        p50: Option<f64>,
        p99: Option<f64>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum LatencyField {
        P50,
        P99,
    }

    impl ChartDatum for Latency {
        type Field = LatencyField;

        fn category(&self) -> String {
            format!("{:02}:00", self.hour)
        }

        fn value(&self, field: LatencyField) -> Option<f64> {
            match field {
                LatencyField::P50 => self.p50,
                LatencyField::P99 => self.p99,
            }
        }
    }

    fn latency() -> Vec<Latency> {
        vec![
            Latency { hour: 0, p50: Some(12.0), p99: Some(80.0) },
            Latency { hour: 1, p50: Some(14.0), p99: None },
            Latency { hour: 2, p50: None, p99: Some(95.0) },
            Latency { hour: 3, p50: Some(11.0), p99: Some(70.0) },
        ]
    }

    fn descriptors() -> Vec<SeriesDescriptor<LatencyField>> {
        vec![
            SeriesDescriptor::new(LatencyField::P50, "p50"),
            SeriesDescriptor::new(LatencyField::P99, "p99").color("#ff00ff"),
        ]
    }

    #[test]
    fn test_gaps_split_paths() {
        let layout = line_layout(&latency(), &descriptors(), &LineChartConfig::default().with_smooth(false));

        // p50 missing at hour 2: two runs
        assert_eq!(layout.lines[0].paths.len(), 2);
        assert_eq!(layout.lines[0].dots.len(), 3);
        // p99 missing at hour 1: a single point run then a two point run
        assert_eq!(layout.lines[1].paths.len(), 2);
        assert!(layout.lines[1].paths[0].starts_with('M'));
        assert!(!layout.lines[1].paths[0].contains('L'));
    }

    #[test]
    fn test_series_colors() {
        let layout = line_layout(&latency(), &descriptors(), &LineChartConfig::default());
        assert_eq!(layout.lines[0].color, colors::PALETTE[0]);
        assert_eq!(layout.lines[1].color, "#ff00ff");
    }

    #[test]
    fn test_points_follow_scale() {
        let layout = line_layout(&latency(), &descriptors(), &LineChartConfig::default());
        let (_, x0, y0) = layout.lines[1].dots[0];
        let (_, _, y_peak) = layout.lines[1].dots[1];

        assert!((x0 - layout.frame.x.scale_center(0)).abs() < 1e-9);
        // higher values sit higher on screen
        assert!(y_peak < y0);
    }

    #[test]
    fn test_empty_dataset() {
        let data: Vec<NamedValue> = Vec::new();
        let layout = line_layout(&data, &[SeriesDescriptor::new(ValueField, "v")], &LineChartConfig::default());
        assert!(layout.categories.is_empty());
        assert!(layout.lines[0].paths.is_empty());
        assert!(!layout.frame.y_ticks.is_empty());
    }

    #[test]
    fn test_negative_values_extend_domain() {
        let data = vec![NamedValue::new("a", -20.0), NamedValue::new("b", 10.0)];
        let layout = line_layout(&data, &[SeriesDescriptor::new(ValueField, "v")], &LineChartConfig::default());
        assert!(layout.frame.y_ticks.first().copied().unwrap_or(0.0) <= -20.0);
        let zero = layout.frame.y_of(0.0);
        assert!(layout.lines[0].dots[0].2 > zero);
    }
}
