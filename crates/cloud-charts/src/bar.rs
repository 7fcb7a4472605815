//! Grouped / stacked bar chart, vertical or horizontal

use crate::{
    axis::{cartesian_axes, pointer_in_viewbox, ChartLegend, ChartTooltip},
    chartkit::format_tick,
    container::titled,
    series::{
        categories, legend_items, resolve_series, stack_series, stacked_extent, tooltip_content, CartesianConfig,
        CartesianFrame, ResolvedSeries,
    },
    theme::ThemeConfig,
};
use cloud_core::{ChartDatum, SeriesDescriptor, SharedFormatter, ValueFormatter};
use leptos::prelude::*;

/// Bar chart configuration
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    pub cartesian: CartesianConfig,
    /// Categories on the left, bars growing to the right
    pub horizontal: bool,
    /// Gap between category bands, as a fraction of the step
    pub band_padding: f64,
    /// Gap between bars inside a band, as a fraction of one slot
    pub group_padding: f64,
    pub corner_radius: f64,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            cartesian: CartesianConfig::default(),
            horizontal: false,
            band_padding: 0.2,
            group_padding: 0.1,
            corner_radius: 4.0,
        }
    }
}

impl BarChartConfig {
    pub fn compact() -> Self {
        Self {
            cartesian: CartesianConfig::compact(),
            corner_radius: 2.0,
            ..Self::default()
        }
    }

    pub fn with_cartesian(mut self, cartesian: CartesianConfig) -> Self {
        self.cartesian = cartesian;
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_padding(mut self, band: f64, group: f64) -> Self {
        self.band_padding = band.clamp(0.0, 0.9);
        self.group_padding = group.clamp(0.0, 0.9);
        self
    }
}

/// One bar in inner-area pixels
#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub series: usize,
    pub category: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub frame: CartesianFrame,
    pub horizontal: bool,
    pub categories: Vec<String>,
    pub series: Vec<ResolvedSeries>,
    pub bars: Vec<BarRect>,
}

/// Slot of each series inside a band: stacked series share their stack's slot
fn slot_assignment(series: &[ResolvedSeries]) -> (Vec<usize>, usize) {
    let mut stack_slots: Vec<(&str, usize)> = Vec::new();
    let mut next = 0;
    let slots = series
        .iter()
        .map(|s| {
            if let Some(id) = s.stack_id.as_deref() {
                if let Some(&(_, slot)) = stack_slots.iter().find(|(known, _)| *known == id) {
                    return slot;
                }
                stack_slots.push((id, next));
            }
            next += 1;
            next - 1
        })
        .collect();
    (slots, next.max(1))
}

/// Compute bar rectangles; absent values produce no bar
pub fn bar_layout<D: ChartDatum>(data: &[D], series: &[SeriesDescriptor<D::Field>], config: &BarChartConfig) -> BarLayout {
    let categories = categories(data);
    let resolved = resolve_series(data, series);
    let stacked = stack_series(&resolved, categories.len());
    let extent = stacked_extent(&stacked);
    let dims = config.cartesian.dimensions();
    let ticks = config.cartesian.y_ticks;

    let frame = if config.horizontal {
        CartesianFrame::horizontal(dims, categories.len(), extent, ticks, config.band_padding)
    } else {
        CartesianFrame::new(dims, categories.len(), extent, ticks, config.band_padding)
    };

    let (slots, slot_count) = slot_assignment(&resolved);
    let slot_width = frame.x.bandwidth() / slot_count as f64;
    let thickness = slot_width * (1.0 - config.group_padding);
    let inset = (slot_width - thickness) / 2.0;

    let mut bars = Vec::new();
    for (si, s) in resolved.iter().enumerate() {
        for (ci, value) in stacked[si].iter().enumerate() {
            if value.absent {
                continue;
            }
            let band_start = frame.x.scale(ci) + slots[si] as f64 * slot_width + inset;
            let (a, b) = (frame.y_of(value.lower), frame.y_of(value.upper));
            let (x, y, width, height) = if config.horizontal {
                (a.min(b), band_start, (a - b).abs(), thickness)
            } else {
                (band_start, a.min(b), thickness, (a - b).abs())
            };
            bars.push(BarRect {
                series: si,
                category: ci,
                x,
                y,
                width,
                height,
                color: s.color.clone(),
            });
        }
    }

    tracing::debug!("Bar layout: {} categories, {} bars", categories.len(), bars.len());

    BarLayout {
        frame,
        horizontal: config.horizontal,
        categories,
        series: resolved,
        bars,
    }
}

/// Value ticks along the bottom and categories down the left edge
fn horizontal_axes(
    frame: &CartesianFrame,
    categories: &[String],
    theme: &ThemeConfig,
    show_grid: bool,
    formatter: Option<SharedFormatter>,
) -> impl IntoView + use<> {
    let width = frame.dims.inner_width();
    let height = frame.dims.inner_height();
    let tick = theme.x_tick.clone();
    let grid = theme.grid.clone();

    let value_ticks = frame
        .tick_positions()
        .into_iter()
        .map(|(x, value)| {
            let label = formatter.as_ref().map_or_else(|| format_tick(value), |f| f.format(value));
            let grid_line = show_grid.then(|| {
                view! {
                    <line x1="0" y1={-height} x2="0" y2="0" stroke=grid.stroke stroke-dasharray=grid.dash opacity=grid.opacity />
                }
            });
            view! {
                <g transform=format!("translate({}, {})", x, height)>
                    {grid_line}
                    <line y1="0" y2="5" stroke=tick.line />
                    <text y="18" text-anchor="middle" fill=tick.fill font-size=tick.font_size>{label}</text>
                </g>
            }
        })
        .collect_view();

    let step = frame.x.step();
    let stride = if step > 0.0 { (16.0 / step).ceil().max(1.0) as usize } else { 1 };
    let category_labels = categories
        .iter()
        .enumerate()
        .step_by(stride)
        .map(|(i, label)| {
            view! {
                <text
                    x="-8"
                    y=frame.x.scale_center(i)
                    dy="0.32em"
                    text-anchor="end"
                    fill=theme.y_tick.fill
                    font-size=theme.y_tick.font_size
                >
                    {label.clone()}
                </text>
            }
        })
        .collect_view();

    view! {
        <g class="value-axis horizontal">
            <line x1="0" y1=height x2=width y2=height stroke=theme.x_tick.line />
            {value_ticks}
        </g>
        <g class="category-axis horizontal">
            <line x1="0" y1="0" x2="0" y2=height stroke=theme.y_tick.line />
            {category_labels}
        </g>
    }
}

#[component]
pub fn BarChart<D: ChartDatum>(
    data: Signal<Vec<D>>,
    series: Vec<SeriesDescriptor<D::Field>>,
    #[prop(optional)] config: Option<BarChartConfig>,
    #[prop(optional)] tooltip_formatter: Option<SharedFormatter>,
    #[prop(optional)] axis_formatter: Option<SharedFormatter>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let show_grid = config.cartesian.show_grid;
    let show_legend = config.cartesian.show_legend;
    let show_tooltip = config.cartesian.show_tooltip;
    let radius = config.corner_radius;

    let config = StoredValue::new(config);
    let series = StoredValue::new(series);
    let tooltip_formatter = StoredValue::new(tooltip_formatter);
    let axis_formatter = StoredValue::new(axis_formatter);
    let hover = RwSignal::new(None::<usize>);

    let layout = Memo::new(move |_| {
        data.with(|d| series.with_value(|s| config.with_value(|c| bar_layout(d, s, c))))
    });

    let on_move = move |ev: web_sys::MouseEvent| {
        let index = layout.with_untracked(|l| {
            let dims = l.frame.dims;
            pointer_in_viewbox(&ev, dims.width, dims.height).and_then(|(x, y)| {
                if l.horizontal { l.frame.category_at_y(y) } else { l.frame.category_at(x) }
            })
        });
        if hover.get_untracked() != index {
            hover.set(index);
        }
    };

    let plot = move || {
        let theme = ThemeConfig::tracked(dark);
        layout.with(|l| {
            let dims = l.frame.dims;
            let axes = if l.horizontal {
                horizontal_axes(&l.frame, &l.categories, &theme, show_grid, axis_formatter.get_value()).into_any()
            } else {
                cartesian_axes(&l.frame, &l.categories, &theme, show_grid, axis_formatter.get_value()).into_any()
            };
            let bars = l
                .bars
                .iter()
                .map(|bar| {
                    let category = bar.category;
                    let rx = radius.min(bar.width / 2.0).min(bar.height / 2.0);
                    view! {
                        <rect
                            x=bar.x y=bar.y
                            width=bar.width height=bar.height
                            rx=rx
                            fill=bar.color.clone()
                            opacity=move || match hover.get() {
                                Some(i) if i != category => 0.6,
                                _ => 1.0,
                            }
                        />
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
                        <g class="bars">{bars}</g>
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
            let left = if l.horizontal { 50.0 } else { l.frame.left_percent(index) };
            Some(view! { <ChartTooltip content=content left_percent=left theme=theme /> })
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
        <div class="chart bar-chart" style="position: relative; width: 100%;">
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
    use cloud_core::{NamedValue, ValueField};

    #[derive(Debug, Clone)]
    struct Spend {
        month: &'static str,
        compute: Option<f64>,
        storage: Option<f64>,
        network: Option<f64>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum SpendField {
        Compute,
        Storage,
        Network,
    }

    impl ChartDatum for Spend {
        type Field = SpendField;

        fn category(&self) -> String {
            self.month.to_string()
        }

        fn value(&self, field: SpendField) -> Option<f64> {
            match field {
                SpendField::Compute => self.compute,
                SpendField::Storage => self.storage,
                SpendField::Network => self.network,
            }
        }
    }

    fn spend() -> Vec<Spend> {
        vec![
            Spend { month: "Jan", compute: Some(400.0), storage: Some(100.0), network: Some(50.0) },
            Spend { month: "Feb", compute: Some(300.0), storage: None, network: Some(80.0) },
        ]
    }

    #[test]
    fn test_grouped_bars_share_band() {
        let series = vec![
            SeriesDescriptor::new(SpendField::Compute, "Compute"),
            SeriesDescriptor::new(SpendField::Storage, "Storage"),
        ];
        let layout = bar_layout(&spend(), &series, &BarChartConfig::default());

        // Feb storage is absent: 3 bars, not 4
        assert_eq!(layout.bars.len(), 3);
        let jan: Vec<_> = layout.bars.iter().filter(|b| b.category == 0).collect();
        assert!(jan[0].x < jan[1].x);
        assert!((jan[0].width - jan[1].width).abs() < 1e-9);
        assert!(jan[1].x + jan[1].width <= layout.frame.x.scale(0) + layout.frame.x.bandwidth() + 1e-9);
    }

    #[test]
    fn test_stacked_bars_cumulate() {
        let series = vec![
            SeriesDescriptor::new(SpendField::Compute, "Compute").stack("cost"),
            SeriesDescriptor::new(SpendField::Storage, "Storage").stack("cost"),
            SeriesDescriptor::new(SpendField::Network, "Network"),
        ];
        let layout = bar_layout(&spend(), &series, &BarChartConfig::default());

        let jan: Vec<_> = layout.bars.iter().filter(|b| b.category == 0).collect();
        let (compute, storage, network) = (jan[0], jan[1], jan[2]);

        // same slot, storage sits on top of compute
        assert_eq!(compute.x, storage.x);
        assert!((storage.y + storage.height - compute.y).abs() < 1e-9);
        // unstacked network gets its own slot
        assert!(network.x > compute.x);
        // domain covers the stacked total
        assert!(layout.frame.y_ticks.last().copied().unwrap_or(0.0) >= 500.0);
    }

    #[test]
    fn test_slot_assignment() {
        let series = vec![
            SeriesDescriptor::new(SpendField::Compute, "a").stack("x"),
            SeriesDescriptor::new(SpendField::Storage, "b"),
            SeriesDescriptor::new(SpendField::Network, "c").stack("x"),
        ];
        let resolved = resolve_series(&spend(), &series);
        assert_eq!(slot_assignment(&resolved), (vec![0, 1, 0], 2));
    }

    #[test]
    fn test_horizontal_swaps_axes() {
        let data = vec![NamedValue::new("us-east-1", 10.0), NamedValue::new("eu-west-1", 20.0)];
        let series = vec![SeriesDescriptor::new(ValueField, "Instances")];
        let layout = bar_layout(&data, &series, &BarChartConfig::default().with_horizontal(true));

        let (a, b) = (&layout.bars[0], &layout.bars[1]);
        assert_eq!(a.x, 0.0);
        assert!(b.width > a.width);
        assert!(b.y > a.y);
    }

    #[test]
    fn test_negative_bar_hangs_below_zero() {
        let data = vec![NamedValue::new("credit", -40.0)];
        let layout = bar_layout(&data, &[SeriesDescriptor::new(ValueField, "v")], &BarChartConfig::default());
        let bar = &layout.bars[0];
        assert!((bar.y - layout.frame.y_of(0.0)).abs() < 1e-9);
        assert!(bar.height > 0.0);
    }

    #[test]
    fn test_empty_data_has_no_bars() {
        let data: Vec<NamedValue> = Vec::new();
        let layout = bar_layout(&data, &[SeriesDescriptor::new(ValueField, "v")], &BarChartConfig::default());
        assert!(layout.bars.is_empty());
    }
}
