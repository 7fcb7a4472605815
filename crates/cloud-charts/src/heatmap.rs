//! Grid heatmap over string-keyed x/y cells

use crate::{
    axis::{pointer_in_viewbox, ChartTooltip},
    container::titled,
    series::{default_value_text, TooltipContent, TooltipRow},
    theme::ThemeConfig,
};
use cloud_core::{ColorRamp, GridCell, HeatmapCell, HeatmapGrid, SharedFormatter, ValueFormatter};
use leptos::prelude::*;

#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    pub cell_size: f64,
    pub gap: f64,
    pub show_axis_labels: bool,
    /// Room reserved left of the grid for y labels
    pub label_width: f64,
    /// Room reserved above the grid for x labels
    pub label_height: f64,
    pub show_tooltip: bool,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            cell_size: 32.0,
            gap: 2.0,
            show_axis_labels: true,
            label_width: 64.0,
            label_height: 24.0,
            show_tooltip: true,
        }
    }
}

impl HeatmapConfig {
    pub fn compact() -> Self {
        Self {
            cell_size: 16.0,
            gap: 1.0,
            show_axis_labels: false,
            label_width: 0.0,
            label_height: 0.0,
            show_tooltip: true,
        }
    }

    pub fn with_cell(mut self, size: f64, gap: f64) -> Self {
        self.cell_size = size.max(1.0);
        self.gap = gap.max(0.0);
        self
    }

    fn offsets(&self) -> (f64, f64) {
        if self.show_axis_labels {
            (self.label_width, self.label_height)
        } else {
            (0.0, 0.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatRect {
    pub col: usize,
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapLayout {
    pub grid: HeatmapGrid,
    pub rects: Vec<HeatRect>,
    pub cell_size: f64,
    pub width: f64,
    pub height: f64,
    pub x_labels: Vec<(f64, String)>,
    pub y_labels: Vec<(f64, String)>,
    origin: (f64, f64),
    pitch: f64,
}

impl HeatmapLayout {
    /// Grid position under a viewBox point; gaps count as the cell before them
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (ox, oy) = self.origin;
        if x < ox || y < oy || self.pitch <= 0.0 {
            return None;
        }
        let col = ((x - ox) / self.pitch).floor() as usize;
        let row = ((y - oy) / self.pitch).floor() as usize;
        (col < self.grid.xs.len() && row < self.grid.ys.len()).then_some((col, row))
    }

    /// Horizontal centre of a column as a percentage of the width
    pub fn left_percent(&self, col: usize) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        (self.origin.0 + col as f64 * self.pitch + self.cell_size / 2.0) / self.width * 100.0
    }
}

pub fn heatmap_layout(
    cells: &[HeatmapCell],
    min: Option<f64>,
    max: Option<f64>,
    ramp: &ColorRamp,
    config: &HeatmapConfig,
) -> HeatmapLayout {
    let grid = HeatmapGrid::build(cells, min, max);
    let (ox, oy) = config.offsets();
    let pitch = config.cell_size + config.gap;

    let rects = grid
        .cells
        .iter()
        .map(|cell| HeatRect {
            col: cell.col,
            row: cell.row,
            x: ox + cell.col as f64 * pitch,
            y: oy + cell.row as f64 * pitch,
            color: grid.color_of(cell, ramp),
        })
        .collect();

    let (x_labels, y_labels) = if config.show_axis_labels {
        (
            grid.xs
                .iter()
                .enumerate()
                .map(|(i, x)| (ox + i as f64 * pitch + config.cell_size / 2.0, x.clone()))
                .collect(),
            grid.ys
                .iter()
                .enumerate()
                .map(|(i, y)| (oy + i as f64 * pitch + config.cell_size / 2.0, y.clone()))
                .collect(),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let width = ox + grid.xs.len() as f64 * pitch;
    let height = oy + grid.ys.len() as f64 * pitch;

    HeatmapLayout {
        grid,
        rects,
        cell_size: config.cell_size,
        width: width.max(1.0),
        height: height.max(1.0),
        x_labels,
        y_labels,
        origin: (ox, oy),
        pitch,
    }
}

/// Tooltip for one cell: its label when set, otherwise `x, y: value`
pub fn cell_tooltip(cell: &GridCell, color: &str, formatter: Option<&SharedFormatter>) -> TooltipContent {
    let text = match &cell.label {
        Some(label) => label.clone(),
        None => {
            let value = formatter.map_or_else(|| default_value_text(cell.value), |f| f.format(cell.value));
            format!("{}, {}: {}", cell.x, cell.y, value)
        }
    };
    TooltipContent {
        title: String::new(),
        rows: vec![TooltipRow {
            color: color.to_string(),
            text,
        }],
    }
}

#[component]
pub fn Heatmap(
    #[prop(into)] cells: Signal<Vec<HeatmapCell>>,
    #[prop(optional)] min: Option<f64>,
    #[prop(optional)] max: Option<f64>,
    #[prop(optional)] ramp: ColorRamp,
    #[prop(optional)] config: Option<HeatmapConfig>,
    #[prop(optional)] value_formatter: Option<SharedFormatter>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let show_tooltip = config.show_tooltip;
    let config = StoredValue::new(config);
    let ramp = StoredValue::new(ramp);
    let value_formatter = StoredValue::new(value_formatter);
    let hover = RwSignal::new(None::<(usize, usize)>);

    let layout = Memo::new(move |_| {
        cells.with(|c| ramp.with_value(|r| config.with_value(|cfg| heatmap_layout(c, min, max, r, cfg))))
    });

    let on_move = move |ev: web_sys::MouseEvent| {
        let at = layout.with_untracked(|l| {
            pointer_in_viewbox(&ev, l.width, l.height).and_then(|(x, y)| l.cell_at(x, y))
        });
        if hover.get_untracked() != at {
            hover.set(at);
        }
    };

    let plot = move || {
        let theme = ThemeConfig::tracked(dark);
        let highlight = theme.text;
        layout.with(|l| {
            let size = l.cell_size;
            let rects = l
                .rects
                .iter()
                .map(|r| {
                    let at = (r.col, r.row);
                    view! {
                        <rect
                            x=r.x y=r.y
                            width=size height=size
                            rx="2"
                            fill=r.color.clone()
                            stroke=move || if hover.get() == Some(at) { highlight } else { "none" }
                            stroke-width="1.5"
                        />
                    }
                })
                .collect_view();
            let x_labels = l
                .x_labels
                .iter()
                .map(|(x, label)| {
                    view! {
                        <text x={*x} y={l.origin.1 - 8.0} text-anchor="middle" fill=theme.x_tick.fill font-size="11">
                            {label.clone()}
                        </text>
                    }
                })
                .collect_view();
            let y_labels = l
                .y_labels
                .iter()
                .map(|(y, label)| {
                    view! {
                        <text
                            x={l.origin.0 - 8.0}
                            y={*y}
                            dy="0.32em"
                            text-anchor="end"
                            fill=theme.y_tick.fill
                            font-size="11"
                        >
                            {label.clone()}
                        </text>
                    }
                })
                .collect_view();

            view! {
                <svg
                    viewBox=format!("0 0 {} {}", l.width, l.height)
                    preserveAspectRatio="xMinYMin meet"
                    style=format!("width: 100%; max-width: {}px; height: auto; display: block;", l.width)
                    on:mousemove=on_move
                    on:mouseleave=move |_| hover.set(None)
                >
                    <g class="heatmap-cells">{rects}</g>
                    <g class="heatmap-x-labels">{x_labels}</g>
                    <g class="heatmap-y-labels">{y_labels}</g>
                </svg>
            }
        })
    };

    let tooltip = move || {
        if !show_tooltip {
            return None;
        }
        let (col, row) = hover.get()?;
        let theme = ThemeConfig::tracked(dark);
        layout.with(|l| {
            let cell = l.grid.cell(col, row)?;
            let color = ramp.with_value(|r| l.grid.color_of(cell, r));
            let content = value_formatter.with_value(|f| cell_tooltip(cell, &color, f.as_ref()));
            Some(view! { <ChartTooltip content=content left_percent=l.left_percent(col) theme=theme /> })
        })
    };

    let chart = view! {
        <div class="chart heatmap" style="position: relative; width: 100%;">
            {plot}
            {tooltip}
        </div>
    }
    .into_any();

    titled(title, dark, chart)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<HeatmapCell> {
        vec![
            HeatmapCell::new("a", "1", 10.0),
            HeatmapCell::new("b", "1", 20.0),
            HeatmapCell::new("b", "2", 15.0).label("peak window"),
        ]
    }

    #[test]
    fn test_missing_cell_is_zero_and_lowest_band() {
        let ramp = ColorRamp::Reds;
        let layout = heatmap_layout(&sample(), None, None, &ramp, &HeatmapConfig::default());

        assert_eq!((layout.grid.min, layout.grid.max), (10.0, 20.0));
        let missing = layout.grid.cell(0, 1).unwrap();
        assert_eq!((missing.x.as_str(), missing.y.as_str(), missing.value), ("a", "2", 0.0));
        let rect = layout.rects.iter().find(|r| (r.col, r.row) == (0, 1)).unwrap();
        assert_eq!(rect.color, ramp.lowest());
    }

    #[test]
    fn test_rect_positions_and_size() {
        let config = HeatmapConfig::default().with_cell(20.0, 5.0);
        let layout = heatmap_layout(&sample(), None, None, &ColorRamp::Blues, &config);

        let last = layout.rects.last().unwrap();
        assert_eq!((last.x, last.y), (64.0 + 25.0, 24.0 + 25.0));
        assert_eq!(layout.width, 64.0 + 50.0);
        assert_eq!(layout.x_labels[1], (64.0 + 25.0 + 10.0, "b".to_string()));
    }

    #[test]
    fn test_cell_at_pointer() {
        let layout = heatmap_layout(&sample(), None, None, &ColorRamp::Blues, &HeatmapConfig::compact());
        // pitch 17
        assert_eq!(layout.cell_at(5.0, 5.0), Some((0, 0)));
        assert_eq!(layout.cell_at(20.0, 18.0), Some((1, 1)));
        assert_eq!(layout.cell_at(40.0, 5.0), None);
    }

    #[test]
    fn test_tooltip_prefers_label() {
        let layout = heatmap_layout(&sample(), None, None, &ColorRamp::Blues, &HeatmapConfig::default());
        let labelled = layout.grid.cell(1, 1).unwrap();
        assert_eq!(cell_tooltip(labelled, "#000", None).rows[0].text, "peak window");

        let plain = layout.grid.cell(1, 0).unwrap();
        assert_eq!(cell_tooltip(plain, "#000", None).rows[0].text, "b, 1: 20");
    }

    #[test]
    fn test_empty_input() {
        let layout = heatmap_layout(&[], None, None, &ColorRamp::Thermal, &HeatmapConfig::default());
        assert!(layout.rects.is_empty());
        assert!(layout.width >= 1.0);
    }
}
