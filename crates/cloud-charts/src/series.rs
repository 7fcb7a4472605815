//! Category/series mapping shared by the line, bar and area charts

use crate::{
    chartkit::{BandScale, LinearScale, Scale},
    ChartDimensions,
};
use cloud_core::{finite_value, ChartDatum, SeriesDescriptor, SharedFormatter, ValueFormatter};

/// Options shared by every cartesian chart
#[derive(Debug, Clone)]
pub struct CartesianConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Option<crate::ChartMargin>,
    pub show_grid: bool,
    pub show_legend: bool,
    pub show_tooltip: bool,
    pub y_ticks: usize,
}

impl Default for CartesianConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            margin: None,
            show_grid: true,
            show_legend: true,
            show_tooltip: true,
            y_ticks: 5,
        }
    }
}

impl CartesianConfig {
    pub fn compact() -> Self {
        Self {
            width: 300.0,
            height: 120.0,
            margin: Some(crate::ChartMargin::new(8.0, 8.0, 20.0, 36.0)),
            show_grid: false,
            show_legend: false,
            show_tooltip: true,
            y_ticks: 3,
        }
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    pub fn legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    pub fn tooltip(mut self, show: bool) -> Self {
        self.show_tooltip = show;
        self
    }

    pub fn with_margin(mut self, margin: crate::ChartMargin) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Dimensions with the configured margin, or the themed default
    pub fn dimensions(&self) -> ChartDimensions {
        ChartDimensions::new(self.width, self.height).with_margin(self.margin.unwrap_or_default())
    }
}

/// One series with its values resolved per category
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSeries {
    pub index: usize,
    pub name: String,
    pub color: String,
    pub stack_id: Option<String>,
    pub values: Vec<Option<f64>>,
}

/// Category labels in data order
pub fn categories<D: ChartDatum>(data: &[D]) -> Vec<String> {
    data.iter().map(|d| d.category()).collect()
}

/// Resolve colors and per-category values for each series
pub fn resolve_series<D: ChartDatum>(data: &[D], series: &[SeriesDescriptor<D::Field>]) -> Vec<ResolvedSeries> {
    series
        .iter()
        .enumerate()
        .map(|(index, s)| ResolvedSeries {
            index,
            name: s.name.clone(),
            color: s.resolved_color(index),
            stack_id: s.stack_id.clone(),
            values: data.iter().map(|d| finite_value(d, s.data_key)).collect(),
        })
        .collect()
}

/// `(name, color)` pairs for the legend
pub fn legend_items(series: &[ResolvedSeries]) -> Vec<(String, String)> {
    series.iter().map(|s| (s.name.clone(), s.color.clone())).collect()
}

/// Lower/upper value of one mark after stacking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedValue {
    pub lower: f64,
    pub upper: f64,
    /// The underlying point was absent
    pub absent: bool,
}

/// Stack series that share a `stack_id`.
///
/// Positive values grow upward from the positive running total, negative
/// values downward from the negative one. Unstacked series sit on zero.
/// Absent points contribute nothing to the running totals.
pub fn stack_series(series: &[ResolvedSeries], category_count: usize) -> Vec<Vec<StackedValue>> {
    use std::collections::HashMap;

    let mut positive: HashMap<&str, Vec<f64>> = HashMap::new();
    let mut negative: HashMap<&str, Vec<f64>> = HashMap::new();

    series
        .iter()
        .map(|s| {
            (0..category_count)
                .map(|i| {
                    let value = s.values.get(i).copied().flatten();
                    match (&s.stack_id, value) {
                        (Some(stack), Some(v)) => {
                            let totals = if v >= 0.0 {
                                positive.entry(stack.as_str()).or_insert_with(|| vec![0.0; category_count])
                            } else {
                                negative.entry(stack.as_str()).or_insert_with(|| vec![0.0; category_count])
                            };
                            let lower = totals[i];
                            totals[i] += v;
                            StackedValue {
                                lower,
                                upper: totals[i],
                                absent: false,
                            }
                        }
                        (Some(stack), None) => {
                            let base = positive.get(stack.as_str()).map_or(0.0, |t| t[i]);
                            StackedValue {
                                lower: base,
                                upper: base,
                                absent: true,
                            }
                        }
                        (None, Some(v)) => StackedValue {
                            lower: 0.0,
                            upper: v,
                            absent: false,
                        },
                        (None, None) => StackedValue {
                            lower: 0.0,
                            upper: 0.0,
                            absent: true,
                        },
                    }
                })
                .collect()
        })
        .collect()
}

/// Value extent over all present stacked marks, always including zero
pub fn stacked_extent(stacked: &[Vec<StackedValue>]) -> (f64, f64) {
    stacked
        .iter()
        .flatten()
        .filter(|v| !v.absent)
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| {
            (lo.min(v.lower).min(v.upper), hi.max(v.lower).max(v.upper))
        })
}

/// Scales and dimensions for one cartesian render
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianFrame {
    pub dims: ChartDimensions,
    pub x: BandScale,
    pub y: LinearScale,
    pub y_ticks: Vec<f64>,
}

impl CartesianFrame {
    pub fn new(dims: ChartDimensions, category_count: usize, extent: (f64, f64), tick_count: usize, band_padding: f64) -> Self {
        let (lo, hi) = extent;
        let (lo, hi) = if (hi - lo).abs() < f64::EPSILON { (lo, lo + 1.0) } else { (lo, hi) };

        let y = LinearScale::new()
            .domain(lo, hi)
            .nice(tick_count.max(1))
            .range(dims.inner_height(), 0.0);
        let y_ticks = y.nice_ticks(tick_count.max(1));

        let x = BandScale::new(category_count)
            .range(0.0, dims.inner_width())
            .padding(band_padding, band_padding / 2.0);

        Self { dims, x, y, y_ticks }
    }

    /// Frame with categories running down the left edge and values along the bottom
    pub fn horizontal(
        dims: ChartDimensions,
        category_count: usize,
        extent: (f64, f64),
        tick_count: usize,
        band_padding: f64,
    ) -> Self {
        let (lo, hi) = extent;
        let (lo, hi) = if (hi - lo).abs() < f64::EPSILON { (lo, lo + 1.0) } else { (lo, hi) };

        let y = LinearScale::new()
            .domain(lo, hi)
            .nice(tick_count.max(1))
            .range(0.0, dims.inner_width());
        let y_ticks = y.nice_ticks(tick_count.max(1));

        let x = BandScale::new(category_count)
            .range(0.0, dims.inner_height())
            .padding(band_padding, band_padding / 2.0);

        Self { dims, x, y, y_ticks }
    }

    /// Pixel y of a data value
    pub fn y_of(&self, value: f64) -> f64 {
        self.y.scale(value)
    }

    /// `(pixel y, value)` for each value tick
    pub fn tick_positions(&self) -> Vec<(f64, f64)> {
        self.y_ticks.iter().map(|&v| (self.y_of(v), v)).collect()
    }

    /// Category labels at band centers, thinned so neighbours keep ~`min_gap` px apart
    pub fn category_labels(&self, categories: &[String], min_gap: f64) -> Vec<(f64, String)> {
        let step = self.x.step();
        let stride = if step > 0.0 { (min_gap / step).ceil().max(1.0) as usize } else { 1 };
        categories
            .iter()
            .enumerate()
            .step_by(stride)
            .map(|(i, label)| (self.x.scale_center(i), label.clone()))
            .collect()
    }

    /// Category under a pointer x given in viewBox units
    pub fn category_at(&self, view_x: f64) -> Option<usize> {
        let inner_x = view_x - self.dims.margin.left;
        if inner_x < 0.0 || inner_x > self.dims.inner_width() {
            return None;
        }
        self.x.index_at(inner_x)
    }

    /// Category under a pointer y in viewBox units, for horizontal frames
    pub fn category_at_y(&self, view_y: f64) -> Option<usize> {
        let inner_y = view_y - self.dims.margin.top;
        if inner_y < 0.0 || inner_y > self.dims.inner_height() {
            return None;
        }
        self.x.index_at(inner_y)
    }

    /// Hovered category's x as a percentage of the full width (tooltip anchor)
    pub fn left_percent(&self, index: usize) -> f64 {
        if self.dims.width <= 0.0 {
            return 0.0;
        }
        (self.dims.margin.left + self.x.scale_center(index)) / self.dims.width * 100.0
    }
}

/// y-extent of the raw (unstacked) series values, always including zero
pub fn raw_extent(series: &[ResolvedSeries]) -> (f64, f64) {
    series
        .iter()
        .flat_map(|s| s.values.iter().flatten())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Split a series into drawable runs, breaking at absent points
pub fn segments(points: &[Option<(f64, f64)>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point {
            Some(p) => current.push(*p),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

// ============================================================================
// TOOLTIP
// ============================================================================

/// One line of tooltip content
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub color: String,
    pub text: String,
}

/// Hovered category with its rows
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

/// Default tooltip value text: integers without decimals, otherwise two
pub fn default_value_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// `name: value` rows for the hovered category; absent points are skipped
pub fn tooltip_content(
    categories: &[String],
    series: &[ResolvedSeries],
    index: usize,
    formatter: Option<&SharedFormatter>,
) -> Option<TooltipContent> {
    let title = categories.get(index)?.clone();
    let rows = series
        .iter()
        .filter_map(|s| {
            let value = s.values.get(index).copied().flatten()?;
            let value_text = match formatter {
                Some(f) => f.format(value),
                None => default_value_text(value),
            };
            Some(TooltipRow {
                color: s.color.clone(),
                text: format!("{}: {}", s.name, value_text),
            })
        })
        .collect();
    Some(TooltipContent { title, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_core::{colors, formatter};

    #[derive(Debug, Clone)]
    struct Usage {
        day: &'static str,
        cpu: Option<f64>,
        mem: Option<f64>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum UsageField {
        Cpu,
        Mem,
    }

    impl ChartDatum for Usage {
        type Field = UsageField;

        fn category(&self) -> String {
            self.day.to_string()
        }

        fn value(&self, field: UsageField) -> Option<f64> {
            match field {
                UsageField::Cpu => self.cpu,
                UsageField::Mem => self.mem,
            }
        }
    }

    fn data() -> Vec<Usage> {
        vec![
            Usage { day: "Mon", cpu: Some(10.0), mem: Some(5.0) },
            Usage { day: "Tue", cpu: None, mem: Some(7.0) },
            Usage { day: "Wed", cpu: Some(30.0), mem: Some(-2.0) },
        ]
    }

    #[test]
    fn test_resolve_series_palette_wraps() {
        let series: Vec<_> = (0..7).map(|i| SeriesDescriptor::new(UsageField::Cpu, format!("s{i}"))).collect();
        let resolved = resolve_series(&data(), &series);
        assert_eq!(resolved[5].color, resolved[0].color);
        assert_eq!(resolved[0].color, colors::PALETTE[0]);
        assert_eq!(resolved[0].values, vec![Some(10.0), None, Some(30.0)]);
    }

    #[test]
    fn test_stacking_accumulates() {
        let series = vec![
            SeriesDescriptor::new(UsageField::Cpu, "cpu").stack("a"),
            SeriesDescriptor::new(UsageField::Mem, "mem").stack("a"),
        ];
        let resolved = resolve_series(&data(), &series);
        let stacked = stack_series(&resolved, 3);

        assert_eq!(stacked[1][0], StackedValue { lower: 10.0, upper: 15.0, absent: false });
        // cpu absent on Tue: mem starts from zero
        assert!(stacked[0][1].absent);
        assert_eq!(stacked[1][1], StackedValue { lower: 0.0, upper: 7.0, absent: false });
        // negative value stacks downward from its own total
        assert_eq!(stacked[1][2], StackedValue { lower: 0.0, upper: -2.0, absent: false });
        assert_eq!(stacked_extent(&stacked), (-2.0, 30.0));
    }

    #[test]
    fn test_unstacked_sits_on_zero() {
        let series = vec![SeriesDescriptor::new(UsageField::Mem, "mem")];
        let resolved = resolve_series(&data(), &series);
        let stacked = stack_series(&resolved, 3);
        assert_eq!(stacked[0][0], StackedValue { lower: 0.0, upper: 5.0, absent: false });
    }

    #[test]
    fn test_frame_pointer_mapping() {
        let dims = ChartDimensions::new(600.0, 300.0);
        let frame = CartesianFrame::new(dims, 4, (0.0, 100.0), 5, 0.0);

        // inner width 520, four bands of 130
        assert_eq!(frame.category_at(50.0 + 10.0), Some(0));
        assert_eq!(frame.category_at(50.0 + 300.0), Some(2));
        assert_eq!(frame.category_at(10.0), None);
        assert!((frame.left_percent(0) - (50.0 + 65.0) / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_labels_thin_out() {
        let dims = ChartDimensions::new(300.0, 200.0);
        let cats: Vec<String> = (0..40).map(|i| i.to_string()).collect();
        let frame = CartesianFrame::new(dims, cats.len(), (0.0, 1.0), 5, 0.0);
        let labels = frame.category_labels(&cats, 40.0);
        assert!(labels.len() < cats.len());
        assert_eq!(labels[0].1, "0");
    }

    #[test]
    fn test_raw_extent_includes_zero() {
        let series = vec![SeriesDescriptor::new(UsageField::Cpu, "cpu")];
        let resolved = resolve_series(&data(), &series);
        assert_eq!(raw_extent(&resolved), (0.0, 30.0));
        assert_eq!(raw_extent(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_segments_break_at_gaps() {
        let runs = segments(&[Some((0.0, 1.0)), None, Some((2.0, 3.0)), Some((3.0, 4.0)), None]);
        assert_eq!(runs, vec![vec![(0.0, 1.0)], vec![(2.0, 3.0), (3.0, 4.0)]]);
        assert!(segments(&[]).is_empty());
    }

    #[test]
    fn test_frame_for_empty_data() {
        let frame = CartesianFrame::new(ChartDimensions::default(), 0, (0.0, 0.0), 5, 0.2);
        assert_eq!(frame.x.count(), 0);
        assert!(frame.y_of(0.0).is_finite());
    }

    #[test]
    fn test_tooltip_default_and_custom() {
        let series = vec![
            SeriesDescriptor::new(UsageField::Cpu, "CPU"),
            SeriesDescriptor::new(UsageField::Mem, "Memory"),
        ];
        let resolved = resolve_series(&data(), &series);
        let cats = categories(&data());

        let tip = tooltip_content(&cats, &resolved, 1, None).unwrap();
        assert_eq!(tip.title, "Tue");
        assert_eq!(tip.rows.len(), 1);
        assert_eq!(tip.rows[0].text, "Memory: 7");

        let pct = formatter(|v: f64| format!("{v:.1}%"));
        let tip = tooltip_content(&cats, &resolved, 0, Some(&pct)).unwrap();
        assert_eq!(tip.rows[0].text, "CPU: 10.0%");

        assert!(tooltip_content(&cats, &resolved, 9, None).is_none());
    }
}
