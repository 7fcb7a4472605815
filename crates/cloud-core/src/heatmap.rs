//! Heatmap cells, grid construction and color ramps

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One input cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub x: String,
    pub y: String,
    pub value: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl HeatmapCell {
    pub fn new(x: impl Into<String>, y: impl Into<String>, value: f64) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            value,
            label: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

// ============================================================================
// COLOR RAMPS
// ============================================================================

const BLUES: &[&str] = &["#eff6ff", "#bfdbfe", "#60a5fa", "#2563eb", "#1e3a8a"];
const GREENS: &[&str] = &["#f0fdf4", "#bbf7d0", "#4ade80", "#16a34a", "#14532d"];
const REDS: &[&str] = &["#fef2f2", "#fecaca", "#f87171", "#dc2626", "#7f1d1d"];
const PURPLES: &[&str] = &["#faf5ff", "#e9d5ff", "#c084fc", "#9333ea", "#581c87"];
const ORANGES: &[&str] = &["#fff7ed", "#fed7aa", "#fb923c", "#ea580c", "#7c2d12"];
const THERMAL: &[&str] = &["#22c55e", "#84cc16", "#eab308", "#f97316", "#ef4444"];

/// Named or custom color ramp, lowest band first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRamp {
    #[default]
    Blues,
    Greens,
    Reds,
    Purples,
    Oranges,
    Thermal,
    Custom(Vec<String>),
}

impl ColorRamp {
    /// Resolve a ramp by name; unknown names fall back to `Blues`
    pub fn named(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "greens" | "green" => Self::Greens,
            "reds" | "red" => Self::Reds,
            "purples" | "purple" => Self::Purples,
            "oranges" | "orange" => Self::Oranges,
            "thermal" | "heat" => Self::Thermal,
            _ => Self::Blues,
        }
    }

    pub fn colors(&self) -> Vec<&str> {
        match self {
            Self::Blues => BLUES.to_vec(),
            Self::Greens => GREENS.to_vec(),
            Self::Reds => REDS.to_vec(),
            Self::Purples => PURPLES.to_vec(),
            Self::Oranges => ORANGES.to_vec(),
            Self::Thermal => THERMAL.to_vec(),
            Self::Custom(colors) if colors.is_empty() => BLUES.to_vec(),
            Self::Custom(colors) => colors.iter().map(String::as_str).collect(),
        }
    }

    /// Color for `value` normalised against `[min, max]`.
    ///
    /// The index is proportional to the normalised value and clamped to the
    /// last band.
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> String {
        let colors = self.colors();
        let last = colors.len() - 1;
        let index = ((normalize(value, min, max) * last as f64).floor() as usize).min(last);
        colors[index].to_string()
    }

    /// Lowest band color
    pub fn lowest(&self) -> String {
        self.colors()[0].to_string()
    }
}

/// `value` mapped into `[0, 1]` against `[min, max]`; an empty range maps to 0
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() || !value.is_finite() {
        return 0.0;
    }
    ((value - min) / range).clamp(0.0, 1.0)
}

// ============================================================================
// GRID
// ============================================================================

/// One resolved grid position
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub col: usize,
    pub row: usize,
    pub x: String,
    pub y: String,
    pub value: f64,
    pub label: Option<String>,
    /// `false` when no input cell matched this position and it was zero-filled
    pub present: bool,
}

/// Dense heatmap grid built from sparse cells
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    pub xs: Vec<String>,
    pub ys: Vec<String>,
    pub cells: Vec<GridCell>,
    pub min: f64,
    pub max: f64,
}

impl HeatmapGrid {
    /// Build the grid from the distinct sorted x and y values.
    ///
    /// Positions without a matching cell are filled with value 0. When
    /// `min`/`max` are not given they come from the input values only.
    pub fn build(cells: &[HeatmapCell], min: Option<f64>, max: Option<f64>) -> Self {
        let xs: Vec<String> = cells
            .iter()
            .map(|c| c.x.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let ys: Vec<String> = cells
            .iter()
            .map(|c| c.y.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut lookup: HashMap<(&str, &str), &HeatmapCell> = HashMap::with_capacity(cells.len());
        for c in cells {
            lookup.entry((c.x.as_str(), c.y.as_str())).or_insert(c);
        }

        let finite = cells.iter().map(|c| c.value).filter(|v| v.is_finite());
        let data_min = finite.clone().fold(f64::INFINITY, f64::min);
        let data_max = finite.fold(f64::NEG_INFINITY, f64::max);
        let min = min.unwrap_or(if data_min.is_finite() { data_min } else { 0.0 });
        let max = max.unwrap_or(if data_max.is_finite() { data_max } else { 0.0 });

        let mut grid = Vec::with_capacity(xs.len() * ys.len());
        for (row, y) in ys.iter().enumerate() {
            for (col, x) in xs.iter().enumerate() {
                let found = lookup.get(&(x.as_str(), y.as_str()));
                grid.push(GridCell {
                    col,
                    row,
                    x: x.clone(),
                    y: y.clone(),
                    value: found.map_or(0.0, |c| c.value),
                    label: found.and_then(|c| c.label.clone()),
                    present: found.is_some(),
                });
            }
        }

        Self {
            xs,
            ys,
            cells: grid,
            min,
            max,
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&GridCell> {
        if col >= self.xs.len() {
            return None;
        }
        self.cells.get(row * self.xs.len() + col)
    }

    /// Color for a grid cell; zero-filled positions always take the lowest band
    pub fn color_of(&self, cell: &GridCell, ramp: &ColorRamp) -> String {
        if cell.present {
            ramp.color_for(cell.value, self.min, self.max)
        } else {
            ramp.lowest()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infers_min_max_and_fills_missing() {
        let cells = vec![
            HeatmapCell::new("a", "1", 10.0),
            HeatmapCell::new("b", "1", 20.0),
            HeatmapCell::new("b", "2", 15.0),
        ];
        let grid = HeatmapGrid::build(&cells, None, None);

        assert_eq!(grid.min, 10.0);
        assert_eq!(grid.max, 20.0);
        assert_eq!(grid.xs, vec!["a", "b"]);
        assert_eq!(grid.ys, vec!["1", "2"]);

        let missing = grid.cell(0, 1).unwrap();
        assert_eq!(missing.x, "a");
        assert_eq!(missing.y, "2");
        assert_eq!(missing.value, 0.0);
        assert!(!missing.present);
        assert_eq!(grid.color_of(missing, &ColorRamp::Blues), BLUES[0]);
    }

    #[test]
    fn test_explicit_bounds_override() {
        let cells = vec![HeatmapCell::new("a", "1", 10.0)];
        let grid = HeatmapGrid::build(&cells, Some(0.0), Some(100.0));
        assert_eq!((grid.min, grid.max), (0.0, 100.0));
    }

    #[test]
    fn test_ramp_index_clamped() {
        let ramp = ColorRamp::Reds;
        assert_eq!(ramp.color_for(20.0, 10.0, 20.0), REDS[4]);
        assert_eq!(ramp.color_for(500.0, 10.0, 20.0), REDS[4]);
        assert_eq!(ramp.color_for(10.0, 10.0, 20.0), REDS[0]);
        assert_eq!(ramp.color_for(-50.0, 10.0, 20.0), REDS[0]);
        assert_eq!(ramp.color_for(15.0, 10.0, 20.0), REDS[2]);
    }

    #[test]
    fn test_flat_range_uses_lowest_band() {
        assert_eq!(ColorRamp::Greens.color_for(5.0, 5.0, 5.0), GREENS[0]);
    }

    #[test]
    fn test_custom_ramp() {
        let ramp = ColorRamp::Custom(vec!["#000".into(), "#fff".into()]);
        assert_eq!(ramp.color_for(0.9, 0.0, 1.0), "#000");
        assert_eq!(ramp.color_for(1.0, 0.0, 1.0), "#fff");
        assert_eq!(ColorRamp::Custom(vec![]).lowest(), BLUES[0]);
    }

    #[test]
    fn test_named_ramp() {
        assert_eq!(ColorRamp::named("Thermal"), ColorRamp::Thermal);
        assert_eq!(ColorRamp::named("unknown"), ColorRamp::Blues);
    }

    #[test]
    fn test_duplicate_position_keeps_first_cell() {
        let cells = vec![
            HeatmapCell::new("mon", "09", 4.0),
            HeatmapCell::new("mon", "09", 9.0),
        ];
        let grid = HeatmapGrid::build(&cells, None, None);
        assert_eq!(grid.cells.len(), 1);
        assert_eq!(grid.cell(0, 0).unwrap().value, 4.0);
        assert_eq!(grid.max, 9.0);
    }

    #[test]
    fn test_empty_cells() {
        let grid = HeatmapGrid::build(&[], None, None);
        assert!(grid.cells.is_empty());
        assert_eq!((grid.min, grid.max), (0.0, 0.0));
    }
}
