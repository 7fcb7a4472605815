//! # cloud-charts
//!
//! Themed SVG charting layer for the Cloudboard dashboard, built with Leptos.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, band)
//! - Path generation (line, smooth, area, arcs)
//! - Artifact encoding and delivery for exports
//!
//! Every primitive computes a plain layout struct from its inputs first and
//! renders that, so the data-to-mark mapping is testable without a DOM.
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, paths, arcs, formatters
//! - `theme` - Light/dark style resolver shared by every chart
//! - `series` - Category/series mapping shared by line, bar and area charts
//! - `axis` - Grid, axes, legend and tooltip pieces
//! - `line`, `bar`, `area`, `pie` - Cartesian and radial primitives
//! - `gauge`, `heatmap`, `timeline` - Specialised visuals
//! - `sparkline` - Axis-free trend line for metric cards
//! - `container` - Titled card shell with optional export menu
//! - `export` - PNG/SVG/PDF export pipeline

pub mod area;
pub mod axis;
pub mod bar;
pub mod chartkit;
pub mod container;
pub mod export;
pub mod gauge;
pub mod heatmap;
pub mod line;
pub mod pie;
pub mod series;
pub mod sparkline;
pub mod theme;
pub mod timeline;

pub use area::*;
pub use bar::*;
pub use chartkit::*;
pub use container::*;
pub use export::*;
pub use gauge::*;
pub use heatmap::*;
pub use line::*;
pub use pie::*;
pub use series::*;
pub use sparkline::*;
pub use theme::*;
pub use timeline::*;

// Re-export colors from cloud-core for convenience
pub use cloud_core::colors;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Compact margins for small widgets
    pub const fn compact() -> Self {
        Self::new(4.0, 4.0, 4.0, 4.0)
    }

    /// Standard chart margins (room for left value axis and bottom categories)
    pub const fn standard() -> Self {
        Self::new(20.0, 30.0, 30.0, 50.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margin.left, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(600.0, 300.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_area() {
        let dims = ChartDimensions::new(600.0, 300.0).with_margin(ChartMargin::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(dims.inner_width(), 540.0);
        assert_eq!(dims.inner_height(), 260.0);
        assert_eq!(dims.inner_transform(), "translate(40, 10)");
        assert_eq!(dims.viewbox(), "0 0 600 300");
    }

    #[test]
    fn test_inner_area_never_negative() {
        let dims = ChartDimensions::new(20.0, 10.0);
        assert_eq!(dims.inner_width(), 0.0);
        assert_eq!(dims.inner_height(), 0.0);
    }
}
