//! # chartkit
//!
//! Core chart primitives: scales, path builders, arcs, axis formatters.
//! Implements Strategy pattern for flexible scale and rendering behaviors.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Get range bounds
    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Generate "nice" tick values (rounded to clean numbers)
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let range = max - min;

        if range == 0.0 || count == 0 || !range.is_finite() {
            return vec![min];
        }

        let step = nice_step(range, count);
        let nice_min = (min / step).floor() * step;
        let nice_max = (max / step).ceil() * step;

        let mut ticks = Vec::new();
        let mut tick = nice_min;

        while tick <= nice_max + step * 0.5 {
            if tick >= min - step * 1e-9 && tick <= max + step * 1e-9 {
                // Snap values like 0.30000000000000004
                ticks.push((tick / step).round() * step);
            }
            tick += step;
        }

        ticks
    }

    /// Widen the domain outward to multiples of a nice step
    pub fn nice(mut self, count: usize) -> Self {
        let (min, max) = self.domain;
        let range = max - min;
        if range > 0.0 && range.is_finite() && count > 0 {
            let step = nice_step(range, count);
            self.domain = ((min / step).floor() * step, (max / step).ceil() * step);
        }
        self
    }
}

fn nice_step(range: f64, count: usize) -> f64 {
    let rough_step = range / count as f64;
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    if residual <= 1.0 {
        magnitude
    } else if residual <= 2.0 {
        2.0 * magnitude
    } else if residual <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let mut normalized = (value - d_min) / (d_max - d_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count <= 1 {
            return vec![min];
        }

        let step = (max - min) / (count - 1) as f64;
        (0..count).map(|i| min + step * i as f64).collect()
    }
}

// ============================================================================
// BAND SCALE (categorical x positions)
// ============================================================================

/// Band scale for categorical data (bars, line points at band centers)
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain_count: usize,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(count: usize) -> Self {
        Self {
            domain_count: count,
            range: (0.0, 1.0),
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.clamp(0.0, 1.0);
        self
    }

    pub fn padding_uniform(self, padding: f64) -> Self {
        self.padding(padding, padding)
    }

    pub fn count(&self) -> usize {
        self.domain_count
    }

    /// Get step size (band + gap)
    pub fn step(&self) -> f64 {
        if self.domain_count == 0 {
            return 0.0;
        }

        let (r_min, r_max) = self.range;
        let n = self.domain_count as f64;
        (r_max - r_min) / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Get band width (width of each bar)
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Get start position for index
    pub fn scale(&self, index: usize) -> f64 {
        if self.domain_count == 0 {
            return self.range.0;
        }

        let step = self.step();
        self.range.0 + self.padding_outer * step + index as f64 * step
    }

    /// Get center position for index
    pub fn scale_center(&self, index: usize) -> f64 {
        self.scale(index) + self.bandwidth() / 2.0
    }

    /// Index of the band whose center is nearest to `x`
    pub fn index_at(&self, x: f64) -> Option<usize> {
        if self.domain_count == 0 {
            return None;
        }
        let step = self.step();
        if step <= 0.0 {
            return Some(0);
        }
        let first_center = self.scale_center(0);
        let raw = ((x - first_center) / step).round();
        Some((raw.max(0.0) as usize).min(self.domain_count - 1))
    }
}

impl Default for BandScale {
    fn default() -> Self {
        Self::new(10)
    }
}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Straight-segment line path generator
#[derive(Debug, Clone, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some(&(x, y)) = points.first() else {
            return String::new();
        };

        let mut path = String::with_capacity(points.len() * 20);
        let _ = write!(path, "M{:.2},{:.2}", x, y);

        for &(x, y) in &points[1..] {
            let _ = write!(path, "L{:.2},{:.2}", x, y);
        }

        path
    }
}

/// Monotone-ish smoothing: cubic segments with horizontal control points
#[derive(Debug, Clone, Default)]
pub struct SmoothPath;

impl PathGenerator for SmoothPath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some(&(x, y)) = points.first() else {
            return String::new();
        };

        let mut builder = PathBuilder::new().move_to(x, y);
        for pair in points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            let mid_x = (x0 + x1) / 2.0;
            builder = builder.cubic_to(mid_x, y0, mid_x, y1, x1, y1);
        }
        builder.build()
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn cubic_to(mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        let _ = write!(
            self.commands,
            "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            x1, y1, x2, y2, x, y
        );
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        let _ = write!(
            self.commands,
            "A{:.2},{:.2},{:.2},{},{},{:.2},{:.2}",
            rx, ry, rotation, large_arc as u8, sweep as u8, x, y
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// AREA PATHS
// ============================================================================

/// Generate closed area path with a flat baseline
pub fn area_path(points: &[(f64, f64)], baseline_y: f64) -> String {
    let lower: Vec<(f64, f64)> = points.iter().map(|&(x, _)| (x, baseline_y)).collect();
    band_path(points, &lower)
}

/// Closed path between an upper and a lower edge (stacked areas).
///
/// Both edges share x positions; the lower edge is walked backwards.
pub fn band_path(upper: &[(f64, f64)], lower: &[(f64, f64)]) -> String {
    let Some(&(x0, y0)) = upper.first() else {
        return String::new();
    };

    let mut builder = PathBuilder::new().move_to(x0, y0);
    for &(x, y) in &upper[1..] {
        builder = builder.line_to(x, y);
    }
    for &(x, y) in lower.iter().rev() {
        builder = builder.line_to(x, y);
    }
    builder.close().build()
}

/// Generate line path (non-closed)
pub fn line_path(points: &[(f64, f64)]) -> String {
    LinePath.generate(points)
}

// ============================================================================
// ARCS
// ============================================================================

/// Point on a circle; angle in radians, clockwise from 12 o'clock
pub fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}

/// Open arc (for stroked gauge tracks)
pub fn arc_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let sweep = (end - start).clamp(0.0, TAU - 1e-6);
    if sweep <= 0.0 || r <= 0.0 {
        return String::new();
    }
    let (x0, y0) = polar(cx, cy, r, start);
    let (x1, y1) = polar(cx, cy, r, start + sweep);
    PathBuilder::new()
        .move_to(x0, y0)
        .arc_to(r, r, 0.0, sweep > PI, true, x1, y1)
        .build()
}

/// Filled pie / donut slice between two angles.
///
/// A full circle is drawn as two half arcs since a single SVG arc with equal
/// endpoints renders nothing.
pub fn slice_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    let sweep = (end - start).max(0.0);
    if sweep <= 0.0 || outer <= 0.0 {
        return String::new();
    }

    if sweep >= TAU - 1e-9 {
        let mid = start + PI;
        let (ox0, oy0) = polar(cx, cy, outer, start);
        let (ox1, oy1) = polar(cx, cy, outer, mid);
        let mut builder = PathBuilder::new()
            .move_to(ox0, oy0)
            .arc_to(outer, outer, 0.0, false, true, ox1, oy1)
            .arc_to(outer, outer, 0.0, false, true, ox0, oy0);
        if inner > 0.0 {
            let (ix0, iy0) = polar(cx, cy, inner, start);
            let (ix1, iy1) = polar(cx, cy, inner, mid);
            builder = builder
                .close()
                .move_to(ix0, iy0)
                .arc_to(inner, inner, 0.0, false, false, ix1, iy1)
                .arc_to(inner, inner, 0.0, false, false, ix0, iy0);
        }
        return builder.close().build();
    }

    let large = sweep > PI;
    let (ox0, oy0) = polar(cx, cy, outer, start);
    let (ox1, oy1) = polar(cx, cy, outer, end);
    let builder = PathBuilder::new()
        .move_to(ox0, oy0)
        .arc_to(outer, outer, 0.0, large, true, ox1, oy1);

    let builder = if inner > 0.0 {
        let (ix1, iy1) = polar(cx, cy, inner, end);
        let (ix0, iy0) = polar(cx, cy, inner, start);
        builder
            .line_to(ix1, iy1)
            .arc_to(inner, inner, 0.0, large, false, ix0, iy0)
    } else {
        builder.line_to(cx, cy)
    };

    builder.close().build()
}

// ============================================================================
// FORMATTERS
// ============================================================================

/// Format large numbers with K/M/B suffixes
pub fn format_large_number(num: f64) -> String {
    let abs = num.abs();
    let sign = if num < 0.0 { "-" } else { "" };

    if abs >= 1_000_000_000.0 {
        format!("{}{:.2}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}{:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{:.2}K", sign, abs / 1_000.0)
    } else {
        format!("{}{:.2}", sign, abs)
    }
}

/// Compact axis tick label (fewer decimals than tooltips)
pub fn format_tick(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{}{}M", sign, trim_zeros(abs / 1_000_000.0))
    } else if abs >= 1_000.0 {
        format!("{}{}K", sign, trim_zeros(abs / 1_000.0))
    } else {
        format!("{}{}", sign, trim_zeros(abs))
    }
}

fn trim_zeros(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format a percentage in 0..=100
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.invert(250.0), 50.0);
    }

    #[test]
    fn test_nice_domain() {
        let scale = LinearScale::new().domain(3.0, 97.0).nice(5);
        assert_eq!(scale.domain_bounds(), (0.0, 100.0));
        assert_eq!(scale.nice_ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_band_scale() {
        let scale = BandScale::new(5).range(0.0, 100.0);
        let bw = scale.bandwidth();
        assert!(bw > 0.0);
        assert!(bw < 20.0);
        let last_end = scale.scale(4) + bw;
        assert!(last_end <= 100.0 + 1e-9);
    }

    #[test]
    fn test_band_index_at() {
        let scale = BandScale::new(4).range(0.0, 400.0).padding(0.2, 0.1);
        for i in 0..4 {
            assert_eq!(scale.index_at(scale.scale_center(i)), Some(i));
        }
        assert_eq!(scale.index_at(-50.0), Some(0));
        assert_eq!(scale.index_at(1_000.0), Some(3));
        assert_eq!(BandScale::new(0).index_at(10.0), None);
    }

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.0)
            .close()
            .build();

        assert!(path.contains("M0.00,0.00"));
        assert!(path.contains("L100.00,100.00"));
        assert!(path.contains("Z"));
    }

    #[test]
    fn test_line_path_generator() {
        let generator = LinePath;
        let path = generator.generate(&[(0.0, 0.0), (50.0, 50.0), (100.0, 0.0)]);

        assert!(path.starts_with("M0.00,0.00"));
        assert!(path.contains("L50.00,50.00"));
        assert_eq!(generator.generate(&[]), "");
    }

    #[test]
    fn test_band_path_walks_lower_edge_backwards() {
        let path = band_path(&[(0.0, 10.0), (10.0, 5.0)], &[(0.0, 20.0), (10.0, 15.0)]);
        assert_eq!(path, "M0.00,10.00L10.00,5.00L10.00,15.00L0.00,20.00Z");
    }

    #[test]
    fn test_slice_path_full_circle_not_empty() {
        let path = slice_path(50.0, 50.0, 40.0, 0.0, 0.0, TAU);
        assert_eq!(path.matches('A').count(), 2);
        assert!(slice_path(50.0, 50.0, 40.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_polar_top_and_right() {
        let (x, y) = polar(0.0, 0.0, 10.0, 0.0);
        assert!((x - 0.0).abs() < 1e-9 && (y + 10.0).abs() < 1e-9);
        let (x, y) = polar(0.0, 0.0, 10.0, PI / 2.0);
        assert!((x - 10.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(1_500_000.0), "1.50M");
        assert_eq!(format_large_number(2_500.0), "2.50K");
        assert_eq!(format_large_number(500.0), "500.00");
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2_000.0), "2K");
        assert_eq!(format_tick(2_500.0), "2.5K");
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-40.0), "-40");
    }
}
