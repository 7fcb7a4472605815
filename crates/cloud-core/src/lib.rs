//! # cloud-core
//!
//! Core domain types for the Cloudboard chart and widget layer.
//! Implements Strategy pattern for value formatting.

pub mod datum;
pub mod heatmap;
pub mod status;
pub mod threshold;
pub mod timeline;

pub use datum::*;
pub use heatmap::*;
pub use status::*;
pub use threshold::*;
pub use timeline::*;

use std::sync::Arc;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for turning a plotted number into display text
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Closures work as formatters directly
impl<F> ValueFormatter for F
where
    F: Fn(f64) -> String + Send + Sync,
{
    fn format(&self, value: f64) -> String {
        self(value)
    }
}

/// Shared, cloneable formatter handle passed through component props
pub type SharedFormatter = Arc<dyn ValueFormatter>;

/// Wrap a closure or formatter into a [`SharedFormatter`]
pub fn formatter<F: ValueFormatter + 'static>(f: F) -> SharedFormatter {
    Arc::new(f)
}

/// Fixed-decimals formatter
#[derive(Debug, Clone)]
pub struct DecimalFormatter {
    pub decimals: usize,
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl ValueFormatter for DecimalFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.decimals)
    }
}

/// Compact formatter for large numbers (K, M, B suffixes)
#[derive(Debug, Clone, Default)]
pub struct CompactNumberFormatter;

impl ValueFormatter for CompactNumberFormatter {
    fn format(&self, num: f64) -> String {
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
}

/// Currency formatter used by the cost views
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    pub symbol: &'static str,
    pub decimals: usize,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self {
            symbol: "$",
            decimals: 2,
        }
    }
}

impl ValueFormatter for CurrencyFormatter {
    fn format(&self, value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { "" };
        format!(
            "{}{}{:.prec$}",
            sign,
            self.symbol,
            value.abs(),
            prec = self.decimals
        )
    }
}

/// Percentage formatter (input already in 0..=100)
#[derive(Debug, Clone)]
pub struct PercentFormatter {
    pub decimals: usize,
}

impl Default for PercentFormatter {
    fn default() -> Self {
        Self { decimals: 1 }
    }
}

impl ValueFormatter for PercentFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.prec$}%", value, prec = self.decimals)
    }
}

// ============================================================================
// PERCENTAGES
// ============================================================================

/// Share of `part` in `total` as a percentage in `[0, 100]`.
///
/// A zero (or non-finite) total yields 0 rather than NaN/Infinity.
pub fn percent_of(part: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() || !part.is_finite() {
        return 0.0;
    }
    (part / total * 100.0).clamp(0.0, 100.0)
}

/// Position of `value` inside `[min, max]` as a percentage in `[0, 100]`.
///
/// An empty range yields 0.
pub fn percent_in_range(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 || !range.is_finite() || !value.is_finite() {
        return 0.0;
    }
    ((value - min) / range * 100.0).clamp(0.0, 100.0)
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const PRIMARY: &str = "#3b82f6";
    pub const SUCCESS: &str = "#22c55e";
    pub const DANGER: &str = "#ef4444";
    pub const WARN: &str = "#f59e0b";
    pub const INFO: &str = "#0ea5e9";
    pub const NEUTRAL: &str = "#6b7280";
    pub const MAINTENANCE: &str = "#8b5cf6";

    pub const BG_DARK: &str = "#111827";
    pub const BG_PANEL_DARK: &str = "#1f2937";
    pub const BORDER_DARK: &str = "#374151";
    pub const TEXT_DARK: &str = "#f9fafb";
    pub const TEXT_MUTED_DARK: &str = "#9ca3af";
    pub const GRID_DARK: &str = "#374151";

    pub const BG_LIGHT: &str = "#f9fafb";
    pub const BG_PANEL_LIGHT: &str = "#ffffff";
    pub const BORDER_LIGHT: &str = "#e5e7eb";
    pub const TEXT_LIGHT: &str = "#111827";
    pub const TEXT_MUTED_LIGHT: &str = "#6b7280";
    pub const GRID_LIGHT: &str = "#e5e7eb";

    /// Rotating series palette
    pub const PALETTE: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

    /// Palette color for a series index; wraps around deterministically.
    pub fn palette_color(index: usize) -> &'static str {
        PALETTE[index % PALETTE.len()]
    }

    /// `#rrggbb` to `rgba(r, g, b, a)`; other inputs are returned unchanged.
    pub fn with_alpha(hex: &str, alpha: f64) -> String {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 {
            return hex.to_string();
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match (channel(0), channel(2), channel(4)) {
            (Some(r), Some(g), Some(b)) => {
                format!("rgba({}, {}, {}, {:.2})", r, g, b, alpha.clamp(0.0, 1.0))
            }
            _ => hex.to_string(),
        }
    }
}
