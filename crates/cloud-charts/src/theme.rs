//! Light/dark style resolver shared by every chart primitive

use crate::{colors, ChartMargin};
use leptos::prelude::*;

/// Grid line style
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub stroke: &'static str,
    pub dash: &'static str,
    pub opacity: f64,
}

/// Axis tick label style
#[derive(Debug, Clone, PartialEq)]
pub struct TickStyle {
    pub fill: &'static str,
    pub font_size: f64,
    pub line: &'static str,
}

/// Tooltip box style
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipStyle {
    pub background: &'static str,
    pub border: &'static str,
    pub radius: f64,
    pub shadow: &'static str,
    pub text: &'static str,
}

/// Point marker style for line/area series
#[derive(Debug, Clone, PartialEq)]
pub struct DotStyle {
    pub radius: f64,
    pub active_radius: f64,
    pub active_stroke: &'static str,
    pub active_stroke_width: f64,
}

/// Derived, read-only style configuration for one render
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub dark: bool,
    pub grid: GridStyle,
    pub x_tick: TickStyle,
    pub y_tick: TickStyle,
    pub tooltip: TooltipStyle,
    pub stroke_width: f64,
    pub margin: ChartMargin,
    pub dot: DotStyle,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub panel_background: &'static str,
    pub border: &'static str,
}

impl ThemeConfig {
    /// Resolve the chart style for a dark-mode flag. Total: every field is set
    /// for either value.
    pub fn resolve(dark: bool) -> Self {
        let (grid, tick, muted, text, panel, border, tooltip_bg, shadow) = if dark {
            (
                colors::GRID_DARK,
                colors::TEXT_MUTED_DARK,
                colors::TEXT_MUTED_DARK,
                colors::TEXT_DARK,
                colors::BG_PANEL_DARK,
                colors::BORDER_DARK,
                colors::BG_PANEL_DARK,
                "0 4px 6px -1px rgba(0, 0, 0, 0.5)",
            )
        } else {
            (
                colors::GRID_LIGHT,
                colors::TEXT_MUTED_LIGHT,
                colors::TEXT_MUTED_LIGHT,
                colors::TEXT_LIGHT,
                colors::BG_PANEL_LIGHT,
                colors::BORDER_LIGHT,
                colors::BG_PANEL_LIGHT,
                "0 4px 6px -1px rgba(0, 0, 0, 0.1)",
            )
        };

        let tick_style = TickStyle {
            fill: tick,
            font_size: 12.0,
            line: border,
        };

        Self {
            dark,
            grid: GridStyle {
                stroke: grid,
                dash: "3 3",
                opacity: if dark { 0.6 } else { 1.0 },
            },
            x_tick: tick_style.clone(),
            y_tick: tick_style,
            tooltip: TooltipStyle {
                background: tooltip_bg,
                border,
                radius: 8.0,
                shadow,
                text,
            },
            stroke_width: 2.0,
            margin: ChartMargin::standard(),
            dot: DotStyle {
                radius: 4.0,
                active_radius: 6.0,
                active_stroke: panel,
                active_stroke_width: 2.0,
            },
            text,
            text_muted: muted,
            panel_background: panel,
            border,
        }
    }

    /// Resolve from an optional dark-mode signal, tracking it when present
    pub fn tracked(dark: Option<Signal<bool>>) -> Self {
        Self::resolve(dark.is_some_and(|d| d.get()))
    }

    /// Tooltip box as inline CSS
    pub fn tooltip_style(&self) -> String {
        format!(
            "background-color: {}; border: 1px solid {}; border-radius: {}px; box-shadow: {}; color: {}; padding: 8px 10px; font-size: 12px; pointer-events: none;",
            self.tooltip.background,
            self.tooltip.border,
            self.tooltip.radius,
            self.tooltip.shadow,
            self.tooltip.text,
        )
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::resolve(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_and_light_differ() {
        let dark = ThemeConfig::resolve(true);
        let light = ThemeConfig::resolve(false);

        assert_ne!(dark.grid.stroke, light.grid.stroke);
        assert_ne!(dark.tooltip.background, light.tooltip.background);
        assert_eq!(dark.stroke_width, light.stroke_width);
        assert_eq!(dark.margin, light.margin);
        assert_eq!(dark.x_tick.font_size, 12.0);
    }

    #[test]
    fn test_resolve_is_pure() {
        assert_eq!(ThemeConfig::resolve(true), ThemeConfig::resolve(true));
        assert_eq!(ThemeConfig::default(), ThemeConfig::resolve(false));
    }

    #[test]
    fn test_tooltip_style_css() {
        let css = ThemeConfig::resolve(true).tooltip_style();
        assert!(css.contains(colors::BG_PANEL_DARK));
        assert!(css.contains("border-radius: 8px"));
    }
}
