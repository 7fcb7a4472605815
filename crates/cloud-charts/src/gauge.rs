//! Semicircular gauge with threshold colouring

use crate::{
    chartkit::{arc_path, format_percent, polar},
    colors,
    container::titled,
    theme::ThemeConfig,
};
use cloud_core::{percent_in_range, SharedFormatter, Threshold, ThresholdSet, ValueFormatter};
use leptos::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

/// Fixed gauge sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaugeSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl GaugeSize {
    pub fn radius(&self) -> f64 {
        match self {
            Self::Sm => 60.0,
            Self::Md => 80.0,
            Self::Lg => 100.0,
        }
    }

    pub fn stroke_width(&self) -> f64 {
        match self {
            Self::Sm => 8.0,
            Self::Md => 12.0,
            Self::Lg => 16.0,
        }
    }

    pub fn value_font_size(&self) -> f64 {
        match self {
            Self::Sm => 18.0,
            Self::Md => 24.0,
            Self::Lg => 30.0,
        }
    }
}

/// Inputs for one gauge render
#[derive(Clone)]
pub struct GaugeSpec<'a> {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub thresholds: &'a ThresholdSet,
    pub size: GaugeSize,
    pub default_color: &'a str,
    pub unit: Option<&'a str>,
    pub value_formatter: Option<&'a SharedFormatter>,
    pub percent_formatter: Option<&'a SharedFormatter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeLayout {
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub stroke_width: f64,
    pub percentage: f64,
    pub color: String,
    pub track: String,
    pub arc: String,
    /// Tick endpoints and colour for each threshold inside `[min, max]`
    pub markers: Vec<((f64, f64), (f64, f64), String)>,
    pub value_text: String,
    pub percent_text: String,
}

/// Angle along the 180° arc for a percentage, clockwise from 9 o'clock
fn arc_angle(percentage: f64) -> f64 {
    -FRAC_PI_2 + PI * percentage / 100.0
}

pub fn gauge_layout(spec: &GaugeSpec<'_>) -> GaugeLayout {
    let radius = spec.size.radius();
    let stroke_width = spec.size.stroke_width();
    let width = 2.0 * radius + stroke_width + 8.0;
    let cx = width / 2.0;
    let cy = radius + stroke_width / 2.0 + 4.0;
    let height = cy + 8.0;

    let percentage = percent_in_range(spec.value, spec.min, spec.max);
    let color = spec.thresholds.active_color(spec.value, spec.default_color).to_string();

    let markers = spec
        .thresholds
        .ascending()
        .filter(|t| t.value >= spec.min && t.value <= spec.max)
        .map(|t| {
            let angle = arc_angle(percent_in_range(t.value, spec.min, spec.max));
            (
                polar(cx, cy, radius - stroke_width / 2.0 - 2.0, angle),
                polar(cx, cy, radius + stroke_width / 2.0 + 2.0, angle),
                t.color.clone(),
            )
        })
        .collect();

    let value_text = {
        let base = spec.value_formatter.map_or_else(|| format!("{:.0}", spec.value), |f| f.format(spec.value));
        match spec.unit {
            Some(unit) => format!("{}{}", base, unit),
            None => base,
        }
    };
    let percent_text = spec.percent_formatter.map_or_else(|| format_percent(percentage), |f| f.format(percentage));

    GaugeLayout {
        width,
        height,
        cx,
        cy,
        radius,
        stroke_width,
        percentage,
        color,
        track: arc_path(cx, cy, radius, arc_angle(0.0), arc_angle(100.0)),
        arc: arc_path(cx, cy, radius, arc_angle(0.0), arc_angle(percentage)),
        markers,
        value_text,
        percent_text,
    }
}

#[component]
pub fn GaugeChart(
    #[prop(into)] value: Signal<f64>,
    #[prop(default = 0.0)] min: f64,
    #[prop(default = 100.0)] max: f64,
    #[prop(optional)] thresholds: Vec<Threshold>,
    #[prop(optional)] size: GaugeSize,
    #[prop(optional, into)] color: Option<String>,
    #[prop(optional)] value_formatter: Option<SharedFormatter>,
    #[prop(optional)] percent_formatter: Option<SharedFormatter>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] unit: Option<String>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    let thresholds = StoredValue::new(ThresholdSet::new(thresholds));
    let default_color = StoredValue::new(color.unwrap_or_else(|| colors::PRIMARY.to_string()));
    let formatters = StoredValue::new((value_formatter, percent_formatter, unit));

    let layout = Memo::new(move |_| {
        let value = value.get();
        thresholds.with_value(|set| {
            default_color.with_value(|fallback| {
                formatters.with_value(|(value_fmt, percent_fmt, unit)| {
                    gauge_layout(&GaugeSpec {
                        value,
                        min,
                        max,
                        thresholds: set,
                        size,
                        default_color: fallback,
                        unit: unit.as_deref(),
                        value_formatter: value_fmt.as_ref(),
                        percent_formatter: percent_fmt.as_ref(),
                    })
                })
            })
        })
    });

    let font_size = size.value_font_size();

    let gauge = move || {
        let theme = ThemeConfig::tracked(dark);
        layout.with(|l| {
            let markers = l
                .markers
                .iter()
                .map(|((x1, y1), (x2, y2), color)| {
                    let (x1, y1, x2, y2) = (*x1, *y1, *x2, *y2);
                    view! { <line x1=x1 y1=y1 x2=x2 y2=y2 stroke=color.clone() stroke-width="2" /> }
                })
                .collect_view();

            view! {
                <svg
                    viewBox=format!("0 0 {} {}", l.width, l.height)
                    preserveAspectRatio="xMidYMid meet"
                    style=format!("width: 100%; max-width: {}px; display: block; margin: 0 auto;", l.width)
                >
                    <path
                        d=l.track.clone()
                        fill="none"
                        stroke=theme.grid.stroke
                        stroke-width=l.stroke_width
                        stroke-linecap="round"
                    />
                    <path
                        class="gauge-value"
                        d=l.arc.clone()
                        fill="none"
                        stroke=l.color.clone()
                        stroke-width=l.stroke_width
                        stroke-linecap="round"
                    />
                    {markers}
                    <text
                        x=l.cx
                        y={l.cy - 8.0}
                        text-anchor="middle"
                        fill=theme.text
                        font-size=font_size
                        font-weight="600"
                    >
                        {l.value_text.clone()}
                    </text>
                </svg>
                <div class="gauge-caption" style=format!("text-align: center; font-size: 12px; color: {};", theme.text_muted)>
                    {l.percent_text.clone()}
                </div>
            }
        })
    };

    let caption = label.map(|text| {
        view! {
            <div
                class="gauge-label"
                style=move || format!("text-align: center; font-size: 14px; margin-top: 4px; color: {};", ThemeConfig::tracked(dark).text)
            >
                {text}
            </div>
        }
    });

    let chart = view! {
        <div class="chart gauge-chart" style="width: 100%;">
            {gauge}
            {caption}
        </div>
    }
    .into_any();

    titled(title, dark, chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_core::formatter;

    fn layout_for(value: f64, min: f64, max: f64, thresholds: &ThresholdSet) -> GaugeLayout {
        gauge_layout(&GaugeSpec {
            value,
            min,
            max,
            thresholds,
            size: GaugeSize::Md,
            default_color: "fallback",
            unit: None,
            value_formatter: None,
            percent_formatter: None,
        })
    }

    fn abc() -> ThresholdSet {
        ThresholdSet::new(vec![
            Threshold::new(0.0, "A"),
            Threshold::new(50.0, "B"),
            Threshold::new(80.0, "C"),
        ])
    }

    #[test]
    fn test_threshold_colour_selection() {
        let set = abc();
        assert_eq!(layout_for(65.0, 0.0, 100.0, &set).color, "B");
        assert_eq!(layout_for(95.0, 0.0, 100.0, &set).color, "C");
        assert_eq!(layout_for(-5.0, 0.0, 100.0, &set).color, "fallback");
        assert_eq!(layout_for(10.0, 0.0, 100.0, &ThresholdSet::default()).color, "fallback");
    }

    #[test]
    fn test_percentage_clamped_and_guarded() {
        let set = ThresholdSet::default();
        assert_eq!(layout_for(150.0, 0.0, 100.0, &set).percentage, 100.0);
        assert_eq!(layout_for(-20.0, 0.0, 100.0, &set).percentage, 0.0);
        assert_eq!(layout_for(5.0, 5.0, 5.0, &set).percentage, 0.0);
        assert_eq!(layout_for(30.0, 20.0, 40.0, &set).percentage, 50.0);
    }

    #[test]
    fn test_sizes_map_to_radii() {
        assert_eq!(GaugeSize::Sm.radius(), 60.0);
        assert_eq!(GaugeSize::Md.radius(), 80.0);
        assert_eq!(GaugeSize::Lg.radius(), 100.0);
    }

    #[test]
    fn test_arc_spans_half_circle() {
        let l = layout_for(100.0, 0.0, 100.0, &ThresholdSet::default());
        assert_eq!(l.arc, l.track);
        assert!(layout_for(0.0, 0.0, 100.0, &ThresholdSet::default()).arc.is_empty());

        // half way ends straight above the centre
        let (x, y) = polar(l.cx, l.cy, l.radius, arc_angle(50.0));
        assert!((x - l.cx).abs() < 1e-9);
        assert!((y - (l.cy - l.radius)).abs() < 1e-9);
    }

    #[test]
    fn test_markers_inside_range_only() {
        let set = ThresholdSet::new(vec![Threshold::new(50.0, "B"), Threshold::new(500.0, "Z")]);
        assert_eq!(layout_for(10.0, 0.0, 100.0, &set).markers.len(), 1);
    }

    #[test]
    fn test_formatters_and_unit() {
        let set = ThresholdSet::default();
        let value_fmt = formatter(|v: f64| format!("{v:.1}"));
        let pct_fmt = formatter(|p: f64| format!("{p:.0} pct"));
        let l = gauge_layout(&GaugeSpec {
            value: 42.0,
            min: 0.0,
            max: 200.0,
            thresholds: &set,
            size: GaugeSize::Lg,
            default_color: colors::PRIMARY,
            unit: Some("ms"),
            value_formatter: Some(&value_fmt),
            percent_formatter: Some(&pct_fmt),
        });
        assert_eq!(l.value_text, "42.0ms");
        assert_eq!(l.percent_text, "21 pct");
    }
}
