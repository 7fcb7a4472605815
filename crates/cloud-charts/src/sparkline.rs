//! Sparklines for compact inline trends
//!
//! Axis-free filled line used inside metric cards.

use crate::{
    chartkit::{area_path, line_path, LinearScale, Scale},
    colors,
};
use leptos::prelude::*;

#[derive(Debug, Clone)]
pub struct SparklineConfig {
    pub width: f64,
    pub height: f64,
    pub stroke_width: f64,
    pub fill: bool,
    pub show_endpoint: bool,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 32.0,
            stroke_width: 1.5,
            fill: true,
            show_endpoint: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SparklineLayout {
    pub line: String,
    pub area: String,
    pub endpoint: (f64, f64),
    pub rising: bool,
}

/// Layout for a run of values; `None` below two finite points.
pub fn sparkline_layout(values: &[f64], config: &SparklineConfig) -> Option<SparklineLayout> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.len() < 2 {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let padding = if range > 0.0 { range * 0.1 } else { 1.0 };

    let (w, h) = (config.width, config.height);
    let y_scale = LinearScale::new().domain(min - padding, max + padding).range(h - 2.0, 2.0);
    let x_step = (w - 4.0) / (values.len() - 1) as f64;

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (2.0 + i as f64 * x_step, y_scale.scale(v)))
        .collect();
    let endpoint = *points.last()?;

    Some(SparklineLayout {
        line: line_path(&points),
        area: area_path(&points, h - 2.0),
        endpoint,
        rising: values.last() >= values.first(),
    })
}

#[component]
pub fn Sparkline(
    #[prop(into)] values: Signal<Vec<f64>>,
    #[prop(optional)] config: Option<SparklineConfig>,
    #[prop(optional, into)] color: Option<String>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let (w, h) = (config.width, config.height);
    let stroke_width = config.stroke_width;
    let (fill, show_endpoint) = (config.fill, config.show_endpoint);
    let config = StoredValue::new(config);
    let color = StoredValue::new(color);

    let body = move || {
        let layout = values.with(|v| config.with_value(|c| sparkline_layout(v, c)))?;
        let stroke = color.get_value().unwrap_or_else(|| {
            let trend = if layout.rising { colors::SUCCESS } else { colors::DANGER };
            trend.to_string()
        });
        let area = fill.then(|| view! { <path d=layout.area fill=colors::with_alpha(&stroke, 0.2) stroke="none" /> });
        let (x, y) = layout.endpoint;
        let dot = show_endpoint.then(|| view! { <circle cx=x cy=y r="2.5" fill=stroke.clone() /> });

        Some(view! {
            {area}
            <path
                d=layout.line
                fill="none"
                stroke=stroke.clone()
                stroke-width=stroke_width
                stroke-linecap="round"
                stroke-linejoin="round"
            />
            {dot}
        })
    };

    view! {
        <svg class="sparkline" viewBox=format!("0 0 {} {}", w, h) preserveAspectRatio="none" style="width: 100%; height: 100%;">
            {body}
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_two_points() {
        let config = SparklineConfig::default();
        assert!(sparkline_layout(&[], &config).is_none());
        assert!(sparkline_layout(&[1.0, f64::NAN], &config).is_none());
    }

    #[test]
    fn test_direction_and_endpoint() {
        let config = SparklineConfig::default();
        let up = sparkline_layout(&[1.0, 3.0, 2.0, 4.0, 5.0], &config).unwrap();
        assert!(up.rising);
        assert_eq!(up.endpoint.0, 118.0);

        let down = sparkline_layout(&[5.0, 1.0], &config).unwrap();
        assert!(!down.rising);
    }

    #[test]
    fn test_flat_series_is_centred() {
        let layout = sparkline_layout(&[4.0, 4.0, 4.0], &SparklineConfig::default()).unwrap();
        assert!((layout.endpoint.1 - 16.0).abs() < 1e-9);
    }
}
