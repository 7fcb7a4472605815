//! Grid, axes, legend and tooltip pieces shared by the cartesian charts

use crate::{
    chartkit::format_tick,
    series::{CartesianFrame, TooltipContent},
    theme::ThemeConfig,
};
use cloud_core::{SharedFormatter, ValueFormatter};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Horizontal grid lines at the given y positions
#[component]
pub fn ChartGrid(width: f64, y_positions: Vec<f64>, theme: ThemeConfig) -> impl IntoView {
    let stroke = theme.grid.stroke;
    let dash = theme.grid.dash;
    let opacity = theme.grid.opacity;

    view! {
        <g class="chart-grid">
            {y_positions.into_iter().map(|y| {
                view! {
                    <line
                        x1="0" y1=y
                        x2=width y2=y
                        stroke=stroke
                        stroke-width="1"
                        stroke-dasharray=dash
                        opacity=opacity
                    />
                }
            }).collect_view()}
        </g>
    }
}

/// Left value axis
#[component]
pub fn ValueAxis(
    height: f64,
    ticks: Vec<(f64, f64)>,
    theme: ThemeConfig,
    formatter: Option<SharedFormatter>,
) -> impl IntoView {
    let line = theme.y_tick.line;
    let fill = theme.y_tick.fill;
    let font_size = theme.y_tick.font_size;

    view! {
        <g class="value-axis">
            <line x1="0" y1="0" x2="0" y2=height stroke=line stroke-width="1" />
            {ticks.into_iter().map(|(y, value)| {
                let label = formatter.as_ref().map_or_else(|| format_tick(value), |f| f.format(value));
                view! {
                    <g transform=format!("translate(0, {})", y)>
                        <line x1="-5" x2="0" stroke=line />
                        <text
                            x="-8"
                            dy="0.32em"
                            text-anchor="end"
                            fill=fill
                            font-size=font_size
                        >
                            {label}
                        </text>
                    </g>
                }
            }).collect_view()}
        </g>
    }
}

/// Bottom category axis
#[component]
pub fn CategoryAxis(width: f64, height: f64, labels: Vec<(f64, String)>, theme: ThemeConfig) -> impl IntoView {
    let line = theme.x_tick.line;
    let fill = theme.x_tick.fill;
    let font_size = theme.x_tick.font_size;

    view! {
        <g class="category-axis" transform=format!("translate(0, {})", height)>
            <line x1="0" y1="0" x2=width y2="0" stroke=line stroke-width="1" />
            {labels.into_iter().map(|(x, label)| {
                view! {
                    <g transform=format!("translate({}, 0)", x)>
                        <line y1="0" y2="5" stroke=line />
                        <text y="18" text-anchor="middle" fill=fill font-size=font_size>
                            {label}
                        </text>
                    </g>
                }
            }).collect_view()}
        </g>
    }
}

/// Series legend rendered below the plot
#[component]
pub fn ChartLegend(items: Vec<(String, String)>, theme: ThemeConfig) -> impl IntoView {
    let text = theme.text_muted;

    view! {
        <div class="chart-legend" style="display: flex; flex-wrap: wrap; gap: 12px; justify-content: center; font-size: 12px; margin-top: 6px;">
            {items.into_iter().map(|(name, color)| {
                view! {
                    <span class="legend-item" style=format!("display: inline-flex; align-items: center; gap: 4px; color: {}", text)>
                        <span
                            class="legend-swatch"
                            style=format!("display: inline-block; width: 10px; height: 10px; border-radius: 2px; background-color: {}", color)
                        />
                        {name}
                    </span>
                }
            }).collect_view()}
        </div>
    }
}

/// Floating tooltip box positioned over the plot
#[component]
pub fn ChartTooltip(content: TooltipContent, left_percent: f64, theme: ThemeConfig) -> impl IntoView {
    // Flip to the left half so the box stays inside the chart
    let anchor = if left_percent > 60.0 {
        format!("right: {:.2}%;", 100.0 - left_percent)
    } else {
        format!("left: {:.2}%;", left_percent)
    };
    let style = format!("position: absolute; top: 8px; {} {}", anchor, theme.tooltip_style());
    let muted = theme.text_muted;

    view! {
        <div class="chart-tooltip" style=style>
            <div class="tooltip-title" style=format!("color: {}; margin-bottom: 4px;", muted)>
                {content.title}
            </div>
            {content.rows.into_iter().map(|row| {
                view! {
                    <div class="tooltip-row" style=format!("color: {}", row.color)>
                        {row.text}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

/// Grid, value axis and category axis for one frame, in inner-area coordinates
pub fn cartesian_axes(
    frame: &CartesianFrame,
    categories: &[String],
    theme: &ThemeConfig,
    show_grid: bool,
    formatter: Option<SharedFormatter>,
) -> impl IntoView + use<> {
    let width = frame.dims.inner_width();
    let height = frame.dims.inner_height();
    let ticks = frame.tick_positions();
    let grid = show_grid.then(|| {
        let y_positions = ticks.iter().map(|&(y, _)| y).collect::<Vec<_>>();
        view! { <ChartGrid width=width y_positions=y_positions theme=theme.clone() /> }
    });
    let labels = frame.category_labels(categories, 48.0);

    view! {
        {grid}
        <ValueAxis height=height ticks=ticks theme=theme.clone() formatter=formatter />
        <CategoryAxis width=width height=height labels=labels theme=theme.clone() />
    }
}

/// Vertical guide line at the hovered category
pub fn hover_guide(frame: &CartesianFrame, index: usize, theme: &ThemeConfig) -> impl IntoView + use<> {
    let x = frame.x.scale_center(index);
    view! {
        <line
            class="hover-guide"
            x1=x y1="0"
            x2=x y2=frame.dims.inner_height()
            stroke=theme.text_muted
            stroke-width="1"
            stroke-dasharray="3 3"
            pointer-events="none"
        />
    }
}

/// Pointer position in viewBox units, relative to the element the handler is attached to
pub fn pointer_in_viewbox(ev: &web_sys::MouseEvent, view_width: f64, view_height: f64) -> Option<(f64, f64)> {
    let target = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = target.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let x = (ev.client_x() as f64 - rect.left()) * view_width / rect.width();
    let y = (ev.client_y() as f64 - rect.top()) * view_height / rect.height();
    Some((x, y))
}
