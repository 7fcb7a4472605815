//! Titled card shell around a chart, with an optional export menu

use crate::{export::ChartExport, theme::ThemeConfig};
use leptos::html::Div;
use leptos::prelude::*;

/// Filename base derived from a title: lowercase, alphanumerics joined by `-`
pub fn export_filename(title: &str) -> String {
    let slug = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() { "chart".to_string() } else { slug }
}

#[component]
pub fn ChartContainer(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional)] exportable: bool,
    #[prop(optional, into)] filename: Option<String>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
    children: Children,
) -> impl IntoView {
    let content_ref = NodeRef::<Div>::new();
    let filename = filename.unwrap_or_else(|| export_filename(&title));

    let card_style = move || {
        let theme = ThemeConfig::tracked(dark);
        format!(
            "background-color: {}; border: 1px solid {}; border-radius: 8px; padding: 16px; color: {};",
            theme.panel_background, theme.border, theme.text
        )
    };
    let muted = move || format!("color: {}; font-size: 12px;", ThemeConfig::tracked(dark).text_muted);

    let export_menu = exportable.then(|| match dark {
        Some(dark) => view! { <ChartExport target=content_ref filename=filename.clone() dark=dark /> }.into_any(),
        None => view! { <ChartExport target=content_ref filename=filename.clone() /> }.into_any(),
    });

    view! {
        <div class="panel chart-card" style=card_style>
            <div class="panel-header" style="display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 12px;">
                <div>
                    <span class="panel-title" style="font-weight: 600;">{title}</span>
                    {subtitle.map(|s| view! { <div class="panel-subtitle" style=muted>{s}</div> })}
                </div>
                {export_menu}
            </div>
            <div class="panel-content" node_ref=content_ref>
                {children()}
            </div>
        </div>
    }
}

/// Wrap a rendered chart in a [`ChartContainer`] when a title is given
pub fn titled(title: Option<String>, dark: Option<Signal<bool>>, body: AnyView) -> AnyView {
    match title {
        Some(title) => view! {
            <ChartContainer title=title dark=dark.unwrap_or_else(|| Signal::stored(false))>
                {body}
            </ChartContainer>
        }
        .into_any(),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename_slug() {
        assert_eq!(export_filename("CPU Usage (7d)"), "cpu-usage-7d");
        assert_eq!(export_filename("  "), "chart");
        assert_eq!(export_filename("Cost / Service"), "cost-service");
    }
}
