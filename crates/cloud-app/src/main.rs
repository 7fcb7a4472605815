//! Cloudboard showcase entry point

use cloud_charts::ThemeConfig;
use cloud_state::provide_app_state;
use cloud_widgets::Overview;
use leptos::prelude::*;

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    tracing_subscriber::fmt::init();
}

#[component]
fn App() -> impl IntoView {
    let state = provide_app_state();
    let dark = state.dark();

    let shell_style = move || {
        let theme = ThemeConfig::tracked(Some(dark));
        let background = if theme.dark { cloud_core::colors::BG_DARK } else { cloud_core::colors::BG_LIGHT };
        format!(
            "min-height: 100vh; padding: 24px; box-sizing: border-box; font-family: system-ui, sans-serif; background-color: {}; color: {};",
            background, theme.text
        )
    };

    view! {
        <div class=move || format!("app {}", state.ui.get().theme.css_class()) style=shell_style>
            <Overview />
        </div>
    }
}

fn main() {
    init_logging();
    tracing::info!("Cloudboard starting");
    mount_to_body(App);
}
