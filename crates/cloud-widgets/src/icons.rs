//! Generic icon set and provider/service icon resolution

use cloud_core::{CloudProvider, CloudService};
use leptos::prelude::*;

/// Glyph-backed icons used by widget headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Server,
    Database,
    HardDrive,
    Network,
    Shield,
    BarChart,
    Dollar,
    Cloud,
    Activity,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Server => "🖥",
            Self::Database => "🛢",
            Self::HardDrive => "💾",
            Self::Network => "🌐",
            Self::Shield => "🛡",
            Self::BarChart => "📊",
            Self::Dollar => "💲",
            Self::Cloud => "☁",
            Self::Activity => "📈",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Database => "database",
            Self::HardDrive => "hard-drive",
            Self::Network => "network",
            Self::Shield => "shield",
            Self::BarChart => "bar-chart",
            Self::Dollar => "dollar",
            Self::Cloud => "cloud",
            Self::Activity => "activity",
        }
    }
}

/// Icon for a service family; the provider badge carries the brand instead
pub fn resolve_icon(service: CloudService) -> Icon {
    match service {
        CloudService::Compute => Icon::Server,
        CloudService::Storage => Icon::HardDrive,
        CloudService::Database => Icon::Database,
        CloudService::Network => Icon::Network,
        CloudService::Security => Icon::Shield,
        CloudService::Analytics => Icon::BarChart,
        CloudService::Cost => Icon::Dollar,
    }
}

#[component]
pub fn IconBadge(icon: Icon, #[prop(optional, into)] color: Option<String>) -> impl IntoView {
    let color = color.unwrap_or_else(|| cloud_core::colors::PRIMARY.to_string());
    view! {
        <span
            class=format!("icon icon-{}", icon.name())
            style=format!(
                "display: inline-flex; align-items: center; justify-content: center; width: 28px; height: 28px; border-radius: 6px; background-color: {}; color: {};",
                cloud_core::colors::with_alpha(&color, 0.15),
                color
            )
            aria-hidden="true"
        >
            {icon.glyph()}
        </span>
    }
}

/// Provider name chip in its brand colour
#[component]
pub fn ProviderBadge(provider: CloudProvider) -> impl IntoView {
    view! {
        <span
            class="provider-badge"
            style=format!(
                "font-size: 11px; font-weight: 600; padding: 1px 6px; border-radius: 4px; color: {}; border: 1px solid {};",
                provider.brand_color(),
                provider.brand_color()
            )
        >
            {provider.label()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_icon_by_service() {
        assert_eq!(resolve_icon(CloudService::Compute), Icon::Server);
        assert_eq!(resolve_icon(CloudService::Cost), Icon::Dollar);
        assert_eq!(resolve_icon(CloudService::Storage), Icon::HardDrive);
        assert_eq!(resolve_icon(CloudService::Database).name(), "database");
    }
}
