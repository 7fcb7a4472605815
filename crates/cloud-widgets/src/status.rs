//! Service status list card

use crate::{card_style, icons::{Icon, IconBadge, ProviderBadge}, Skeleton};
use cloud_charts::ThemeConfig;
use cloud_core::{colors, CloudProvider, ServiceStatus};
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusItem {
    pub name: String,
    pub status: ServiceStatus,
    pub detail: Option<String>,
}

impl StatusItem {
    pub fn new(name: impl Into<String>, status: ServiceStatus) -> Self {
        Self {
            name: name.into(),
            status,
            detail: None,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

pub fn online_count(items: &[StatusItem]) -> usize {
    items.iter().filter(|i| i.status == ServiceStatus::Online).count()
}

/// Header accent: the worst status present, online when the list is empty
pub fn overall_status(items: &[StatusItem]) -> ServiceStatus {
    let rank = |s: ServiceStatus| match s {
        ServiceStatus::Online => 0,
        ServiceStatus::Maintenance => 1,
        ServiceStatus::Warning => 2,
        ServiceStatus::Offline => 3,
    };
    items
        .iter()
        .map(|i| i.status)
        .max_by_key(|s| rank(*s))
        .unwrap_or(ServiceStatus::Online)
}

#[derive(Clone)]
pub struct StatusCard {
    pub title: String,
    pub items: Signal<Vec<StatusItem>>,
    pub is_loading: Option<Signal<bool>>,
    pub icon: Option<Icon>,
    pub provider: Option<CloudProvider>,
    pub dark: Option<Signal<bool>>,
}

pub fn status_card(card: StatusCard) -> impl IntoView {
    let StatusCard {
        title,
        items,
        is_loading,
        icon,
        provider,
        dark,
    } = card;
    let overall = Memo::new(move |_| items.with(|i| overall_status(i)));

    let list = move || {
        if is_loading.is_some_and(|l| l.get()) {
            return view! { <Skeleton lines=4 dark=dark /> }.into_any();
        }
        let theme = ThemeConfig::tracked(dark);
        items
            .get()
            .into_iter()
            .map(|item| {
                let color = item.status.color();
                view! {
                    <li class=format!("status-item {}", item.status.css_class()) style="display: flex; align-items: center; gap: 8px; padding: 6px 0;">
                        <span style=format!("width: 8px; height: 8px; border-radius: 9999px; background-color: {};", color) />
                        <span style=format!("flex: 1; color: {};", theme.text)>
                            {item.name}
                            {item.detail.map(|d| view! { <span style=format!("margin-left: 6px; font-size: 12px; color: {};", theme.text_muted)>{d}</span> })}
                        </span>
                        <span
                            class="status-badge"
                            style=format!(
                                "font-size: 11px; padding: 1px 8px; border-radius: 9999px; color: {}; background-color: {};",
                                color,
                                colors::with_alpha(color, 0.15)
                            )
                        >
                            {item.status.label()}
                        </span>
                    </li>
                }
            })
            .collect_view()
            .into_any()
    };

    let summary = move || {
        let (online, total) = items.with(|i| (online_count(i), i.len()));
        format!("{}/{} online", online, total)
    };

    view! {
        <div class="widget status-widget" style=move || card_style(dark, overall.get().color())>
            <div style="display: flex; align-items: center; justify-content: space-between;">
                <span style=move || format!("font-size: 13px; color: {};", ThemeConfig::tracked(dark).text_muted)>{title}</span>
                <span style="display: inline-flex; gap: 6px; align-items: center;">
                    {provider.map(|p| view! { <ProviderBadge provider=p /> })}
                    {icon.map(|i| view! { <IconBadge icon=i /> })}
                </span>
            </div>
            <div class="status-summary" style=move || format!("font-size: 12px; margin-top: 4px; color: {};", overall.get().color())>
                {summary}
            </div>
            <ul class="status-list" style="list-style: none; margin: 8px 0 0; padding: 0;">{list}</ul>
        </div>
    }
}

#[component]
pub fn StatusWidget(
    #[prop(into)] title: String,
    #[prop(into)] items: Signal<Vec<StatusItem>>,
    #[prop(optional, into)] is_loading: Option<Signal<bool>>,
    #[prop(optional)] icon: Option<Icon>,
    #[prop(optional, into)] dark: Option<Signal<bool>>,
) -> impl IntoView {
    status_card(StatusCard {
        title,
        items,
        is_loading,
        icon,
        provider: None,
        dark,
    })
}
