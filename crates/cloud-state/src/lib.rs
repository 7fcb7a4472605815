//! # cloud-state
//!
//! Reactive UI state for Cloudboard plus the real-time metric feed.
//! Signals stay local to the component tree that provides them.

pub mod realtime;
pub mod window;

pub use realtime::*;
pub use window::*;

use leptos::prelude::*;

// ============================================================================
// UI STATE
// ============================================================================

/// Application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Dark => "theme-dark",
            Self::Light => "theme-light",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

/// Global UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub theme: Theme,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state with reactive signals
#[derive(Clone, Copy)]
pub struct AppState {
    pub ui: RwSignal<UiState>,
    /// Loading state, drives widget skeletons
    pub loading: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            ui: RwSignal::new(UiState::default()),
            loading: RwSignal::new(false),
        }
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub fn toggle_theme(&self) {
        self.ui.update(|ui| {
            ui.theme = ui.theme.toggle();
        });
        tracing::debug!("Theme switched to {}", self.ui.get_untracked().theme.label());
    }

    /// Reactive dark-mode flag, the input every chart theme resolves from
    pub fn dark(&self) -> Signal<bool> {
        let ui = self.ui;
        Signal::derive(move || ui.get().theme.is_dark())
    }

    // ========================================================================
    // Loading State
    // ========================================================================

    /// Flip the loading flag
    pub fn toggle_loading(&self) {
        self.loading.update(|l| *l = !*l);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide app state context to component tree
pub fn provide_app_state() -> AppState {
    let state = AppState::new();
    provide_context(state);
    state
}

/// Use app state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
        assert!(Theme::default().is_dark());
        assert_eq!(Theme::Light.css_class(), "theme-light");
    }

    #[test]
    fn test_app_state_flags() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AppState::new();
            let dark = state.dark();
            assert!(dark.get_untracked());

            state.toggle_theme();
            assert!(!dark.get_untracked());

            state.toggle_loading();
            assert!(state.loading.get_untracked());
            state.toggle_loading();
            assert!(!state.loading.get_untracked());
        });
    }
}
