//! Widget status enums and their fixed label/color tables

use crate::colors;
use serde::{Deserialize, Serialize};

/// Service availability shown by status widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Online,
    Offline,
    Warning,
    Maintenance,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Warning => "Warning",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Online => colors::SUCCESS,
            Self::Offline => colors::DANGER,
            Self::Warning => colors::WARN,
            Self::Maintenance => colors::MAINTENANCE,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Online => "status-online",
            Self::Offline => "status-offline",
            Self::Warning => "status-warning",
            Self::Maintenance => "status-maintenance",
        }
    }
}

/// Direction of a metric's change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Neutral,
}

impl Trend {
    /// Trend from a signed change
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Neutral
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Neutral => "●",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Up => "trend-up",
            Self::Down => "trend-down",
            Self::Neutral => "trend-neutral",
        }
    }
}

/// Health bucket of a metric value, mapped to an accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Critical,
    #[default]
    Neutral,
}

impl MetricStatus {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => colors::SUCCESS,
            Self::Warning => colors::WARN,
            Self::Critical => colors::DANGER,
            Self::Neutral => colors::PRIMARY,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Good => "metric-good",
            Self::Warning => "metric-warning",
            Self::Critical => "metric-critical",
            Self::Neutral => "metric-neutral",
        }
    }
}

/// Cloud provider tag used for icon selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Azure => "Azure",
            Self::Gcp => "Google Cloud",
        }
    }

    pub fn brand_color(&self) -> &'static str {
        match self {
            Self::Aws => "#ff9900",
            Self::Azure => "#0078d4",
            Self::Gcp => "#4285f4",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Aws, Self::Azure, Self::Gcp]
    }
}

/// Service family tag used for icon selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudService {
    Compute,
    Storage,
    Database,
    Network,
    Security,
    Analytics,
    Cost,
}

impl CloudService {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
            Self::Database => "Database",
            Self::Network => "Network",
            Self::Security => "Security",
            Self::Analytics => "Analytics",
            Self::Cost => "Cost",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(ServiceStatus::Online.color(), colors::SUCCESS);
        assert_eq!(ServiceStatus::Maintenance.label(), "Maintenance");
    }

    #[test]
    fn test_trend_from_change() {
        assert_eq!(Trend::from_change(3.2), Trend::Up);
        assert_eq!(Trend::from_change(-0.1), Trend::Down);
        assert_eq!(Trend::from_change(0.0), Trend::Neutral);
    }

    #[test]
    fn test_provider_serde() {
        let p: CloudProvider = serde_json::from_str("\"gcp\"").unwrap();
        assert_eq!(p, CloudProvider::Gcp);
    }
}
