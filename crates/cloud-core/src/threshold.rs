//! Value thresholds for gauge coloring

use serde::{Deserialize, Serialize};

/// A `(value, color, label)` breakpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub color: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Threshold {
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
            label: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Thresholds kept sorted by descending value. Among equal values the one
/// supplied last wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSet {
    descending: Vec<Threshold>,
}

impl ThresholdSet {
    pub fn new(thresholds: impl IntoIterator<Item = Threshold>) -> Self {
        let mut descending: Vec<Threshold> = thresholds
            .into_iter()
            .filter(|t| !t.value.is_nan())
            .collect();
        descending.reverse();
        descending.sort_by(|a, b| b.value.total_cmp(&a.value));
        Self { descending }
    }

    /// The highest threshold whose value is `<= value`
    pub fn active(&self, value: f64) -> Option<&Threshold> {
        self.descending.iter().find(|t| t.value <= value)
    }

    /// Color of the active threshold, else `fallback`
    pub fn active_color<'a>(&'a self, value: f64, fallback: &'a str) -> &'a str {
        self.active(value).map_or(fallback, |t| t.color.as_str())
    }

    /// Thresholds in ascending order (for legends)
    pub fn ascending(&self) -> impl Iterator<Item = &Threshold> {
        self.descending.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.descending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descending.len()
    }
}

impl From<Vec<Threshold>> for ThresholdSet {
    fn from(thresholds: Vec<Threshold>) -> Self {
        Self::new(thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> ThresholdSet {
        ThresholdSet::new(vec![
            Threshold::new(0.0, "A"),
            Threshold::new(50.0, "B"),
            Threshold::new(80.0, "C"),
        ])
    }

    #[test]
    fn test_highest_applicable_threshold() {
        let set = abc();
        assert_eq!(set.active_color(65.0, "X"), "B");
        assert_eq!(set.active_color(95.0, "X"), "C");
        assert_eq!(set.active_color(50.0, "X"), "B");
        assert_eq!(set.active_color(0.0, "X"), "A");
    }

    #[test]
    fn test_below_all_thresholds_uses_fallback() {
        assert_eq!(abc().active_color(-5.0, "X"), "X");
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let shuffled = ThresholdSet::new(vec![
            Threshold::new(80.0, "C"),
            Threshold::new(0.0, "A"),
            Threshold::new(50.0, "B"),
        ]);
        assert_eq!(shuffled.active_color(65.0, "X"), "B");
        assert_eq!(shuffled.active_color(95.0, "X"), "C");
    }

    #[test]
    fn test_duplicate_values_last_supplied_wins() {
        let set = ThresholdSet::new(vec![
            Threshold::new(0.0, "A"),
            Threshold::new(50.0, "B"),
            Threshold::new(50.0, "B2"),
        ]);
        assert_eq!(set.active_color(60.0, "X"), "B2");
        assert_eq!(set.active_color(10.0, "X"), "A");
    }

    #[test]
    fn test_empty_set() {
        let set = ThresholdSet::default();
        assert!(set.is_empty());
        assert_eq!(set.active_color(42.0, "fallback"), "fallback");
    }

    #[test]
    fn test_ascending_order() {
        let values: Vec<f64> = abc().ascending().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 50.0, 80.0]);
    }

    #[test]
    fn test_deserialize_threshold() {
        let t: Threshold = serde_json::from_str(r##"{"value": 80, "color": "#ef4444"}"##).unwrap();
        assert_eq!(t.value, 80.0);
        assert!(t.label.is_none());
    }
}
