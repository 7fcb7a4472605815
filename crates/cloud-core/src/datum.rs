//! Chart datasets: typed rows and series descriptors

use crate::colors;

/// One row of plottable data.
///
/// `Field` names the numeric columns a chart may plot. Using an enum here
/// means a series can only reference fields the row type actually has.
pub trait ChartDatum: Clone + Send + Sync + 'static {
    type Field: Copy + Eq + Send + Sync + 'static;

    /// Category / x-axis label (also the slice name for pie charts)
    fn category(&self) -> String;

    /// Value of `field`, or `None` when the row has no point for it
    fn value(&self, field: Self::Field) -> Option<f64>;
}

/// One plotted channel of a chart (line, bar set, area band, pie values)
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDescriptor<F> {
    pub data_key: F,
    pub name: String,
    pub color: Option<String>,
    pub stack_id: Option<String>,
}

impl<F: Copy> SeriesDescriptor<F> {
    pub fn new(data_key: F, name: impl Into<String>) -> Self {
        Self {
            data_key,
            name: name.into(),
            color: None,
            stack_id: None,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn stack(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = Some(stack_id.into());
        self
    }

    /// Explicit color, else the palette color for this series position
    pub fn resolved_color(&self, index: usize) -> String {
        self.color
            .clone()
            .unwrap_or_else(|| colors::palette_color(index).to_string())
    }
}

/// Value of `field` in `datum`, with non-finite numbers treated as absent
pub fn finite_value<D: ChartDatum>(datum: &D, field: D::Field) -> Option<f64> {
    datum.value(field).filter(|v| v.is_finite())
}

/// Min/max over every present value of the given series.
///
/// Returns `None` when no series has a single value.
pub fn value_extent<D: ChartDatum>(data: &[D], series: &[SeriesDescriptor<D::Field>]) -> Option<(f64, f64)> {
    let mut extent: Option<(f64, f64)> = None;
    for datum in data {
        for s in series {
            if let Some(v) = finite_value(datum, s.data_key) {
                extent = Some(match extent {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
    }
    extent
}

/// A simple name/value row, handy for pie charts and single-series data
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The only field of a [`NamedValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueField;

impl ChartDatum for NamedValue {
    type Field = ValueField;

    fn category(&self) -> String {
        self.name.clone()
    }

    fn value(&self, _field: ValueField) -> Option<f64> {
        Some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct CostRow {
        month: &'static str,
        compute: Option<f64>,
        storage: Option<f64>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum CostField {
        Compute,
        Storage,
    }

    impl ChartDatum for CostRow {
        type Field = CostField;

        fn category(&self) -> String {
            self.month.to_string()
        }

        fn value(&self, field: CostField) -> Option<f64> {
            match field {
                CostField::Compute => self.compute,
                CostField::Storage => self.storage,
            }
        }
    }

    #[test]
    fn test_series_color_wraps_palette() {
        let series: Vec<SeriesDescriptor<CostField>> = (0..7)
            .map(|i| SeriesDescriptor::new(CostField::Compute, format!("s{i}")))
            .collect();

        assert_eq!(series[5].resolved_color(5), series[0].resolved_color(0));
        assert_ne!(series[1].resolved_color(1), series[0].resolved_color(0));
    }

    #[test]
    fn test_explicit_color_wins() {
        let s = SeriesDescriptor::new(CostField::Storage, "Storage").color("#123456");
        assert_eq!(s.resolved_color(3), "#123456");
    }

    #[test]
    fn test_value_extent_skips_absent() {
        let data = vec![
            CostRow { month: "Jan", compute: Some(10.0), storage: None },
            CostRow { month: "Feb", compute: Some(-4.0), storage: Some(30.0) },
            CostRow { month: "Mar", compute: Some(f64::NAN), storage: None },
        ];
        let series = vec![
            SeriesDescriptor::new(CostField::Compute, "Compute"),
            SeriesDescriptor::new(CostField::Storage, "Storage"),
        ];

        assert_eq!(value_extent(&data, &series), Some((-4.0, 30.0)));
    }

    #[test]
    fn test_value_extent_empty() {
        let series = vec![SeriesDescriptor::new(CostField::Compute, "Compute")];
        assert_eq!(value_extent::<CostRow>(&[], &series), None);
    }
}
