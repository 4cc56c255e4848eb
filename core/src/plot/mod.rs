//! Line chart data and rendering.
//!
//! Charts are produced from a [`LineSeries`] through the [`PlotRenderer`]
//! trait so the output backend can be swapped without touching the
//! calculator. [`SvgRenderer`] is the built-in implementation.

mod svg;

pub use svg::SvgRenderer;

use crate::formulas::{FormulaError, FormulaResult};
use serde::{Deserialize, Serialize};

/// An ordered set of (x, y) samples with chart labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl LineSeries {
    /// Create a series, rejecting x and y of different lengths
    pub fn new(
        title: &str,
        x_label: &str,
        y_label: &str,
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> FormulaResult<Self> {
        if x.len() != y.len() {
            return Err(FormulaError::InvalidArgument(format!(
                "plot needs as many x values as y values ({} vs {})",
                x.len(),
                y.len()
            )));
        }

        Ok(Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x,
            y,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over (x, y) pairs in order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Data bounds as (x_min, x_max, y_min, y_max), None when empty
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        if self.is_empty() {
            return None;
        }

        let mut bounds = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in self.points() {
            bounds.0 = bounds.0.min(x);
            bounds.1 = bounds.1.max(x);
            bounds.2 = bounds.2.min(y);
            bounds.3 = bounds.3.max(y);
        }
        Some(bounds)
    }
}

/// Turns a series into a rendered chart
pub trait PlotRenderer {
    type Output;

    fn render(&self, series: &LineSeries) -> FormulaResult<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_length_mismatch_rejected() {
        let result = LineSeries::new("t", "x", "y", vec![1.0, 2.0], vec![1.0]);
        assert!(matches!(result, Err(FormulaError::InvalidArgument(_))));
    }

    #[test]
    fn test_series_bounds() {
        let series = LineSeries::new("t", "x", "y", vec![2.0, 8.0, 16.0], vec![0.675, 0.2375, 0.13125])
            .unwrap();
        assert_eq!(series.bounds(), Some((2.0, 16.0, 0.13125, 0.675)));
    }

    #[test]
    fn test_empty_series_has_no_bounds() {
        let series = LineSeries::new("t", "x", "y", vec![], vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.bounds(), None);
    }
}
