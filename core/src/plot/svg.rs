//! SVG line chart renderer.

use super::{LineSeries, PlotRenderer};
use crate::formulas::{FormulaError, FormulaResult};
use html_escape::encode_text;
use serde::{Deserialize, Serialize};

const TARGET_TICKS: f64 = 5.0;
const MAX_TICKS: u32 = 1000;

/// Renders a [`LineSeries`] as a standalone SVG document with a grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
    /// Space reserved around the plot area for labels
    pub margin: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            margin: 56,
        }
    }
}

/// Linear mapping from a data interval to a pixel interval
#[derive(Debug, Clone, Copy)]
struct Axis {
    min: f64,
    max: f64,
    px_start: f64,
    px_end: f64,
}

impl Axis {
    fn new(min: f64, max: f64, px_start: f64, px_end: f64) -> Self {
        let (min, max) = widen_degenerate(min, max);
        Self { min, max, px_start, px_end }
    }

    fn to_px(&self, value: f64) -> f64 {
        let t = (value - self.min) / (self.max - self.min);
        self.px_start + t * (self.px_end - self.px_start)
    }

    fn ticks(&self) -> Vec<f64> {
        let step = nice_step((self.max - self.min) / TARGET_TICKS);
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }
        let first = (self.min / step).ceil() * step;
        let mut ticks = Vec::new();
        let mut i = 0u32;
        while i < MAX_TICKS {
            let value = first + f64::from(i) * step;
            if !value.is_finite() || value > self.max + step * 1e-9 {
                break;
            }
            ticks.push(value);
            i += 1;
        }
        ticks
    }
}

/// A single-point or flat series still needs a non-empty axis interval
fn widen_degenerate(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() > f64::EPSILON * max.abs().max(1.0) {
        return (min, max);
    }
    let pad = if min.abs() > 0.0 { min.abs() * 0.1 } else { 1.0 };
    (min - pad, max + pad)
}

/// Round a raw step up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_tick(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.4}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check that the canvas leaves room for the plot area inside the margins
    pub fn validate(&self) -> FormulaResult<()> {
        if self.width <= 2 * self.margin || self.height <= 2 * self.margin {
            return Err(FormulaError::InvalidArgument(format!(
                "canvas {}x{} is too small for a {}px margin",
                self.width, self.height, self.margin
            )));
        }
        Ok(())
    }
}

impl PlotRenderer for SvgRenderer {
    type Output = String;

    fn render(&self, series: &LineSeries) -> FormulaResult<String> {
        self.validate()?;

        if series.points().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(FormulaError::InvalidArgument(
                "plot values must be finite".to_string(),
            ));
        }

        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let margin = f64::from(self.margin);
        let (left, right, top, bottom) = (margin, width - margin / 2.0, margin / 2.0 + 8.0, height - margin);

        let (x_min, x_max, y_min, y_max) = series.bounds().unwrap_or((0.0, 1.0, 0.0, 1.0));
        if !(x_max - x_min).is_finite() || !(y_max - y_min).is_finite() {
            return Err(FormulaError::InvalidArgument(
                "plot range is too wide to draw".to_string(),
            ));
        }
        let x_axis = Axis::new(x_min, x_max, left, right);
        let y_axis = Axis::new(y_min, y_max, bottom, top);

        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = self.width,
            h = self.height
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<rect width="{}" height="{}" fill="white"/>"#,
            self.width, self.height
        ));
        svg.push('\n');

        // Grid
        svg.push_str(r##"<g class="grid" stroke="#dddddd" stroke-width="1">"##);
        svg.push('\n');
        let x_ticks = x_axis.ticks();
        let y_ticks = y_axis.ticks();
        for &tick in &x_ticks {
            let px = x_axis.to_px(tick);
            svg.push_str(&format!(
                r#"<line x1="{px:.2}" y1="{top:.2}" x2="{px:.2}" y2="{bottom:.2}"/>"#
            ));
            svg.push('\n');
        }
        for &tick in &y_ticks {
            let py = y_axis.to_px(tick);
            svg.push_str(&format!(
                r#"<line x1="{left:.2}" y1="{py:.2}" x2="{right:.2}" y2="{py:.2}"/>"#
            ));
            svg.push('\n');
        }
        svg.push_str("</g>\n");

        svg.push_str(r##"<g class="ticks" fill="#333333">"##);
        svg.push('\n');
        for &tick in &x_ticks {
            svg.push_str(&format!(
                r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                x_axis.to_px(tick),
                bottom + 16.0,
                format_tick(tick)
            ));
            svg.push('\n');
        }
        for &tick in &y_ticks {
            svg.push_str(&format!(
                r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
                left - 6.0,
                y_axis.to_px(tick) + 4.0,
                format_tick(tick)
            ));
            svg.push('\n');
        }
        svg.push_str("</g>\n");

        // Axes frame
        svg.push_str(&format!(
            r##"<rect class="frame" x="{left:.2}" y="{top:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#333333"/>"##,
            right - left,
            bottom - top
        ));
        svg.push('\n');

        if !series.is_empty() {
            let points: Vec<String> = series
                .points()
                .map(|(x, y)| format!("{:.2},{:.2}", x_axis.to_px(x), y_axis.to_px(y)))
                .collect();
            svg.push_str(&format!(
                r##"<polyline class="series" fill="none" stroke="#1f77b4" stroke-width="2" points="{}"/>"##,
                points.join(" ")
            ));
            svg.push('\n');
        }

        svg.push_str(&format!(
            r#"<text class="title" x="{:.2}" y="{:.2}" text-anchor="middle" font-size="16">{}</text>"#,
            width / 2.0,
            top - 10.0,
            encode_text(&series.title)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text class="x-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            (left + right) / 2.0,
            height - 12.0,
            encode_text(&series.x_label)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text class="y-label" x="14" y="{:.2}" text-anchor="middle" transform="rotate(-90 14 {:.2})">{}</text>"#,
            (top + bottom) / 2.0,
            (top + bottom) / 2.0,
            encode_text(&series.y_label)
        ));
        svg.push_str("\n</svg>\n");

        Ok(svg)
    }
}
