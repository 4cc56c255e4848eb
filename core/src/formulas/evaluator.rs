//! Closed-form performance formulas.

use super::types::{PipelineParams, ProcessorCount, SerialFraction};
use crate::plot::LineSeries;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating inputs or evaluating a formula
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormulaError {
    /// Out-of-range or malformed input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Zero processor count or zero SISD time
    #[error("Division by zero")]
    DivisionByZero,
}

impl FormulaError {
    /// Stable code shown to the user next to the message
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
        }
    }
}

pub type FormulaResult<T> = Result<T, FormulaError>;

fn require_finite(name: &str, value: f64) -> FormulaResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::InvalidArgument(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

fn finite_quotient(name: &str, value: f64) -> FormulaResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::InvalidArgument(format!("{} overflows", name)))
    }
}

/// Amdahl's Law: S = 1 / (f + (1 - f) / P)
pub fn amdahl_speedup(serial_fraction: f64, num_processors: u32) -> FormulaResult<f64> {
    let f = SerialFraction::new(serial_fraction)?;
    let p = ProcessorCount::new(num_processors)?;
    Ok(amdahl(f, p))
}

/// Amdahl's Law on already validated inputs
pub fn amdahl(f: SerialFraction, p: ProcessorCount) -> f64 {
    1.0 / (f.value() + f.parallel_part() / f64::from(p.get()))
}

/// Efficiency e = r / p
pub fn efficiency(speedup_r: f64, processor_count_p: f64) -> FormulaResult<f64> {
    let r = require_finite("speedup", speedup_r)?;
    let p = require_finite("processor count", processor_count_p)?;
    if p == 0.0 {
        return Err(FormulaError::DivisionByZero);
    }
    if p < 0.0 {
        return Err(FormulaError::InvalidArgument(format!(
            "processor count must be positive, got {}",
            p
        )));
    }
    if r < 0.0 {
        return Err(FormulaError::InvalidArgument(format!(
            "speedup must not be negative, got {}",
            r
        )));
    }
    finite_quotient("efficiency", r / p)
}

/// Balanced pipeline speedup S = (k*p*t) / ((k+p-1)*t)
///
/// Evaluated literally so that t does not cancel symbolically; the result may
/// differ from k*p/(k+p-1) in the last ulp.
pub fn balanced_pipeline_speedup(k: u32, p: u32, t: f64) -> FormulaResult<f64> {
    let params = PipelineParams::new(k, p, t)?;
    Ok(pipeline_speedup(&params))
}

/// Balanced pipeline efficiency e = (k*t) / ((k+p-1)*t)
pub fn balanced_pipeline_efficiency(k: u32, p: u32, t: f64) -> FormulaResult<f64> {
    let params = PipelineParams::new(k, p, t)?;
    Ok(pipeline_efficiency(&params))
}

/// Pipeline speedup on validated parameters
pub fn pipeline_speedup(params: &PipelineParams) -> f64 {
    let k = f64::from(params.k);
    let p = f64::from(params.p);
    (k * p * params.t) / (params.fill_length() * params.t)
}

/// Pipeline efficiency on validated parameters
pub fn pipeline_efficiency(params: &PipelineParams) -> f64 {
    let k = f64::from(params.k);
    (k * params.t) / (params.fill_length() * params.t)
}

/// SIMD/SISD time ratio
pub fn ratio_of_times(simd_time: f64, sisd_time: f64) -> FormulaResult<f64> {
    let simd = require_finite("SIMD time", simd_time)?;
    let sisd = require_finite("SISD time", sisd_time)?;
    if sisd == 0.0 {
        return Err(FormulaError::DivisionByZero);
    }
    finite_quotient("SIMD/SISD ratio", simd / sisd)
}

/// Amdahl speedup sampled at every processor count in 1..=max_processors
pub fn amdahl_curve(serial_fraction: f64, max_processors: u32) -> FormulaResult<LineSeries> {
    let f = SerialFraction::new(serial_fraction)?;
    let max = ProcessorCount::new(max_processors)?;

    let points = (1..=max.get())
        .map(|n| ProcessorCount::new(n).map(|p| (f64::from(n), amdahl(f, p))))
        .collect::<FormulaResult<Vec<_>>>()?;
    let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

    LineSeries::new("Amdahl's Law", "Number of processors", "Speedup", x, y)
}

/// Element-wise efficiency over paired speedup and processor count samples
pub fn efficiency_series(speedups: &[f64], processors: &[f64]) -> FormulaResult<Vec<f64>> {
    if speedups.len() != processors.len() {
        return Err(FormulaError::InvalidArgument(format!(
            "got {} speedup values but {} processor counts",
            speedups.len(),
            processors.len()
        )));
    }

    speedups
        .iter()
        .zip(processors)
        .map(|(&r, &p)| efficiency(r, p))
        .collect()
}
