//! Form-level evaluation of the four calculator panels.
//!
//! Every panel is evaluated independently from [`CalculatorInputs`], so a bad
//! value in one panel is reported as that panel's error while the others
//! still produce results.

use crate::formulas::{
    self, FormulaError, FormulaResult, PipelineParams, ProcessorCount, SerialFraction,
};
use crate::input;
use crate::plot::LineSeries;
use serde::{Deserialize, Serialize};

pub const MAX_PROCESSORS: u32 = 1000;
pub const MAX_PIPELINE_SIZE: u32 = 1000;
pub const MIN_STAGE_TIME: f64 = 0.1;
pub const MAX_STAGE_TIME: f64 = 1000.0;

/// Complete form state. Missing fields take the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInputs {
    pub serial_fraction: f64,
    pub num_processors: u32,
    pub simd_time: f64,
    pub sisd_time: f64,
    /// Comma-separated speedup coefficients
    pub speedups: String,
    /// Comma-separated processor counts, paired with `speedups`
    pub processors: String,
    pub k: u32,
    pub p: u32,
    pub t: f64,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            serial_fraction: 0.46,
            num_processors: 16,
            simd_time: 3.0,
            sisd_time: 1.2,
            speedups: "1.35, 1.9, 2.1".to_string(),
            processors: "2, 8, 16".to_string(),
            k: 8,
            p: 8,
            t: 0.1,
        }
    }
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    name: &str,
    value: T,
    min: T,
    max: T,
) -> FormulaResult<T> {
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(FormulaError::InvalidArgument(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )))
    }
}

impl CalculatorInputs {
    /// Parse a (possibly partial) JSON object of form values
    pub fn from_json(json: &str) -> FormulaResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FormulaError::InvalidArgument(format!("malformed form data: {}", e)))
    }

    fn amdahl_inputs(&self) -> FormulaResult<(SerialFraction, ProcessorCount)> {
        let f = SerialFraction::new(self.serial_fraction)?;
        check_range("number of processors", self.num_processors, 1, MAX_PROCESSORS)?;
        let p = ProcessorCount::new(self.num_processors)?;
        Ok((f, p))
    }

    fn pipeline_params(&self) -> FormulaResult<PipelineParams> {
        check_range("task rank k", self.k, 1, MAX_PIPELINE_SIZE)?;
        check_range("stage count p", self.p, 1, MAX_PIPELINE_SIZE)?;
        check_range("stage time t", self.t, MIN_STAGE_TIME, MAX_STAGE_TIME)?;
        PipelineParams::new(self.k, self.p, self.t)
    }

    /// Check every field against the form bounds, reporting the first failure
    pub fn validate(&self) -> FormulaResult<()> {
        self.amdahl_inputs()?;
        formulas::ratio_of_times(self.simd_time, self.sisd_time)?;
        self.efficiency_samples()?;
        self.pipeline_params()?;
        Ok(())
    }

    /// Amdahl curve over 1..=num_processors
    pub fn amdahl_series(&self) -> FormulaResult<LineSeries> {
        let (f, p) = self.amdahl_inputs()?;
        formulas::amdahl_curve(f.value(), p.get())
    }

    fn efficiency_samples(&self) -> FormulaResult<(Vec<f64>, Vec<f64>)> {
        let (speedups, processors) = input::parse_paired_lists(&self.speedups, &self.processors)?;
        let efficiencies = formulas::efficiency_series(&speedups, &processors)?;
        Ok((processors, efficiencies))
    }

    /// Efficiency plotted against the processor counts typed into the form
    pub fn efficiency_series(&self) -> FormulaResult<LineSeries> {
        let (processors, efficiencies) = self.efficiency_samples()?;
        LineSeries::new(
            "Efficiency",
            "Number of processing elements",
            "Efficiency",
            processors,
            efficiencies,
        )
    }
}

/// Result of one panel: a value, or a message to show in its place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelOutcome<T> {
    Ok(T),
    Error { code: String, message: String },
}

impl<T> PanelOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn ok(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Error { .. } => None,
        }
    }
}

impl<T> From<FormulaResult<T>> for PanelOutcome<T> {
    fn from(result: FormulaResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Error {
                code: e.code().to_string(),
                message: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmdahlPanel {
    /// Speedup at the selected processor count
    pub speedup: f64,
    pub curve: LineSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimdPanel {
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyPanel {
    pub efficiencies: Vec<f64>,
    pub curve: LineSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelinePanel {
    pub speedup: f64,
    pub efficiency: f64,
}

/// Everything the calculator page displays for one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorReport {
    pub amdahl: PanelOutcome<AmdahlPanel>,
    pub simd: PanelOutcome<SimdPanel>,
    pub efficiency: PanelOutcome<EfficiencyPanel>,
    pub pipeline: PanelOutcome<PipelinePanel>,
}

impl CalculatorReport {
    pub fn has_errors(&self) -> bool {
        !(self.amdahl.is_ok() && self.simd.is_ok() && self.efficiency.is_ok() && self.pipeline.is_ok())
    }
}

fn amdahl_panel(inputs: &CalculatorInputs) -> FormulaResult<AmdahlPanel> {
    let (f, p) = inputs.amdahl_inputs()?;
    Ok(AmdahlPanel {
        speedup: formulas::amdahl(f, p),
        curve: inputs.amdahl_series()?,
    })
}

fn simd_panel(inputs: &CalculatorInputs) -> FormulaResult<SimdPanel> {
    Ok(SimdPanel {
        ratio: formulas::ratio_of_times(inputs.simd_time, inputs.sisd_time)?,
    })
}

fn efficiency_panel(inputs: &CalculatorInputs) -> FormulaResult<EfficiencyPanel> {
    let curve = inputs.efficiency_series()?;
    Ok(EfficiencyPanel {
        efficiencies: curve.y.clone(),
        curve,
    })
}

fn pipeline_panel(inputs: &CalculatorInputs) -> FormulaResult<PipelinePanel> {
    let params = inputs.pipeline_params()?;
    Ok(PipelinePanel {
        speedup: formulas::pipeline_speedup(&params),
        efficiency: formulas::pipeline_efficiency(&params),
    })
}

/// Recompute every panel from scratch
pub fn evaluate(inputs: &CalculatorInputs) -> CalculatorReport {
    CalculatorReport {
        amdahl: amdahl_panel(inputs).into(),
        simd: simd_panel(inputs).into(),
        efficiency: efficiency_panel(inputs).into(),
        pipeline: pipeline_panel(inputs).into(),
    }
}
