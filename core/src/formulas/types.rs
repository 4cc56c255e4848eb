//! Validated input types for the performance formulas.

use super::evaluator::FormulaError;
use serde::{Deserialize, Serialize};

/// Fraction of a workload that must run serially, in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SerialFraction(f64);

impl SerialFraction {
    pub fn new(value: f64) -> Result<Self, FormulaError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(FormulaError::InvalidArgument(format!(
                "serial fraction must be in [0, 1], got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Share of the workload that can be spread across processors
    pub fn parallel_part(&self) -> f64 {
        1.0 - self.0
    }
}

impl TryFrom<f64> for SerialFraction {
    type Error = FormulaError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SerialFraction> for f64 {
    fn from(fraction: SerialFraction) -> Self {
        fraction.0
    }
}

/// Number of processing elements, at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ProcessorCount(u32);

impl ProcessorCount {
    pub fn new(count: u32) -> Result<Self, FormulaError> {
        if count < 1 {
            return Err(FormulaError::InvalidArgument(
                "processor count must be at least 1".to_string(),
            ));
        }
        Ok(Self(count))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ProcessorCount {
    type Error = FormulaError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<ProcessorCount> for u32 {
    fn from(count: ProcessorCount) -> Self {
        count.0
    }
}

/// Parameters of a balanced pipeline where every stage takes the same time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Task rank: amount of data pushed through the pipeline
    pub k: u32,
    /// Number of stages
    pub p: u32,
    /// Time of a single stage
    pub t: f64,
}

impl PipelineParams {
    pub fn new(k: u32, p: u32, t: f64) -> Result<Self, FormulaError> {
        let params = Self { k, p, t };
        params.validate()?;
        Ok(params)
    }

    /// Check k >= 1, p >= 1 and a positive finite stage time
    pub fn validate(&self) -> Result<(), FormulaError> {
        if self.k < 1 {
            return Err(FormulaError::InvalidArgument(
                "task rank k must be at least 1".to_string(),
            ));
        }
        if self.p < 1 {
            return Err(FormulaError::InvalidArgument(
                "stage count p must be at least 1".to_string(),
            ));
        }
        if !self.t.is_finite() || self.t <= 0.0 {
            return Err(FormulaError::InvalidArgument(format!(
                "stage time t must be positive, got {}",
                self.t
            )));
        }
        Ok(())
    }

    /// Pipeline fill length in stage slots: k + p - 1
    pub fn fill_length(&self) -> f64 {
        f64::from(self.k) + f64::from(self.p) - 1.0
    }
}
