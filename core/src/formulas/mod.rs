//! Parallel-computing performance formulas.
//!
//! Provides pure, validated evaluation of:
//! - Amdahl's Law speedup
//! - Speedup efficiency (r / p)
//! - SIMD/SISD time ratio
//! - Balanced pipeline speedup and efficiency

pub mod types;
pub mod evaluator;

#[cfg(test)]
mod tests;

pub use types::{PipelineParams, ProcessorCount, SerialFraction};
pub use evaluator::{
    amdahl, amdahl_curve, amdahl_speedup, balanced_pipeline_efficiency,
    balanced_pipeline_speedup, efficiency, efficiency_series, pipeline_efficiency,
    pipeline_speedup, ratio_of_times, FormulaError, FormulaResult,
};
