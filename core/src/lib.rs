pub mod formulas;
pub mod input;
pub mod plot;
pub mod calculator;
pub mod reference;

pub use formulas::{FormulaError, FormulaResult};
pub use calculator::{evaluate, CalculatorInputs, CalculatorReport, PanelOutcome};
pub use plot::{LineSeries, PlotRenderer, SvgRenderer};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
