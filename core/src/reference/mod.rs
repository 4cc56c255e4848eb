//! Reference sheet of the formulas shown next to the calculator.

use serde::{Deserialize, Serialize};

/// One symbol in a formula legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub meaning: String,
}

/// A formula with its LaTeX source and legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaInfo {
    pub id: String,
    pub title: String,
    pub latex: String,
    pub symbols: Vec<SymbolInfo>,
}

impl FormulaInfo {
    fn new(id: &str, title: &str, latex: &str, symbols: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            latex: latex.to_string(),
            symbols: symbols
                .iter()
                .map(|(symbol, meaning)| SymbolInfo {
                    symbol: symbol.to_string(),
                    meaning: meaning.to_string(),
                })
                .collect(),
        }
    }
}

/// All formulas in display order
pub fn formula_reference() -> Vec<FormulaInfo> {
    vec![
        FormulaInfo::new(
            "amdahl",
            "Amdahl's Law",
            r"S=\frac{1}{(f+(1-f)*P^{-1})}",
            &[
                ("S", "speedup"),
                ("f", "fraction of serial computation"),
                ("P", "number of processing elements"),
            ],
        ),
        FormulaInfo::new(
            "efficiency",
            "Efficiency",
            r"e=\frac{r}{p}",
            &[
                ("e", "efficiency"),
                ("r", "speedup"),
                ("p", "number of processing elements"),
            ],
        ),
        FormulaInfo::new(
            "pipeline_speedup",
            "Balanced pipeline speedup",
            r"S=\frac{k*p*t}{(k+p-1)*t}",
            &[
                ("k", "task rank (data processed concurrently)"),
                ("t", "stage processing time"),
                ("p", "number of stages"),
            ],
        ),
        FormulaInfo::new(
            "pipeline_efficiency",
            "Balanced pipeline efficiency",
            r"e=\frac{k*t}{(k+p-1)*t}",
            &[
                ("k", "task rank (data processed concurrently)"),
                ("t", "stage processing time"),
                ("p", "number of stages"),
            ],
        ),
        FormulaInfo::new(
            "simd_ratio",
            "SIMD/SISD speedup",
            r"r=\frac{T_{SIMD}}{T_{SISD}}",
            &[
                ("T_SIMD", "computation time on the SIMD machine"),
                ("T_SISD", "computation time on the SISD machine"),
            ],
        ),
    ]
}

/// Look up a formula by its id
pub fn find_formula(id: &str) -> Option<FormulaInfo> {
    formula_reference().into_iter().find(|info| info.id == id)
}
