use perf_core::calculator::{evaluate, CalculatorInputs, PanelOutcome};
use perf_core::formulas::{
    amdahl_speedup, balanced_pipeline_speedup, efficiency_series, FormulaError,
};
use perf_core::input::parse_paired_lists;
use perf_core::plot::{PlotRenderer, SvgRenderer};

#[test]
fn test_efficiency_from_typed_lists() {
    let (speedups, processors) = parse_paired_lists("1.35, 1.9, 2.1", "2, 8, 16").unwrap();
    let e = efficiency_series(&speedups, &processors).unwrap();

    let expected = [0.675, 0.2375, 0.13125];
    for (got, want) in e.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn test_malformed_lists_never_panic() {
    for (left, right) in [("1, two", "2, 8"), ("1, 2, 3", "2, 8"), (",", "1"), ("", "")] {
        let result = parse_paired_lists(left, right);
        assert!(
            matches!(result, Err(FormulaError::InvalidArgument(_))),
            "{:?} / {:?} should be rejected",
            left,
            right
        );
    }
}

#[test]
fn test_textbook_scenarios() {
    let amdahl = amdahl_speedup(0.46, 16).unwrap();
    assert!((amdahl - 1.0 / (0.46 + 0.54 / 16.0)).abs() < 1e-12);

    let pipeline = balanced_pipeline_speedup(8, 8, 0.1).unwrap();
    assert!((pipeline - 4.2667).abs() < 1e-4);
}

#[test]
fn test_report_plots_render_as_svg() {
    let report = evaluate(&CalculatorInputs::default());
    let renderer = SvgRenderer::default();

    let amdahl = match &report.amdahl {
        PanelOutcome::Ok(panel) => panel,
        PanelOutcome::Error { message, .. } => panic!("amdahl failed: {}", message),
    };
    let svg = renderer.render(&amdahl.curve).unwrap();
    assert!(svg.contains("Amdahl's Law"));
    assert!(svg.contains("<polyline"));

    let efficiency = report.efficiency.ok().unwrap();
    let svg = renderer.render(&efficiency.curve).unwrap();
    assert!(svg.contains("Number of processing elements"));
}

#[test]
fn test_single_processor_curve() {
    let inputs = CalculatorInputs {
        num_processors: 1,
        ..CalculatorInputs::default()
    };
    let series = inputs.amdahl_series().unwrap();
    assert_eq!(series.len(), 1);
    assert!(SvgRenderer::default().render(&series).is_ok());
}
