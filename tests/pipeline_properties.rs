//! Property-based tests for metric derivation and classification
//!
//! Covers:
//! 1. Output count is floor(run seconds / cycle time)
//! 2. Energy and cost are monotonic in each argument
//! 3. Strict thresholds and single-machine cohorts
//! 4. Recalculation is idempotent and order preserving

use factory_monitor::calculator::{compute_cost, compute_energy, compute_output};
use factory_monitor::{MachineInput, MonitorError, PipelineConfig, run_pipeline};
use proptest::prelude::*;

fn machine_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (0.1f64..500.0, 0.0f64..500.0, 0.1f64..24.0, 0.0f64..50.0)
}

fn cohort_from(params: &[(f64, f64, f64, f64)]) -> Vec<MachineInput> {
    params
        .iter()
        .enumerate()
        .map(|(i, &(ideal, manual, run, power))| {
            MachineInput::new(&format!("M{}", i + 1), &format!("Machine {}", i + 1), ideal, manual, run, power)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_output_is_floor_of_ratio(cycle in 0.01f64..10_000.0, run in 0.01f64..1000.0) {
        let output = compute_output(cycle, run).unwrap();
        prop_assert_eq!(output, (run * 3600.0 / cycle).floor() as u64);
    }

    #[test]
    fn prop_output_rejects_non_positive_cycle(cycle in -100.0f64..=0.0, run in 0.01f64..100.0) {
        prop_assert!(compute_output(cycle, run).is_none());
    }

    #[test]
    fn prop_energy_monotonic(power in 0.0f64..100.0, run in 0.0f64..100.0, bump in 0.0f64..10.0) {
        prop_assert!(compute_energy(power + bump, run) >= compute_energy(power, run));
        prop_assert!(compute_energy(power, run + bump) >= compute_energy(power, run));
    }

    #[test]
    fn prop_cost_monotonic(energy in 0.0f64..1000.0, rate in 0.0f64..50.0, bump in 0.0f64..10.0) {
        prop_assert!(compute_cost(energy + bump, rate) >= compute_cost(energy, rate));
        prop_assert!(compute_cost(energy, rate + bump) >= compute_cost(energy, rate));
    }

    #[test]
    fn prop_single_machine_never_bottleneck(params in machine_strategy()) {
        let metrics = run_pipeline(&cohort_from(&[params]), &PipelineConfig::default()).unwrap();
        prop_assert!(!metrics[0].is_process_bottleneck);
        prop_assert!(!metrics[0].is_operator_bottleneck);
    }

    #[test]
    fn prop_rerun_is_identical(params in prop::collection::vec(machine_strategy(), 1..12)) {
        let cohort = cohort_from(&params);
        let config = PipelineConfig::default();
        let first = run_pipeline(&cohort, &config).unwrap();
        let second = run_pipeline(&cohort, &config).unwrap();
        prop_assert_eq!(&first, &second);

        let ids: Vec<_> = first.iter().map(|m| m.id.clone()).collect();
        let expected: Vec<_> = cohort.iter().map(|m| m.id.clone()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_all_metrics_finite(params in prop::collection::vec(machine_strategy(), 1..12)) {
        let metrics = run_pipeline(&cohort_from(&params), &PipelineConfig::default()).unwrap();
        for m in metrics {
            prop_assert!(m.actual_cycle_time.is_finite() && m.actual_cycle_time > 0.0);
            prop_assert!(m.energy.is_finite());
            prop_assert!(m.cost.is_finite());
        }
    }
}

#[test]
fn worked_example_process_bottleneck() {
    // averages come out at ideal 10.8 and manual 6
    let cohort = cohort_from(&[
        (8.0, 4.0, 8.0, 2.5),
        (10.0, 12.0, 8.0, 3.0),
        (20.0, 6.0, 8.0, 4.0),
        (7.0, 3.0, 8.0, 2.0),
        (9.0, 5.0, 8.0, 3.5),
    ]);
    let metrics = run_pipeline(&cohort, &PipelineConfig::default()).unwrap();
    assert!(metrics[2].is_process_bottleneck);
    assert!(!metrics[2].is_operator_bottleneck);
}

#[test]
fn worked_example_cost_below_alert() {
    let metrics = run_pipeline(&cohort_from(&[(8.0, 4.0, 8.0, 2.5)]), &PipelineConfig::default()).unwrap();
    assert_eq!(metrics[0].energy, 20.0);
    assert_eq!(metrics[0].cost, 160.0);
    assert!(!metrics[0].is_high_cost);
}

#[test]
fn cost_exactly_at_alert_is_not_flagged() {
    // 2.5 kW for 10 h at 8 per kWh = 200
    let metrics = run_pipeline(&cohort_from(&[(8.0, 4.0, 10.0, 2.5)]), &PipelineConfig::default()).unwrap();
    assert_eq!(metrics[0].cost, 200.0);
    assert!(!metrics[0].is_high_cost);
}

#[test]
fn worked_example_output_count() {
    let metrics = run_pipeline(&cohort_from(&[(10.0, 12.0, 8.0, 3.0)]), &PipelineConfig::default()).unwrap();
    assert_eq!(metrics[0].actual_cycle_time, 22.0);
    assert_eq!(metrics[0].output, 1309);
}

#[test]
fn zero_run_time_is_rejected() {
    let err = run_pipeline(&cohort_from(&[(10.0, 12.0, 0.0, 3.0)]), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, MonitorError::InvalidInput { .. }));
}

#[test]
fn custom_rate_flows_into_cost() {
    let config = PipelineConfig {
        electricity_rate: 12.0,
        ..PipelineConfig::default()
    };
    let metrics = run_pipeline(&cohort_from(&[(8.0, 4.0, 8.0, 2.5)]), &config).unwrap();
    assert_eq!(metrics[0].cost, 240.0);
    assert!(metrics[0].is_high_cost);
}
