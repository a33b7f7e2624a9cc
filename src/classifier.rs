//! Cohort-relative bottleneck and cost classification

use serde::Serialize;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{MonitorError, Result};
use crate::models::MachineMetrics;

/// Arithmetic means across one classification pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CohortAverages {
    pub avg_ideal_time: f64,
    pub avg_manual_time: f64,
}

pub fn cohort_averages(cohort: &[MachineMetrics]) -> Result<CohortAverages> {
    if cohort.is_empty() {
        return Err(MonitorError::EmptyCohort);
    }
    let n = cohort.len() as f64;
    let total_ideal: f64 = cohort.iter().map(|m| m.ideal_machine_time).sum();
    let total_manual: f64 = cohort.iter().map(|m| m.manual_load_time).sum();

    Ok(CohortAverages {
        avg_ideal_time: total_ideal / n,
        avg_manual_time: total_manual / n,
    })
}

/// Flag every machine against the cohort averages
///
/// Comparisons are strict: a machine sitting exactly on a threshold is not
/// flagged. With a single machine the average is its own value, so neither
/// bottleneck flag can fire while the multipliers are above one.
pub fn classify(cohort: &mut [MachineMetrics], config: &PipelineConfig) -> Result<CohortAverages> {
    let averages = cohort_averages(cohort)?;
    let process_limit = averages.avg_ideal_time * config.process_time_threshold;
    let manual_limit = averages.avg_manual_time * config.manual_time_threshold;

    for m in cohort.iter_mut() {
        m.is_process_bottleneck = m.ideal_machine_time > process_limit;
        m.is_operator_bottleneck = m.manual_load_time > manual_limit;
        m.is_high_cost = m.cost > config.cost_alert_threshold;

        if m.is_process_bottleneck || m.is_operator_bottleneck || m.is_high_cost {
            debug!(
                machine = %m.id,
                process = m.is_process_bottleneck,
                operator = m.is_operator_bottleneck,
                high_cost = m.is_high_cost,
                "machine flagged"
            );
        }
    }

    Ok(averages)
}
