//! Per-machine metric derivation
//!
//! Cycle time, output count, energy and cost for a single machine. Nothing
//! here looks at other machines; the cohort-relative flags are set later by
//! the classifier.

use crate::config::PipelineConfig;
use crate::error::{MonitorError, Result};
use crate::models::{Field, MachineInput, MachineMetrics};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Seconds needed to produce one unit
///
/// Returns `None` when either part is negative or non-finite, or when the
/// sum is zero (which would make the output count divide by zero).
pub fn compute_cycle_time(ideal_machine_time: f64, manual_load_time: f64) -> Option<f64> {
    if !ideal_machine_time.is_finite() || !manual_load_time.is_finite() {
        return None;
    }
    if ideal_machine_time < 0.0 || manual_load_time < 0.0 {
        return None;
    }
    let cycle = ideal_machine_time + manual_load_time;
    (cycle > 0.0 && cycle.is_finite()).then_some(cycle)
}

/// Whole units producible in `run_time_hours` at one unit per `cycle_time` seconds
pub fn compute_output(cycle_time: f64, run_time_hours: f64) -> Option<u64> {
    if !cycle_time.is_finite() || cycle_time <= 0.0 {
        return None;
    }
    if !run_time_hours.is_finite() || run_time_hours <= 0.0 {
        return None;
    }
    let units = (run_time_hours * SECONDS_PER_HOUR / cycle_time).floor();
    if !units.is_finite() || units >= u64::MAX as f64 {
        return None;
    }
    Some(units as u64)
}

/// Energy in kWh
pub fn compute_energy(power_kw: f64, run_time_hours: f64) -> f64 {
    power_kw * run_time_hours
}

pub fn compute_cost(energy_kwh: f64, rate: f64) -> f64 {
    energy_kwh * rate
}

/// Reject values that would turn into NaN or Infinity further down
pub fn validate_input(machine: &MachineInput) -> Result<()> {
    let id = machine.id.as_str();
    for field in [
        Field::IdealMachineTime,
        Field::ManualLoadTime,
        Field::RunTime,
        Field::Power,
    ] {
        let value = machine.get(field);
        if !value.is_finite() {
            return Err(MonitorError::invalid(id, field, "value is not a finite number"));
        }
        if value < 0.0 {
            return Err(MonitorError::invalid(id, field, format!("{} is negative", value)));
        }
    }
    if machine.ideal_machine_time == 0.0 {
        return Err(MonitorError::invalid(id, Field::IdealMachineTime, "must be greater than zero"));
    }
    if machine.run_time == 0.0 {
        return Err(MonitorError::invalid(id, Field::RunTime, "must be greater than zero"));
    }
    Ok(())
}

/// Derive the per-machine metrics; bottleneck and cost flags are left unset
pub fn derive_metrics(machine: &MachineInput, config: &PipelineConfig) -> Result<MachineMetrics> {
    validate_input(machine)?;

    let cycle = compute_cycle_time(machine.ideal_machine_time, machine.manual_load_time)
        .ok_or_else(|| {
            let reason = if (machine.ideal_machine_time + machine.manual_load_time).is_infinite() {
                "cycle time overflows"
            } else {
                "cycle time must be greater than zero"
            };
            MonitorError::invalid(&machine.id, Field::IdealMachineTime, reason)
        })?;
    let output = compute_output(cycle, machine.run_time).ok_or_else(|| {
        MonitorError::invalid(&machine.id, Field::RunTime, "output count is out of range")
    })?;
    let energy = compute_energy(machine.power, machine.run_time);
    let cost = compute_cost(energy, config.electricity_rate);
    if !energy.is_finite() || !cost.is_finite() {
        return Err(MonitorError::invalid(&machine.id, Field::Power, "energy cost overflows"));
    }

    Ok(MachineMetrics {
        id: machine.id.clone(),
        name: machine.name.clone(),
        ideal_machine_time: machine.ideal_machine_time,
        manual_load_time: machine.manual_load_time,
        run_time: machine.run_time,
        power: machine.power,
        actual_cycle_time: cycle,
        output,
        energy,
        cost,
        is_process_bottleneck: false,
        is_operator_bottleneck: false,
        is_high_cost: false,
    })
}
