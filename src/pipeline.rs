//! Recalculation pipeline
//!
//! Runs the calculator over every machine, then the classifier once over
//! the whole cohort. Each successful pass produces a new immutable
//! [`Snapshot`]; the views read whichever snapshot is current instead of
//! sharing a mutable machine list.

use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calculator;
use crate::classifier::{self, CohortAverages};
use crate::config::PipelineConfig;
use crate::error::{MonitorError, Result};
use crate::models::{Field, MachineInput, MachineMetrics, View};

/// Metrics for the whole cohort, in input order
pub fn run_pipeline(inputs: &[MachineInput], config: &PipelineConfig) -> Result<Vec<MachineMetrics>> {
    run_with_averages(inputs, config).map(|(metrics, _)| metrics)
}

fn run_with_averages(
    inputs: &[MachineInput],
    config: &PipelineConfig,
) -> Result<(Vec<MachineMetrics>, CohortAverages)> {
    // Every machine must be derived before classification can average them
    let mut metrics = inputs
        .iter()
        .map(|m| calculator::derive_metrics(m, config))
        .collect::<Result<Vec<_>>>()?;
    let averages = classifier::classify(&mut metrics, config)?;
    Ok((metrics, averages))
}

/// One user edit: a raw string destined for a machine field
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub machine_id: String,
    pub field: Field,
    pub value: String,
}

impl Edit {
    pub fn new(machine_id: &str, field: Field, value: &str) -> Self {
        Edit {
            machine_id: machine_id.to_string(),
            field,
            value: value.to_string(),
        }
    }
}

impl FromStr for Edit {
    type Err = MonitorError;

    /// Parses `ID.field=value`, e.g. `M2.manual_load_time=9.5`
    fn from_str(s: &str) -> Result<Self> {
        let re = Regex::new(r"^\s*([^.=\s]+)\.([a-z_]+)\s*=\s*(.*?)\s*$")
            .map_err(|e| MonitorError::MalformedEdit(e.to_string()))?;
        let cap = re
            .captures(s)
            .ok_or_else(|| MonitorError::MalformedEdit(s.to_string()))?;
        let field = cap[2]
            .parse::<Field>()
            .map_err(|_| MonitorError::MalformedEdit(s.to_string()))?;

        Ok(Edit {
            machine_id: cap[1].to_string(),
            field,
            value: cap[3].to_string(),
        })
    }
}

/// Parse a user-entered number, refusing anything that is not finite
pub fn parse_value(machine_id: &str, field: Field, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| MonitorError::invalid(machine_id, field, format!("'{}' is not a number", trimmed)))?;
    if !value.is_finite() {
        return Err(MonitorError::invalid(
            machine_id,
            field,
            format!("'{}' is not a finite number", trimmed),
        ));
    }
    Ok(value)
}

/// Apply a batch of edits to a copy of `inputs`
///
/// The first bad edit rejects the whole batch.
pub fn apply_edits(inputs: &[MachineInput], view: View, edits: &[Edit]) -> Result<Vec<MachineInput>> {
    let mut next = inputs.to_vec();
    for edit in edits {
        if !view.allows(edit.field) {
            return Err(MonitorError::FieldNotEditable {
                field: edit.field,
                view,
            });
        }
        let machine = next
            .iter_mut()
            .find(|m| m.id == edit.machine_id)
            .ok_or_else(|| MonitorError::UnknownMachine(edit.machine_id.clone()))?;
        let value = parse_value(&edit.machine_id, edit.field, &edit.value)?;
        machine.set(edit.field, value);
    }
    Ok(next)
}

/// Immutable result of one recalculation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub generation: u64,
    pub inputs: Vec<MachineInput>,
    pub metrics: Vec<MachineMetrics>,
    pub averages: CohortAverages,
}

impl Snapshot {
    pub fn build(generation: u64, inputs: Vec<MachineInput>, config: &PipelineConfig) -> Result<Self> {
        let (metrics, averages) = run_with_averages(&inputs, config)?;
        Ok(Snapshot {
            generation,
            inputs,
            metrics,
            averages,
        })
    }

    pub fn machine(&self, id: &str) -> Option<&MachineMetrics> {
        self.metrics.iter().find(|m| m.id == id)
    }
}

/// Holds the latest snapshot both views read from
#[derive(Debug, Clone)]
pub struct Cohort {
    config: PipelineConfig,
    latest: Arc<Snapshot>,
}

impl Cohort {
    pub fn new(inputs: Vec<MachineInput>, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let snapshot = Snapshot::build(0, inputs, &config)?;
        Ok(Cohort {
            config,
            latest: Arc::new(snapshot),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn latest(&self) -> Arc<Snapshot> {
        Arc::clone(&self.latest)
    }

    /// Recalculate from the current inputs plus `edits` made in `view`
    ///
    /// On error the current snapshot is left untouched.
    pub fn recalculate(&mut self, view: View, edits: &[Edit]) -> Result<Arc<Snapshot>> {
        let generation = self.latest.generation + 1;
        debug!(%view, edits = edits.len(), generation, "recalculating cohort");

        let result = apply_edits(&self.latest.inputs, view, edits)
            .and_then(|inputs| Snapshot::build(generation, inputs, &self.config));

        match result {
            Ok(snapshot) => {
                info!(
                    %view,
                    generation,
                    machines = snapshot.metrics.len(),
                    "cohort recalculated"
                );
                self.latest = Arc::new(snapshot);
                Ok(self.latest())
            }
            Err(e) => {
                warn!(%view, error = %e, "recalculation rejected");
                Err(e)
            }
        }
    }
}
