//! Data models for machines and their derived metrics

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raw, user-editable parameters for one machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineInput {
    pub id: String,
    pub name: String,
    pub ideal_machine_time: f64, // seconds per cycle, unattended
    pub manual_load_time: f64,   // seconds per cycle, operator
    pub run_time: f64,           // hours in the period
    pub power: f64,              // kW
}

impl MachineInput {
    pub fn new(
        id: &str,
        name: &str,
        ideal_machine_time: f64,
        manual_load_time: f64,
        run_time: f64,
        power: f64,
    ) -> Self {
        MachineInput {
            id: id.to_string(),
            name: name.to_string(),
            ideal_machine_time,
            manual_load_time,
            run_time,
            power,
        }
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::IdealMachineTime => self.ideal_machine_time,
            Field::ManualLoadTime => self.manual_load_time,
            Field::RunTime => self.run_time,
            Field::Power => self.power,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::IdealMachineTime => self.ideal_machine_time = value,
            Field::ManualLoadTime => self.manual_load_time = value,
            Field::RunTime => self.run_time = value,
            Field::Power => self.power = value,
        }
    }
}

/// Derived metrics for one machine, produced by a recalculation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineMetrics {
    pub id: String,
    pub name: String,
    pub ideal_machine_time: f64,
    pub manual_load_time: f64,
    pub run_time: f64,
    pub power: f64,
    pub actual_cycle_time: f64,
    pub output: u64,
    pub energy: f64,
    pub cost: f64,
    pub is_process_bottleneck: bool,
    pub is_operator_bottleneck: bool,
    pub is_high_cost: bool,
}

/// Editable numeric fields of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    IdealMachineTime,
    ManualLoadTime,
    RunTime,
    Power,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::IdealMachineTime => "ideal_machine_time",
            Field::ManualLoadTime => "manual_load_time",
            Field::RunTime => "run_time",
            Field::Power => "power",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ideal_machine_time" | "ideal" => Ok(Field::IdealMachineTime),
            "manual_load_time" | "manual" => Ok(Field::ManualLoadTime),
            "run_time" | "run" => Ok(Field::RunTime),
            "power" => Ok(Field::Power),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// The two input views that feed the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Bottleneck,
    Energy,
}

impl View {
    /// Fields a user may edit while this view is active
    pub fn editable_fields(&self) -> &'static [Field] {
        match self {
            View::Bottleneck => &[Field::IdealMachineTime, Field::ManualLoadTime, Field::RunTime],
            View::Energy => &[Field::Power, Field::RunTime],
        }
    }

    pub fn allows(&self, field: Field) -> bool {
        self.editable_fields().contains(&field)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Bottleneck => f.write_str("bottleneck"),
            View::Energy => f.write_str("energy"),
        }
    }
}

/// Dashboard pages; timers are owned by the page that scheduled them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Bottleneck,
    Energy,
    Graph,
    Report,
}

/// The five-machine floor the dashboard starts with
pub fn default_cohort() -> Vec<MachineInput> {
    vec![
        MachineInput::new("M1", "Machine 1", 8.0, 4.0, 8.0, 2.5),
        MachineInput::new("M2", "Machine 2", 10.0, 12.0, 8.0, 3.0),
        MachineInput::new("M3", "Machine 3", 20.0, 6.0, 8.0, 4.0),
        MachineInput::new("M4", "Machine 4", 7.0, 3.0, 8.0, 2.0),
        MachineInput::new("M5", "Machine 5", 9.0, 5.0, 8.0, 3.5),
    ]
}
