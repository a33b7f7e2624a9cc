//! Presentation data built from a snapshot
//!
//! Card statuses, work orders, cycle breakdowns and chart series. This is
//! where the display priority lives: a dual bottleneck outranks either
//! single flag, and the high cost alert is judged on its own.

use std::fmt;

use serde::Serialize;

use crate::models::MachineMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BottleneckStatus {
    Dual,
    Process,
    Operator,
    Normal,
}

impl BottleneckStatus {
    pub fn of(m: &MachineMetrics) -> Self {
        match (m.is_process_bottleneck, m.is_operator_bottleneck) {
            (true, true) => BottleneckStatus::Dual,
            (true, false) => BottleneckStatus::Process,
            (false, true) => BottleneckStatus::Operator,
            (false, false) => BottleneckStatus::Normal,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BottleneckStatus::Dual => "Dual Bottleneck: Machine + Operator!",
            BottleneckStatus::Process => "Process Bottleneck Detected",
            BottleneckStatus::Operator => "Operator Bottleneck Detected",
            BottleneckStatus::Normal => "Running Normally",
        }
    }

    /// The action offered on the card, if any
    pub fn action(&self) -> Option<Action> {
        match self {
            BottleneckStatus::Dual => Some(Action {
                problem: "Dual Bottleneck",
                contact: "Maintenance & Supervisor",
                label: "Address Both",
            }),
            BottleneckStatus::Process => Some(Action {
                problem: "Process Bottleneck",
                contact: "Technician",
                label: "Call Technician",
            }),
            BottleneckStatus::Operator => Some(Action {
                problem: "Operator Bottleneck",
                contact: "Training Manager",
                label: "Request Training",
            }),
            BottleneckStatus::Normal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergyStatus {
    HighCost,
    Normal,
}

impl EnergyStatus {
    pub fn of(m: &MachineMetrics) -> Self {
        if m.is_high_cost {
            EnergyStatus::HighCost
        } else {
            EnergyStatus::Normal
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EnergyStatus::HighCost => "High Cost Alert",
            EnergyStatus::Normal => "Normal",
        }
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            EnergyStatus::HighCost => Some(Action {
                problem: "High Energy Cost",
                contact: "Supervisor",
                label: "Notify Supervisor",
            }),
            EnergyStatus::Normal => None,
        }
    }
}

/// A button on a card: who gets called about which problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
    pub problem: &'static str,
    pub contact: &'static str,
    pub label: &'static str,
}

impl Action {
    pub fn work_order(&self, machine_name: &str) -> WorkOrder {
        WorkOrder {
            problem: self.problem.to_string(),
            machine_name: machine_name.to_string(),
            contact: self.contact.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkOrder {
    pub problem: String,
    pub machine_name: String,
    pub contact: String,
}

impl WorkOrder {
    /// Question put to the user before the order goes out
    pub fn prompt(&self) -> String {
        format!(
            "ATTENTION: {} on {}! Send work order to {}?",
            self.problem, self.machine_name, self.contact
        )
    }

    pub fn confirmation(&self) -> String {
        format!("Work Order Sent to {} for {}.", self.contact, self.machine_name)
    }
}

/// Share of the cycle spent on manual loading vs machine processing, in whole percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleBreakdown {
    pub manual_percent: u32,
    pub machine_percent: u32,
}

impl CycleBreakdown {
    pub fn of(m: &MachineMetrics) -> Self {
        let share = |part: f64| (part / m.actual_cycle_time * 100.0).round() as u32;
        CycleBreakdown {
            manual_percent: share(m.manual_load_time),
            machine_percent: share(m.ideal_machine_time),
        }
    }
}

/// Parallel series for the output/energy bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub output: Vec<u64>,
    pub energy: Vec<f64>,
}

impl ChartSeries {
    pub fn from_metrics(metrics: &[MachineMetrics]) -> Self {
        ChartSeries {
            labels: metrics.iter().map(|m| m.name.clone()).collect(),
            output: metrics.iter().map(|m| m.output).collect(),
            energy: metrics.iter().map(|m| m.energy).collect(),
        }
    }
}

impl fmt::Display for ChartSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16} {:>10} {:>12}", "Machine", "Outputs", "Energy (kWh)")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for ((label, output), energy) in self.labels.iter().zip(&self.output).zip(&self.energy) {
            writeln!(f, "{:<16} {:>10} {:>12.2}", label, output, energy)?;
        }
        Ok(())
    }
}

/// Text card for the bottleneck view
pub struct BottleneckCard<'a>(pub &'a MachineMetrics);

impl fmt::Display for BottleneckCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        let status = BottleneckStatus::of(m);
        let breakdown = CycleBreakdown::of(m);

        writeln!(f, "=== {} ===", m.name)?;
        writeln!(f, "  Total Cycle Time: {:.1}s", m.actual_cycle_time)?;
        writeln!(f, "  Machine Time: {:.1}s", m.ideal_machine_time)?;
        writeln!(f, "  Manual Time: {:.1}s", m.manual_load_time)?;
        writeln!(
            f,
            "  Cycle Breakdown: {}% human load | {}% machine process",
            breakdown.manual_percent, breakdown.machine_percent
        )?;
        writeln!(f, "  No. of Outputs Produced: {} units", m.output)?;
        writeln!(f, "  Status: {}", status.message())?;
        if let Some(action) = status.action() {
            writeln!(f, "  [{}] -> {}", action.label, action.contact)?;
        }
        Ok(())
    }
}

/// Text card for the energy view
pub struct EnergyCard<'a> {
    pub metrics: &'a MachineMetrics,
    pub currency: &'a str,
}

impl fmt::Display for EnergyCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metrics;
        let status = EnergyStatus::of(m);

        writeln!(f, "=== {} ===", m.name)?;
        writeln!(f, "  Power: {} kW", m.power)?;
        writeln!(f, "  Run Time: {}h", m.run_time)?;
        writeln!(f, "  Energy Used: {:.2} kWh", m.energy)?;
        writeln!(f, "  Cost: {}{:.2}", self.currency, m.cost)?;
        writeln!(f, "  Status: {}", status.message())?;
        if let Some(action) = status.action() {
            writeln!(f, "  [{}] -> {}", action.label, action.contact)?;
        }
        Ok(())
    }
}
