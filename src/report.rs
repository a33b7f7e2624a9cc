//! Weekly production report
//!
//! Static fixture data shown on the report page. It is not derived from
//! the pipeline.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Normal,
    Bottleneck,
}

impl DayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::Normal => "Normal",
            DayStatus::Bottleneck => "Bottleneck",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDay {
    pub day: String,
    pub machines: Vec<DayStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub machine_names: Vec<String>,
    pub days: Vec<ReportDay>,
}

impl WeeklyReport {
    /// The week shipped with the dashboard
    pub fn fixture() -> Self {
        use DayStatus::{Bottleneck as B, Normal as N};

        let rows: [[DayStatus; 5]; 7] = [
            [N, N, B, N, N],
            [N, B, N, N, B],
            [N, N, N, B, N],
            [B, N, N, N, N],
            [N, N, B, B, N],
            [N, N, N, N, B],
            [B, B, N, N, N],
        ];

        WeeklyReport {
            machine_names: (1..=5).map(|i| format!("Machine {}", i)).collect(),
            days: rows
                .iter()
                .enumerate()
                .map(|(i, row)| ReportDay {
                    day: format!("Day {}", i + 1),
                    machines: row.to_vec(),
                })
                .collect(),
        }
    }

    /// Number of days each machine column was marked as a bottleneck
    pub fn bottleneck_days(&self) -> Vec<(String, usize)> {
        self.machine_names
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let count = self
                    .days
                    .iter()
                    .filter(|d| d.machines.get(col) == Some(&DayStatus::Bottleneck))
                    .count();
                (name.clone(), count)
            })
            .collect()
    }
}

impl fmt::Display for WeeklyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8}", "Day")?;
        for name in &self.machine_names {
            write!(f, " {:>11}", name)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(8 + 12 * self.machine_names.len()))?;

        for day in &self.days {
            write!(f, "{:<8}", day.day)?;
            for status in &day.machines {
                write!(f, " {:>11}", status.label())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
