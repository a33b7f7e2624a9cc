//! Factory floor monitor
//!
//! Derives cycle time, output, energy and cost for a cohort of machines and
//! flags process, operator and cost bottlenecks against the cohort average.

pub mod calculator;
pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod presentation;
pub mod report;
pub mod scheduler;

pub use config::{MonitorConfig, PipelineConfig};
pub use error::{MonitorError, Result};
pub use models::{Field, MachineInput, MachineMetrics, Page, View};
pub use pipeline::{Cohort, Edit, Snapshot, run_pipeline};
