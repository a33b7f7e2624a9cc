//! Error types for the monitoring core

use thiserror::Error;

use crate::models::{Field, View};

/// Errors raised by metric derivation, classification and the dashboard
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    #[error("invalid {field} for machine {machine}: {reason}")]
    InvalidInput {
        machine: String,
        field: Field,
        reason: String,
    },

    #[error("cannot classify an empty cohort")]
    EmptyCohort,

    #[error("unknown machine '{0}'")]
    UnknownMachine(String),

    #[error("{field} cannot be edited from the {view} view")]
    FieldNotEditable { field: Field, view: View },

    #[error("malformed edit '{0}', expected ID.field=value")]
    MalformedEdit(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid credentials")]
    AuthenticationFailed,

    #[error("login required")]
    NotLoggedIn,
}

impl MonitorError {
    pub(crate) fn invalid(machine: &str, field: Field, reason: impl Into<String>) -> Self {
        MonitorError::InvalidInput {
            machine: machine.to_string(),
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for the monitoring core
pub type Result<T> = std::result::Result<T, MonitorError>;
