use thiserror::Error;

use crate::planner::WizardStep;

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Error type that captures wizard, assembly and storage failures.
///
/// Catalog lookups never appear here: an unknown room or item degrades to an
/// empty result instead of failing.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Wizard state read before the form was built")]
    NotInitialized,
    #[error("Step index {0} is out of range")]
    InvalidStep(usize),
    #[error("Field `{field}` does not exist on the {step} step")]
    UnknownField { step: WizardStep, field: String },
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("Estimate request is incomplete: missing {0}")]
    Incomplete(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
