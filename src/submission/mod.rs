//! Hand-off of assembled estimate requests to whatever prices them.

pub mod json_outbox;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::EstimateRequest;
use crate::errors::PlannerResult;

pub use json_outbox::JsonOutbox;

/// Acknowledgement returned once a request has been accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub customer: String,
}

/// Destination for estimate requests. The wire format is owned by the
/// implementation.
pub trait EstimateSubmitter {
    fn submit(&self, request: &EstimateRequest) -> PlannerResult<SubmissionReceipt>;
}
