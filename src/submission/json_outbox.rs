use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::EstimateRequest;
use crate::errors::{PlannerError, PlannerResult};
use crate::utils::persistence::{ensure_dir, load_json, save_json};

use super::{EstimateSubmitter, SubmissionReceipt};

const FILE_PREFIX: &str = "estimate_";
const FILE_EXTENSION: &str = "json";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// On-disk envelope: the receipt next to the request it acknowledges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboxEntry {
    pub receipt: SubmissionReceipt,
    pub request: EstimateRequest,
}

/// Submitter that queues requests as JSON files in a directory, one file per
/// request, for a backend to pick up.
#[derive(Debug, Clone)]
pub struct JsonOutbox {
    dir: PathBuf,
}

impl JsonOutbox {
    pub fn new(dir: impl Into<PathBuf>) -> PlannerResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Receipts of every queued request, newest first.
    pub fn list(&self) -> PlannerResult<Vec<SubmissionReceipt>> {
        let mut receipts = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !is_outbox_file(&path) {
                continue;
            }
            match load_json::<OutboxEntry>(&path) {
                Ok(stored) => receipts.push(stored.receipt),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "skipping unreadable outbox entry"
                    );
                }
            }
        }
        receipts.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(receipts)
    }

    pub fn load(&self, id: Uuid) -> PlannerResult<OutboxEntry> {
        let needle = id.to_string();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let matches = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(|stem| stem.ends_with(&needle))
                .unwrap_or(false);
            if matches && is_outbox_file(&path) {
                return load_json(&path);
            }
        }
        Err(PlannerError::Storage(format!(
            "estimate request `{}` not found in outbox",
            id
        )))
    }
}

impl EstimateSubmitter for JsonOutbox {
    fn submit(&self, request: &EstimateRequest) -> PlannerResult<SubmissionReceipt> {
        let receipt = SubmissionReceipt {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            customer: request.customer.user_name.clone(),
        };
        let file_name = format!(
            "{}{}_{}.{}",
            FILE_PREFIX,
            receipt.submitted_at.format(TIMESTAMP_FORMAT),
            receipt.id,
            FILE_EXTENSION
        );
        let entry = OutboxEntry {
            receipt: receipt.clone(),
            request: request.clone(),
        };
        save_json(&entry, &self.dir.join(&file_name))?;
        tracing::info!(id = %receipt.id, file = %file_name, "estimate request queued");
        Ok(receipt)
    }
}

fn is_outbox_file(path: &Path) -> bool {
    let has_prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(FILE_PREFIX))
        .unwrap_or(false);
    has_prefix && path.extension().and_then(|ext| ext.to_str()) == Some(FILE_EXTENSION)
}
