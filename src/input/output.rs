//! Output rows: one per worker, in input order.

use serde::{Deserialize, Serialize};

use crate::engine::{AssignmentRun, WorkerOutcome};

/// Status column of an output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Assigned,
    Unassigned,
    Skipped,
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub email: String,
    /// Site identifier, `null` unless assigned.
    pub site: Option<String>,
    /// Final shift numbers joined with `,`; empty unless assigned.
    pub shifts: String,
    pub status: RowStatus,
}

impl AssignmentRun {
    /// Output rows in worker input order.
    pub fn rows(&self) -> Vec<AssignmentRow> {
        self.records
            .iter()
            .map(|r| AssignmentRow {
                email: r.email.clone(),
                site: r.outcome.site_id().map(str::to_string),
                shifts: r.outcome.shifts_string(),
                status: match r.outcome {
                    WorkerOutcome::Assigned { .. } => RowStatus::Assigned,
                    WorkerOutcome::Unassigned => RowStatus::Unassigned,
                    WorkerOutcome::Skipped => RowStatus::Skipped,
                },
            })
            .collect()
    }
}
