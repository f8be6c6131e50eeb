//! Per-worker outcomes of a run.

use serde::{Deserialize, Serialize};

use super::RunSummary;
use crate::config::{join_shift_numbers, ShiftNumber};

/// Terminal state of one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkerOutcome {
    /// Placed at a site for `shifts` (possibly fewer than requested).
    Assigned {
        site_id: String,
        shifts: Vec<ShiftNumber>,
        /// Shifts dropped while degrading, in drop order.
        dropped: Vec<ShiftNumber>,
    },
    /// No site could take even a single remaining shift.
    Unassigned,
    /// Excluded by the role filter; never matched.
    Skipped,
}

impl WorkerOutcome {
    /// Whether the worker was placed.
    pub fn is_assigned(&self) -> bool {
        matches!(self, WorkerOutcome::Assigned { .. })
    }

    /// Site identifier, if placed.
    pub fn site_id(&self) -> Option<&str> {
        match self {
            WorkerOutcome::Assigned { site_id, .. } => Some(site_id),
            _ => None,
        }
    }

    /// Final shifts, if placed.
    pub fn shifts(&self) -> Option<&[ShiftNumber]> {
        match self {
            WorkerOutcome::Assigned { shifts, .. } => Some(shifts),
            _ => None,
        }
    }

    /// Final shifts joined with `,`; empty unless placed.
    pub fn shifts_string(&self) -> String {
        self.shifts().map(join_shift_numbers).unwrap_or_default()
    }

    /// Whether the worker was placed with fewer shifts than requested.
    pub fn is_degraded(&self) -> bool {
        matches!(self, WorkerOutcome::Assigned { dropped, .. } if !dropped.is_empty())
    }
}

/// One worker's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Worker email.
    pub email: String,
    /// Shifts the worker originally requested.
    pub requested: Vec<ShiftNumber>,
    /// Terminal state.
    pub outcome: WorkerOutcome,
}

/// Result of a full run: one record per worker, in worker input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRun {
    /// Worker records in input order.
    pub records: Vec<WorkerRecord>,
    /// Aggregate metrics.
    pub summary: RunSummary,
}

impl AssignmentRun {
    /// Record for a worker.
    pub fn record_for(&self, email: &str) -> Option<&WorkerRecord> {
        self.records.iter().find(|r| r.email == email)
    }

    /// Outcome for a worker.
    pub fn outcome_for(&self, email: &str) -> Option<&WorkerOutcome> {
        self.record_for(email).map(|r| &r.outcome)
    }

    /// Records of placed workers.
    pub fn assigned(&self) -> impl Iterator<Item = &WorkerRecord> {
        self.records.iter().filter(|r| r.outcome.is_assigned())
    }

    /// Emails of workers left unassigned.
    pub fn unassigned_emails(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.outcome == WorkerOutcome::Unassigned)
            .map(|r| r.email.as_str())
            .collect()
    }

    /// Records of workers placed at a site.
    pub fn assignments_for_site<'a>(
        &'a self,
        site_id: &'a str,
    ) -> impl Iterator<Item = &'a WorkerRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.outcome.site_id() == Some(site_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let placed = WorkerOutcome::Assigned {
            site_id: "P1".into(),
            shifts: vec![0, 2],
            dropped: vec![1],
        };
        assert!(placed.is_assigned());
        assert!(placed.is_degraded());
        assert_eq!(placed.site_id(), Some("P1"));
        assert_eq!(placed.shifts_string(), "0,2");

        assert!(!WorkerOutcome::Unassigned.is_assigned());
        assert_eq!(WorkerOutcome::Unassigned.shifts_string(), "");
        assert_eq!(WorkerOutcome::Skipped.site_id(), None);
    }

    #[test]
    fn test_run_lookups() {
        let placed = |site: &str, shifts: Vec<usize>| WorkerOutcome::Assigned {
            site_id: site.into(),
            shifts,
            dropped: vec![],
        };
        let record = |email: &str, outcome| WorkerRecord {
            email: email.into(),
            requested: vec![0],
            outcome,
        };
        let run = AssignmentRun {
            records: vec![
                record("a", placed("P1", vec![0])),
                record("b", WorkerOutcome::Unassigned),
                record("c", placed("P2", vec![0])),
                record("d", placed("P1", vec![1])),
                record("e", WorkerOutcome::Skipped),
            ],
            summary: RunSummary::default(),
        };

        let at_p1: Vec<&str> = run.assignments_for_site("P1").map(|r| r.email.as_str()).collect();
        assert_eq!(at_p1, vec!["a", "d"]);
        assert_eq!(run.assignments_for_site("P9").count(), 0);
        assert_eq!(run.assigned().count(), 3);
        assert_eq!(run.unassigned_emails(), vec!["b"]);
        assert_eq!(run.outcome_for("e"), Some(&WorkerOutcome::Skipped));
        assert!(run.record_for("z").is_none());
    }

    #[test]
    fn test_outcome_serde_tag() {
        let json = serde_json::to_value(WorkerOutcome::Unassigned).unwrap();
        assert_eq!(json["status"], "unassigned");

        let placed = WorkerOutcome::Assigned {
            site_id: "P1".into(),
            shifts: vec![0],
            dropped: vec![],
        };
        let json = serde_json::to_value(&placed).unwrap();
        assert_eq!(json["status"], "assigned");
        assert_eq!(json["site_id"], "P1");
    }
}
