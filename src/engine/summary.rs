//! Run quality metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement rate | assigned / (assigned + unassigned) |
//! | Shift fill | shifts placed / shifts requested (non-skipped workers) |
//! | Degraded | assigned workers who lost at least one shift |
//! | Site fill rate | reserved slots / total slots, per site |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{WorkerOutcome, WorkerRecord};
use crate::registry::SiteRegistry;

/// Aggregate metrics for a completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Workers considered.
    pub worker_count: usize,
    /// Workers placed at a site.
    pub assigned_count: usize,
    /// Workers left without a site.
    pub unassigned_count: usize,
    /// Workers excluded by the role filter.
    pub skipped_count: usize,
    /// Placed workers who lost at least one requested shift.
    pub degraded_count: usize,
    /// Shifts requested by non-skipped workers.
    pub shifts_requested: usize,
    /// Shifts actually reserved.
    pub shifts_placed: usize,
    /// Sites in the registry.
    pub site_count: usize,
    /// Sites with no free slot left.
    pub fully_assigned_sites: usize,
    /// Reserved / total slots per site (sites with at least one slot),
    /// keyed by site identifier.
    pub fill_rate_by_site: BTreeMap<String, f64>,
}

impl RunSummary {
    /// Computes metrics from worker records and the post-run site state.
    pub fn calculate(records: &[WorkerRecord], sites: &SiteRegistry) -> Self {
        let mut summary = Self {
            worker_count: records.len(),
            site_count: sites.len(),
            fully_assigned_sites: sites.fully_assigned_count(),
            ..Default::default()
        };

        for record in records {
            match &record.outcome {
                WorkerOutcome::Assigned { shifts, dropped, .. } => {
                    summary.assigned_count += 1;
                    summary.shifts_requested += record.requested.len();
                    summary.shifts_placed += shifts.len();
                    if !dropped.is_empty() {
                        summary.degraded_count += 1;
                    }
                }
                WorkerOutcome::Unassigned => {
                    summary.unassigned_count += 1;
                    summary.shifts_requested += record.requested.len();
                }
                WorkerOutcome::Skipped => summary.skipped_count += 1,
            }
        }

        summary.fill_rate_by_site = sites
            .iter()
            .filter_map(|s| s.fill_rate().map(|rate| (s.id.clone(), rate)))
            .collect();

        summary
    }

    /// Fraction of matchable workers that were placed (1.0 when none).
    pub fn placement_rate(&self) -> f64 {
        let matchable = self.assigned_count + self.unassigned_count;
        if matchable == 0 {
            1.0
        } else {
            self.assigned_count as f64 / matchable as f64
        }
    }

    /// Fraction of requested shifts that were placed (1.0 when none).
    pub fn shift_fill_rate(&self) -> f64 {
        if self.shifts_requested == 0 {
            1.0
        } else {
            self.shifts_placed as f64 / self.shifts_requested as f64
        }
    }

    /// Mean site fill rate (0.0 when no site has slots).
    pub fn avg_site_fill_rate(&self) -> f64 {
        if self.fill_rate_by_site.is_empty() {
            0.0
        } else {
            self.fill_rate_by_site.values().sum::<f64>() / self.fill_rate_by_site.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, ShiftTable, ZoneMatrix};
    use crate::models::{Municipality, Site};

    fn record(email: &str, requested: Vec<usize>, outcome: WorkerOutcome) -> WorkerRecord {
        WorkerRecord {
            email: email.into(),
            requested,
            outcome,
        }
    }

    fn sites() -> SiteRegistry {
        let c = Configuration::new(
            ZoneMatrix::new(vec![vec![0]], 0).unwrap(),
            ShiftTable::from_weights(&[1.0, 1.0]).unwrap(),
        );
        let m = Municipality::new("Media", 1, 0);
        let mut full = Site::new("P1", m.clone(), 1, 1, &c).unwrap();
        full.reserve_shifts(&[0, 1]).unwrap();
        let half = Site::new("P2", m.clone(), 2, 1, &c).unwrap();
        let empty = Site::new("P3", m, 0, 1, &c).unwrap();
        SiteRegistry::new(vec![full, half, empty]).unwrap()
    }

    #[test]
    fn test_counts() {
        let records = vec![
            record(
                "a",
                vec![0, 1],
                WorkerOutcome::Assigned {
                    site_id: "P1".into(),
                    shifts: vec![0, 1],
                    dropped: vec![],
                },
            ),
            record(
                "b",
                vec![0, 1],
                WorkerOutcome::Assigned {
                    site_id: "P2".into(),
                    shifts: vec![0],
                    dropped: vec![1],
                },
            ),
            record("c", vec![1], WorkerOutcome::Unassigned),
            record("d", vec![0, 1], WorkerOutcome::Skipped),
        ];

        let s = RunSummary::calculate(&records, &sites());
        assert_eq!(s.worker_count, 4);
        assert_eq!(s.assigned_count, 2);
        assert_eq!(s.unassigned_count, 1);
        assert_eq!(s.skipped_count, 1);
        assert_eq!(s.degraded_count, 1);
        assert_eq!(s.shifts_requested, 5);
        assert_eq!(s.shifts_placed, 3);
        assert!((s.placement_rate() - 2.0 / 3.0).abs() < 1e-10);
        assert!((s.shift_fill_rate() - 0.6).abs() < 1e-10);
    }

    #[test]
    fn test_site_metrics() {
        let s = RunSummary::calculate(&[], &sites());
        assert_eq!(s.site_count, 3);
        // P1 exhausted and P3 has no slots at all.
        assert_eq!(s.fully_assigned_sites, 2);
        assert_eq!(s.fill_rate_by_site.len(), 2);
        assert!((s.fill_rate_by_site["P1"] - 1.0).abs() < 1e-10);
        assert!((s.fill_rate_by_site["P2"] - 0.0).abs() < 1e-10);
        assert!((s.avg_site_fill_rate() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_fill_rates_serialize_in_id_order() {
        let s = RunSummary::calculate(&[], &sites());
        let keys: Vec<&str> = s.fill_rate_by_site.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["P1", "P2"]);

        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, serde_json::to_string(&s.clone()).unwrap());
        assert!(json.find("\"P1\"").unwrap() < json.find("\"P2\"").unwrap());
    }

    #[test]
    fn test_empty_run() {
        let s = RunSummary::default();
        assert!((s.placement_rate() - 1.0).abs() < 1e-10);
        assert!((s.shift_fill_rate() - 1.0).abs() < 1e-10);
        assert!((s.avg_site_fill_rate() - 0.0).abs() < 1e-10);
    }
}
