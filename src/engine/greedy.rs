//! Priority-ordered greedy assignment with degrade-and-retry.
//!
//! # Algorithm
//!
//! 1. Walk workers in input order (first come, first served).
//! 2. For each worker, take the highest-priority site that can hold the
//!    whole remaining request and reserve it.
//! 3. If no site qualifies, drop the worker's lowest-weight shift and retry.
//! 4. Stop when a site is reserved or only one shift is left and still no
//!    site qualifies.
//!
//! Dropping a shift can only make more sites eligible, so each worker takes
//! at most `requested shifts` attempts.
//!
//! # Complexity
//! O(w * k * s * k) where w = workers, k = shifts per request, s = sites.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{AssignmentRun, RunSummary, WorkerOutcome, WorkerRecord};
use crate::config::Configuration;
use crate::error::StaffResult;
use crate::models::{Municipality, Role, Site, TravelFlexibility, Worker};
use crate::registry::{SiteOrdering, SiteRegistry, TieBreaker, WorkerRegistry};
use crate::validation::validate_input;

/// Engine options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentOptions {
    /// Only workers holding at least one of these roles are matched.
    /// `None` matches everyone.
    pub role_filter: Option<Vec<Role>>,
    /// Ordering of sites with equal priorities.
    pub tie_breaker: TieBreaker,
}

impl AssignmentOptions {
    /// Options matching only poll greeters and poll watchers.
    pub fn poll_roles() -> Self {
        Self {
            role_filter: Some(vec![Role::PollGreeter, Role::PollWatcher]),
            ..Default::default()
        }
    }

    /// Sets the role filter.
    pub fn with_role_filter(mut self, roles: Vec<Role>) -> Self {
        self.role_filter = Some(roles);
        self
    }

    /// Sets the tie-breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }
}

/// Input container for a run.
#[derive(Debug, Clone)]
pub struct AssignmentRequest {
    /// Zone and shift configuration.
    pub config: Configuration,
    /// Sites in priority order.
    pub sites: SiteRegistry,
    /// Workers in input order.
    pub workers: WorkerRegistry,
}

impl AssignmentRequest {
    /// Creates a request from already-built registries.
    pub fn new(config: Configuration, sites: SiteRegistry, workers: WorkerRegistry) -> Self {
        Self {
            config,
            sites,
            workers,
        }
    }

    /// Validates raw inputs and builds the registries.
    ///
    /// Every integrity problem is reported at once as
    /// [`StaffError::Validation`](crate::error::StaffError::Validation).
    pub fn build(
        config: Configuration,
        municipalities: &[Municipality],
        sites: Vec<Site>,
        workers: Vec<Worker>,
        tie_breaker: TieBreaker,
    ) -> StaffResult<Self> {
        validate_input(&config, municipalities, &sites, &workers)?;

        let sites = SiteRegistry::with_ordering(sites, SiteOrdering::new(tie_breaker))?;
        let workers = WorkerRegistry::new(workers);
        Ok(Self::new(config, sites, workers))
    }
}

/// Greedy worker-to-site allocator.
///
/// # Example
///
/// ```
/// use u_staff::config::{Configuration, ShiftTable, ZoneMatrix};
/// use u_staff::engine::AssignmentEngine;
/// use u_staff::models::{Municipality, Site, TravelFlexibility, Worker};
/// use u_staff::registry::{SiteRegistry, WorkerRegistry};
///
/// let config = Configuration::new(
///     ZoneMatrix::new(vec![vec![0, 1], vec![1, 0]], 1).unwrap(),
///     ShiftTable::from_weights(&[1.0, 0.5]).unwrap(),
/// );
/// let media = Municipality::new("Media", 10, 0);
/// let mut sites = SiteRegistry::new(vec![
///     Site::new("Media-1", media.clone(), 2, 10, &config).unwrap(),
/// ])
/// .unwrap();
/// let mut workers = WorkerRegistry::new(vec![
///     Worker::new("a@example.org", media, TravelFlexibility::AnywhereInCounty)
///         .with_shifts(vec![0, 1]),
/// ]);
///
/// let run = AssignmentEngine::new()
///     .run(&config, &mut sites, &mut workers)
///     .unwrap();
/// assert_eq!(run.outcome_for("a@example.org").unwrap().site_id(), Some("Media-1"));
/// assert_eq!(run.summary.assigned_count, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssignmentEngine {
    options: AssignmentOptions,
}

impl AssignmentEngine {
    /// Creates an engine that matches every worker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with options.
    pub fn with_options(options: AssignmentOptions) -> Self {
        Self { options }
    }

    /// Engine options.
    pub fn options(&self) -> &AssignmentOptions {
        &self.options
    }

    /// Runs a request, consuming its site capacity.
    pub fn run_request(&self, request: &mut AssignmentRequest) -> StaffResult<AssignmentRun> {
        self.run(&request.config, &mut request.sites, &mut request.workers)
    }

    /// Assigns every worker in input order.
    ///
    /// Unplaced workers are reported, not raised. Configuration errors
    /// (unknown shift, zone out of range) abort the run.
    pub fn run(
        &self,
        config: &Configuration,
        sites: &mut SiteRegistry,
        workers: &mut WorkerRegistry,
    ) -> StaffResult<AssignmentRun> {
        let mut records = Vec::with_capacity(workers.len());

        for worker in workers.iter_mut() {
            let requested = worker.shifts().to_vec();
            let outcome = self.assign_worker(worker, sites, config)?;
            records.push(WorkerRecord {
                email: worker.email.clone(),
                requested,
                outcome,
            });
        }

        let summary = RunSummary::calculate(&records, sites);
        info!(
            workers = summary.worker_count,
            assigned = summary.assigned_count,
            unassigned = summary.unassigned_count,
            skipped = summary.skipped_count,
            degraded = summary.degraded_count,
            full_sites = summary.fully_assigned_sites,
            "assignment run complete"
        );

        Ok(AssignmentRun { records, summary })
    }

    /// Places one worker, shrinking their request as needed.
    ///
    /// A home-site-only worker whose home site is missing or unknown goes
    /// through the same loop: no site matches, the request degrades to a
    /// single shift, and the outcome is `Unassigned`.
    pub fn assign_worker(
        &self,
        worker: &mut Worker,
        sites: &mut SiteRegistry,
        config: &Configuration,
    ) -> StaffResult<WorkerOutcome> {
        if let Some(roles) = &self.options.role_filter {
            if !worker.has_any_role(roles) {
                debug!(worker = %worker.email, "skipped by role filter");
                return Ok(WorkerOutcome::Skipped);
            }
        }

        if worker.travel_flexibility == TravelFlexibility::MyPollOnly
            && worker.home_site.as_deref().and_then(|h| sites.get(h)).is_none()
        {
            warn!(
                worker = %worker.email,
                home_site = ?worker.home_site,
                "home site only, but home site is missing or unknown"
            );
        }

        let mut dropped = Vec::new();
        loop {
            if let Some(site) = sites.reserve_site(worker, config)? {
                debug!(
                    worker = %worker.email,
                    site = %site.id,
                    shifts = %worker.shifts_string(),
                    "assigned"
                );
                return Ok(WorkerOutcome::Assigned {
                    site_id: site.id.clone(),
                    shifts: worker.shifts().to_vec(),
                    dropped,
                });
            }

            let Some(removed) = worker.remove_lowest_weight_shift(config)? else {
                debug!(worker = %worker.email, "no site available");
                return Ok(WorkerOutcome::Unassigned);
            };
            dropped.push(removed);
            debug!(
                worker = %worker.email,
                remaining = %worker.shifts_string(),
                "dropped lowest-weight shift"
            );
        }
    }
}
