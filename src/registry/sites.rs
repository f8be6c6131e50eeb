//! Site registry in fixed priority order.
//!
//! # Algorithm
//! 1. Sort sites once by [`SiteOrdering`] (stable; all sites kept, ties
//!    included).
//! 2. For a worker, walk sites in that order and take the first one that
//!    is not fully assigned, is proximate to the worker's zone, passes the
//!    travel-flexibility test and has a free slot on every requested shift.
//!
//! Fully-assigned sites stay in place and are skipped at query time, so the
//! traversal order never changes during a run.
//!
//! # Complexity
//! O(s * k) per query where s = sites, k = requested shifts.

use std::collections::HashMap;

use tracing::trace;

use super::{SiteOrdering, TieBreaker};
use crate::config::Configuration;
use crate::error::{StaffError, StaffResult};
use crate::models::{Site, Worker};

/// All sites, ordered by descending priority.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    index: HashMap<String, usize>,
    ordering: SiteOrdering,
}

impl SiteRegistry {
    /// Creates the registry with input-order tie-breaking.
    pub fn new(sites: Vec<Site>) -> StaffResult<Self> {
        Self::with_ordering(sites, SiteOrdering::default())
    }

    /// Creates the registry with the given ordering.
    ///
    /// Fails on a repeated site identifier.
    pub fn with_ordering(mut sites: Vec<Site>, ordering: SiteOrdering) -> StaffResult<Self> {
        ordering.sort(&mut sites);

        let mut index = HashMap::with_capacity(sites.len());
        for (i, site) in sites.iter().enumerate() {
            if index.insert(site.id.clone(), i).is_some() {
                return Err(StaffError::DuplicateSite(site.id.clone()));
            }
        }

        Ok(Self {
            sites,
            index,
            ordering,
        })
    }

    /// Site by identifier.
    pub fn get(&self, id: &str) -> Option<&Site> {
        self.index.get(id).map(|&i| &self.sites[i])
    }

    /// Sites in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether there are no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Tie-breaker used for the traversal order.
    pub fn tie_breaker(&self) -> TieBreaker {
        self.ordering.tie_breaker()
    }

    /// Number of sites with no free slot left.
    pub fn fully_assigned_count(&self) -> usize {
        self.sites.iter().filter(|s| s.is_fully_assigned()).count()
    }

    /// Highest-priority site that can take the worker's current request.
    pub fn find_site(&self, worker: &Worker, config: &Configuration) -> StaffResult<Option<&Site>> {
        Ok(self
            .position_for(worker, config)?
            .map(|i| &self.sites[i]))
    }

    /// Finds the highest-priority eligible site and reserves the worker's
    /// current shifts on it.
    ///
    /// Returns `None` (and changes nothing) when no site qualifies.
    pub fn reserve_site(
        &mut self,
        worker: &Worker,
        config: &Configuration,
    ) -> StaffResult<Option<&Site>> {
        let Some(i) = self.position_for(worker, config)? else {
            return Ok(None);
        };

        let site = &mut self.sites[i];
        site.reserve_shifts(worker.shifts())?;
        Ok(Some(&*site))
    }

    fn position_for(&self, worker: &Worker, config: &Configuration) -> StaffResult<Option<usize>> {
        let zone = worker.zone();
        let shifts = worker.shifts();

        for (i, site) in self.sites.iter().enumerate() {
            if site.is_fully_assigned() {
                continue;
            }
            if !site.is_proximate(zone, config)? {
                continue;
            }
            if !site.meets_travel_flexibility(worker) {
                continue;
            }
            if !site.has_available_shifts(shifts) {
                continue;
            }

            trace!(worker = %worker.email, site = %site.id, "eligible site");
            return Ok(Some(i));
        }

        Ok(None)
    }
}
