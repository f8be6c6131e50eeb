//! Site priority ordering.
//!
//! Sites are compared by municipality priority (descending), then by
//! busiest-shift priority (descending). Remaining ties are broken by a
//! configurable [`TieBreaker`] so traversal is always deterministic and no
//! two sites ever compare as the same entry.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::Site;

/// How sites with equal priorities are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Keep input order (stable sort).
    #[default]
    InputOrder,
    /// Lexicographic by site identifier.
    ById,
}

/// Comparator for the site traversal order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteOrdering {
    tie_breaker: TieBreaker,
}

impl SiteOrdering {
    /// Creates an ordering with the given tie-breaker.
    pub fn new(tie_breaker: TieBreaker) -> Self {
        Self { tie_breaker }
    }

    /// The configured tie-breaker.
    pub fn tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    /// Compares two sites; `Less` means `a` is visited first.
    pub fn compare(&self, a: &Site, b: &Site) -> Ordering {
        b.municipality
            .priority
            .cmp(&a.municipality.priority)
            .then_with(|| b.busiest_shift_priority.cmp(&a.busiest_shift_priority))
            .then_with(|| match self.tie_breaker {
                TieBreaker::InputOrder => Ordering::Equal,
                TieBreaker::ById => a.id.cmp(&b.id),
            })
    }

    /// Sorts sites into traversal order. Stable, so `InputOrder` ties keep
    /// their relative input positions.
    pub fn sort(&self, sites: &mut [Site]) {
        sites.sort_by(|a, b| self.compare(a, b));
    }
}
