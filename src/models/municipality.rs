//! Municipality model.

use serde::{Deserialize, Serialize};

use crate::config::ZoneId;

/// A municipality owning sites and workers.
///
/// Identity is by name. Sites of higher-priority municipalities are
/// served first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    /// Unique municipality name.
    pub name: String,
    /// Service priority (higher = served first).
    pub priority: i32,
    /// Home zone.
    pub zone: ZoneId,
}

impl Municipality {
    /// Creates a municipality.
    pub fn new(name: impl Into<String>, priority: i32, zone: ZoneId) -> Self {
        Self {
            name: name.into(),
            priority,
            zone,
        }
    }

    /// Name equality (the identity used by travel-flexibility checks).
    #[inline]
    pub fn is_same(&self, other: &Municipality) -> bool {
        self.name == other.name
    }
}
