//! Worker (volunteer) model.
//!
//! A worker requests an ordered list of shifts and declares how far they
//! are willing to travel. During a run the request may shrink: the engine
//! drops the lowest-weight shift each time no site can take the whole
//! request.

use serde::{Deserialize, Serialize};

use super::Municipality;
use crate::config::{join_shift_numbers, split_multivalue, Configuration, ShiftNumber, ZoneId};
use crate::error::{StaffError, StaffResult};

/// Volunteer roles offered on the sign-up form.
///
/// Parsing never fails: unrecognised text maps to [`Role::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    PollGreeter,
    PollWatcher,
    ElectionProtection,
    Gotv,
    Driver,
    Whatever,
    Other,
}

impl Role {
    const TABLE: [(&'static str, Role); 6] = [
        ("Poll Greeter", Role::PollGreeter),
        ("Poll Watcher (Delco residents only)", Role::PollWatcher),
        (
            "Election Protection (must be an attorney, but don't need to live in Delco)",
            Role::ElectionProtection,
        ),
        ("GOTV (voter outreach on Election Day)", Role::Gotv),
        ("Driver", Role::Driver),
        ("Whatever you need me to do", Role::Whatever),
    ];

    /// Maps a form string to a role, falling back to `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::TABLE
            .iter()
            .find(|(text, _)| *text == label)
            .map(|(_, role)| *role)
            .unwrap_or(Role::Other)
    }

    /// Parses a comma-separated roles cell.
    pub fn parse_list(value: &str) -> Vec<Self> {
        split_multivalue(value)
            .into_iter()
            .map(Self::from_label)
            .collect()
    }
}

/// How far a worker is willing to travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelFlexibility {
    /// Any site in the county.
    AnywhereInCounty,
    /// Any site in the worker's own municipality.
    AnywhereInMunicipality,
    /// Only the worker's declared home site.
    MyPollOnly,
}

impl TravelFlexibility {
    const TABLE: [(&'static str, TravelFlexibility); 3] = [
        ("Anywhere in the county", TravelFlexibility::AnywhereInCounty),
        (
            "Anywhere in my municipality",
            TravelFlexibility::AnywhereInMunicipality,
        ),
        ("Only at my polling location", TravelFlexibility::MyPollOnly),
    ];

    /// Maps a form string to a travel mode. There is no fallback.
    pub fn from_label(label: &str) -> StaffResult<Self> {
        let label = label.trim();
        Self::TABLE
            .iter()
            .find(|(text, _)| *text == label)
            .map(|(_, t)| *t)
            .ok_or_else(|| StaffError::UnknownTravelFlexibility(label.to_string()))
    }
}

/// A volunteer to be placed at a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    /// Unique email address.
    pub email: String,
    /// Home municipality (its zone is the worker's zone).
    pub municipality: Municipality,
    /// Requested roles.
    pub roles: Vec<Role>,
    /// Travel mode.
    pub travel_flexibility: TravelFlexibility,
    /// Home site identifier; only consulted for `MyPollOnly`.
    pub home_site: Option<String>,
    /// Currently requested shifts, in request order.
    shifts: Vec<ShiftNumber>,
    /// Shifts as originally requested.
    requested_shifts: Vec<ShiftNumber>,
}

impl Worker {
    /// Creates a worker with no roles, no home site and no shifts.
    pub fn new(
        email: impl Into<String>,
        municipality: Municipality,
        travel_flexibility: TravelFlexibility,
    ) -> Self {
        Self {
            email: email.into(),
            municipality,
            roles: Vec::new(),
            travel_flexibility,
            home_site: None,
            shifts: Vec::new(),
            requested_shifts: Vec::new(),
        }
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Replaces the roles.
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Sets the home site.
    pub fn with_home_site(mut self, site_id: impl Into<String>) -> Self {
        self.home_site = Some(site_id.into());
        self
    }

    /// Sets the requested shifts.
    pub fn with_shifts(mut self, shifts: Vec<ShiftNumber>) -> Self {
        self.requested_shifts = shifts.clone();
        self.shifts = shifts;
        self
    }

    /// The worker's zone (their municipality's zone).
    #[inline]
    pub fn zone(&self) -> ZoneId {
        self.municipality.zone
    }

    /// Currently requested shifts.
    pub fn shifts(&self) -> &[ShiftNumber] {
        &self.shifts
    }

    /// Shifts as requested before any degrading.
    pub fn requested_shifts(&self) -> &[ShiftNumber] {
        &self.requested_shifts
    }

    /// Whether any shift has been dropped.
    pub fn is_degraded(&self) -> bool {
        self.shifts.len() < self.requested_shifts.len()
    }

    /// Current shifts joined with `,`.
    pub fn shifts_string(&self) -> String {
        join_shift_numbers(&self.shifts)
    }

    /// Whether the worker volunteered for any of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.roles.iter().any(|r| roles.contains(r))
    }

    /// Drops the lowest-weight requested shift.
    ///
    /// With two or more shifts, removes the one with the smallest weight
    /// (first occurrence on ties) and returns it. With one or none, leaves
    /// the request unchanged and returns `None`.
    pub fn remove_lowest_weight_shift(
        &mut self,
        config: &Configuration,
    ) -> StaffResult<Option<ShiftNumber>> {
        if self.shifts.len() < 2 {
            return Ok(None);
        }

        let mut lowest_idx = 0;
        let mut lowest_weight = config.shift_weight(self.shifts[0])?;
        for (i, &shift) in self.shifts.iter().enumerate().skip(1) {
            let weight = config.shift_weight(shift)?;
            if weight < lowest_weight {
                lowest_weight = weight;
                lowest_idx = i;
            }
        }

        Ok(Some(self.shifts.remove(lowest_idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ShiftTable, ZoneMatrix};

    fn config(weights: &[f64]) -> Configuration {
        Configuration::new(
            ZoneMatrix::new(vec![vec![0]], 0).unwrap(),
            ShiftTable::from_weights(weights).unwrap(),
        )
    }

    fn worker(shifts: Vec<ShiftNumber>) -> Worker {
        Worker::new(
            "w@example.org",
            Municipality::new("Media", 1, 0),
            TravelFlexibility::AnywhereInCounty,
        )
        .with_shifts(shifts)
    }

    #[test]
    fn test_role_table() {
        assert_eq!(Role::from_label("Poll Greeter"), Role::PollGreeter);
        assert_eq!(
            Role::from_label("Poll Watcher (Delco residents only)"),
            Role::PollWatcher
        );
        assert_eq!(
            Role::from_label(
                "Election Protection (must be an attorney, but don't need to live in Delco)"
            ),
            Role::ElectionProtection
        );
        assert_eq!(
            Role::from_label("GOTV (voter outreach on Election Day)"),
            Role::Gotv
        );
        assert_eq!(Role::from_label("Driver"), Role::Driver);
        assert_eq!(Role::from_label("Whatever you need me to do"), Role::Whatever);
        assert_eq!(Role::from_label("Juggler"), Role::Other);
        assert_eq!(Role::from_label(""), Role::Other);
    }

    #[test]
    fn test_role_list() {
        let roles = Role::parse_list("Driver, Poll Greeter, Balloon artist");
        assert_eq!(roles, vec![Role::Driver, Role::PollGreeter, Role::Other]);
        assert!(Role::parse_list("  ").is_empty());
    }

    #[test]
    fn test_travel_flexibility_table() {
        assert_eq!(
            TravelFlexibility::from_label("Anywhere in the county").unwrap(),
            TravelFlexibility::AnywhereInCounty
        );
        assert_eq!(
            TravelFlexibility::from_label("Anywhere in my municipality").unwrap(),
            TravelFlexibility::AnywhereInMunicipality
        );
        assert_eq!(
            TravelFlexibility::from_label(" Only at my polling location ").unwrap(),
            TravelFlexibility::MyPollOnly
        );
        assert!(matches!(
            TravelFlexibility::from_label("Only on weekends"),
            Err(StaffError::UnknownTravelFlexibility(_))
        ));
    }

    #[test]
    fn test_remove_lowest_weight_shift() {
        let c = config(&[0.8, 0.2, 1.0]);
        let mut w = worker(vec![0, 1, 2]);

        assert_eq!(w.remove_lowest_weight_shift(&c).unwrap(), Some(1));
        assert_eq!(w.shifts(), &[0, 2]);
        assert_eq!(w.remove_lowest_weight_shift(&c).unwrap(), Some(0));
        assert_eq!(w.shifts(), &[2]);
        assert!(w.is_degraded());
        assert_eq!(w.requested_shifts(), &[0, 1, 2]);
    }

    #[test]
    fn test_degrade_is_strictly_monotone() {
        let c = config(&[0.3, 0.9, 0.1, 0.5, 0.7]);
        let mut w = worker(vec![4, 3, 2, 1, 0]);

        let mut previous = w.shifts().len();
        while w.remove_lowest_weight_shift(&c).unwrap().is_some() {
            assert_eq!(w.shifts().len(), previous - 1);
            previous = w.shifts().len();
        }
        assert_eq!(w.shifts(), &[1]);

        // Further calls leave the list unchanged.
        assert_eq!(w.remove_lowest_weight_shift(&c).unwrap(), None);
        assert_eq!(w.shifts(), &[1]);
    }

    #[test]
    fn test_degrade_tie_drops_first_occurrence() {
        let c = config(&[0.5, 0.5, 1.0]);
        let mut w = worker(vec![2, 1, 0]);
        assert_eq!(w.remove_lowest_weight_shift(&c).unwrap(), Some(1));
        assert_eq!(w.shifts(), &[2, 0]);
    }

    #[test]
    fn test_degrade_single_and_empty() {
        let c = config(&[1.0]);
        let mut single = worker(vec![0]);
        assert_eq!(single.remove_lowest_weight_shift(&c).unwrap(), None);
        assert_eq!(single.shifts(), &[0]);

        let mut empty = worker(vec![]);
        assert_eq!(empty.remove_lowest_weight_shift(&c).unwrap(), None);
        assert!(!empty.is_degraded());
    }

    #[test]
    fn test_degrade_unknown_shift_is_error() {
        let c = config(&[1.0]);
        let mut w = worker(vec![0, 5]);
        assert!(w.remove_lowest_weight_shift(&c).is_err());
        assert_eq!(w.shifts(), &[0, 5]);
    }

    #[test]
    fn test_shifts_string_and_roles() {
        let w = worker(vec![3, 0]).with_role(Role::Driver);
        assert_eq!(w.shifts_string(), "3,0");
        assert!(w.has_any_role(&[Role::PollGreeter, Role::Driver]));
        assert!(!w.has_any_role(&[Role::PollGreeter]));
    }
}
