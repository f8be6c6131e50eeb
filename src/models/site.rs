//! Site (poll) model and per-shift capacity.
//!
//! A site is expanded into one [`SiteShift`] per configured shift when it is
//! constructed, so capacity and priority are frozen before any reservation.
//! Afterwards the only mutation is [`Site::reserve_shifts`].
//!
//! # Capacity invariant
//! For every shift, `0 <= available_slots <= total_slots`. Reservation
//! checks the whole request first and touches no counter unless every
//! requested shift has a free slot.

use serde::{Deserialize, Serialize};

use super::{Municipality, TravelFlexibility, Worker};
use crate::config::{Configuration, ShiftNumber, ZoneId};
use crate::error::{StaffError, StaffResult};

/// Capacity of one shift at one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteShift {
    /// Shift number (index into the shift table).
    pub shift_number: ShiftNumber,
    /// Derived priority: `round(weight * busiest_shift_priority)`.
    pub priority: i32,
    /// Derived capacity: `round(weight * busiest_shift_slots)`.
    pub total_slots: u32,
    /// Slots not yet reserved.
    pub available_slots: u32,
}

impl SiteShift {
    /// Whether no slot is left.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.available_slots == 0
    }

    /// Slots already reserved.
    #[inline]
    pub fn reserved_slots(&self) -> u32 {
        self.total_slots - self.available_slots
    }
}

/// A physical site with per-shift slot capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Unique site identifier.
    pub id: String,
    /// Owning municipality (its zone is the site's zone).
    pub municipality: Municipality,
    /// Slot count of the site's busiest shift.
    pub busiest_shift_slots: u32,
    /// Priority of the site's busiest shift.
    pub busiest_shift_priority: i32,
    shifts: Vec<SiteShift>,
    fully_assigned: bool,
}

impl Site {
    /// Creates a site and derives one shift per configured shift.
    pub fn new(
        id: impl Into<String>,
        municipality: Municipality,
        busiest_shift_slots: u32,
        busiest_shift_priority: i32,
        config: &Configuration,
    ) -> StaffResult<Self> {
        let mut shifts = Vec::with_capacity(config.shift_count());
        for shift_number in 0..config.shift_count() {
            let total_slots = config.calculate_shift_slots(shift_number, busiest_shift_slots)?;
            shifts.push(SiteShift {
                shift_number,
                priority: config.calculate_shift_priority(shift_number, busiest_shift_priority)?,
                total_slots,
                available_slots: total_slots,
            });
        }

        let fully_assigned = shifts.iter().all(SiteShift::is_exhausted);

        Ok(Self {
            id: id.into(),
            municipality,
            busiest_shift_slots,
            busiest_shift_priority,
            shifts,
            fully_assigned,
        })
    }

    /// The site's zone.
    #[inline]
    pub fn zone(&self) -> ZoneId {
        self.municipality.zone
    }

    /// Per-shift capacity, in shift-number order.
    pub fn shifts(&self) -> &[SiteShift] {
        &self.shifts
    }

    /// Capacity record for one shift.
    pub fn shift(&self, shift: ShiftNumber) -> Option<&SiteShift> {
        self.shifts.get(shift)
    }

    /// Whether every shift has zero available slots.
    #[inline]
    pub fn is_fully_assigned(&self) -> bool {
        self.fully_assigned
    }

    /// Whether `zone` is proximate to this site, using the site's zone as
    /// the matrix row.
    pub fn is_proximate(&self, zone: ZoneId, config: &Configuration) -> StaffResult<bool> {
        config.are_zones_proximate(self.zone(), zone)
    }

    /// Whether the worker's travel mode allows this site.
    pub fn meets_travel_flexibility(&self, worker: &Worker) -> bool {
        match worker.travel_flexibility {
            TravelFlexibility::AnywhereInCounty => true,
            TravelFlexibility::AnywhereInMunicipality => {
                self.municipality.is_same(&worker.municipality)
            }
            TravelFlexibility::MyPollOnly => worker.home_site.as_deref() == Some(self.id.as_str()),
        }
    }

    /// Whether every requested shift has a free slot.
    ///
    /// A shift number repeated in the request needs one slot per
    /// occurrence, the same rule [`Site::reserve_shifts`] enforces. An empty
    /// request is vacuously available; an unknown shift number is not.
    /// Never mutates.
    pub fn has_available_shifts(&self, shifts: &[ShiftNumber]) -> bool {
        shifts.iter().enumerate().all(|(i, &s)| {
            let wanted = occurrences(&shifts[..=i], s);
            self.shifts
                .get(s)
                .is_some_and(|shift| shift.available_slots >= wanted)
        })
    }

    /// Reserves one slot on each requested shift.
    ///
    /// Fails without changing any counter if a shift is unknown or has no
    /// free slot. Refreshes the fully-assigned flag afterwards.
    pub fn reserve_shifts(&mut self, shifts: &[ShiftNumber]) -> StaffResult<()> {
        for &s in shifts {
            match self.shifts.get(s) {
                None => {
                    return Err(StaffError::ShiftOutOfRange {
                        shift: s,
                        shift_count: self.shifts.len(),
                    })
                }
                Some(shift) if shift.is_exhausted() => {
                    return Err(StaffError::SlotsExhausted {
                        site_id: self.id.clone(),
                        shift: s,
                    })
                }
                Some(_) => {}
            }
        }

        // A repeated shift number needs one slot per occurrence.
        for (i, &s) in shifts.iter().enumerate() {
            let wanted = occurrences(&shifts[..=i], s);
            if wanted > self.shifts[s].available_slots {
                return Err(StaffError::SlotsExhausted {
                    site_id: self.id.clone(),
                    shift: s,
                });
            }
        }

        for &s in shifts {
            self.shifts[s].available_slots -= 1;
        }

        self.fully_assigned = self.shifts.iter().all(SiteShift::is_exhausted);
        Ok(())
    }

    /// Total slots across shifts.
    pub fn total_slots(&self) -> u32 {
        self.shifts.iter().map(|s| s.total_slots).sum()
    }

    /// Reserved slots across shifts.
    pub fn reserved_slots(&self) -> u32 {
        self.shifts.iter().map(SiteShift::reserved_slots).sum()
    }

    /// Fraction of slots reserved. `None` for a site with no slots.
    pub fn fill_rate(&self) -> Option<f64> {
        let total = self.total_slots();
        if total == 0 {
            return None;
        }
        Some(self.reserved_slots() as f64 / total as f64)
    }
}

fn occurrences(shifts: &[ShiftNumber], shift: ShiftNumber) -> u32 {
    shifts.iter().filter(|&&s| s == shift).count() as u32
}
