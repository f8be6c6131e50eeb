//! Run configuration: zone proximity and shift weighting.
//!
//! [`Configuration`] is built once from the input snapshot and passed by
//! reference to the registries and the engine. It derives a site's per-shift
//! capacity and priority from the site's busiest-shift numbers:
//!
//! | Derived value | Formula |
//! |---------------|---------|
//! | shift slots | `round(weight[shift] * busiest_shift_slots)` |
//! | shift priority | `round(weight[shift] * busiest_shift_priority)` |
//!
//! # Rounding
//! Weights are `f64` and products are rounded with `f64::round`: halves
//! round away from zero. Slot products are never negative, so for capacity
//! this is round-half-up (`1.5 -> 2`, `0.5 -> 1`).
//!
//! Products are computed in double precision. A weight such as `0.35` times
//! `10` gives exactly `3.5` here and rounds to `4`; single-precision
//! arithmetic would land just below `3.5` and round to `3`.

mod shifts;
mod zones;

pub use shifts::{join_shift_numbers, split_multivalue, ShiftNumber, ShiftSlot, ShiftTable};
pub use zones::{ZoneId, ZoneMatrix};

use crate::error::StaffResult;

/// Zone proximity matrix plus shift weight table.
#[derive(Debug, Clone)]
pub struct Configuration {
    zones: ZoneMatrix,
    shifts: ShiftTable,
}

impl Configuration {
    /// Creates a configuration.
    pub fn new(zones: ZoneMatrix, shifts: ShiftTable) -> Self {
        Self { zones, shifts }
    }

    /// Zone distance matrix.
    pub fn zones(&self) -> &ZoneMatrix {
        &self.zones
    }

    /// Shift weight table.
    pub fn shifts(&self) -> &ShiftTable {
        &self.shifts
    }

    /// Number of configured zones.
    pub fn zone_count(&self) -> usize {
        self.zones.zone_count()
    }

    /// Number of configured shifts.
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }

    /// Whether `other` is proximate to `zone`, reading `zone`'s matrix row.
    pub fn are_zones_proximate(&self, zone: ZoneId, other: ZoneId) -> StaffResult<bool> {
        self.zones.is_proximate(zone, other)
    }

    /// Raw weight of a shift.
    pub fn shift_weight(&self, shift: ShiftNumber) -> StaffResult<f64> {
        self.shifts.weight(shift)
    }

    /// Slot count for `shift` at a site whose busiest shift has
    /// `busiest_shift_slots` slots.
    pub fn calculate_shift_slots(
        &self,
        shift: ShiftNumber,
        busiest_shift_slots: u32,
    ) -> StaffResult<u32> {
        let weight = self.shift_weight(shift)?;
        Ok((weight * busiest_shift_slots as f64).round() as u32)
    }

    /// Priority for `shift` at a site whose busiest shift has priority
    /// `busiest_shift_priority`.
    pub fn calculate_shift_priority(
        &self,
        shift: ShiftNumber,
        busiest_shift_priority: i32,
    ) -> StaffResult<i32> {
        let weight = self.shift_weight(shift)?;
        Ok((weight * busiest_shift_priority as f64).round() as i32)
    }

    /// Shift number for a request label.
    pub fn shift_number(&self, label: &str) -> StaffResult<ShiftNumber> {
        self.shifts.shift_number(label)
    }

    /// Shift numbers for a comma-separated request cell.
    pub fn shift_numbers(&self, labels: &str) -> StaffResult<Vec<ShiftNumber>> {
        self.shifts.shift_numbers(labels)
    }
}
