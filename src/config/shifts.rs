//! Shift weight table.
//!
//! Shifts are fixed time windows numbered `0..K`, shared by every site and
//! every worker. Each carries a weight: its demand relative to the busiest
//! shift at a site. Weights are site-independent; only their ratio to a
//! site's busiest-shift numbers matters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{StaffError, StaffResult};

/// Shift identifier (index into the shift table).
pub type ShiftNumber = usize;

/// One configured shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSlot {
    /// Position in the table.
    pub shift_number: ShiftNumber,
    /// Start time as written in the source sheet (e.g. "6:45 AM").
    pub start_time: String,
    /// End time as written in the source sheet.
    pub end_time: String,
    /// Label used in worker shift requests (e.g. "6:45 AM - 10 AM").
    pub label: String,
    /// Demand relative to the busiest shift (finite, non-negative).
    pub weight: f64,
}

impl ShiftSlot {
    /// Creates a shift slot. The shift number is assigned by [`ShiftTable`].
    pub fn new(
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        label: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            shift_number: 0,
            start_time: start_time.into(),
            end_time: end_time.into(),
            label: label.into(),
            weight,
        }
    }
}

/// Ordered shift slots with a label index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftTable {
    slots: Vec<ShiftSlot>,
    #[serde(skip)]
    label_index: HashMap<String, ShiftNumber>,
}

impl ShiftTable {
    /// Creates a table, numbering slots in the given order.
    ///
    /// Rejects negative or non-finite weights. A repeated label keeps its
    /// first shift number in the label index.
    pub fn new(slots: Vec<ShiftSlot>) -> StaffResult<Self> {
        let mut numbered = Vec::with_capacity(slots.len());
        let mut label_index = HashMap::new();

        for (i, mut slot) in slots.into_iter().enumerate() {
            if !slot.weight.is_finite() || slot.weight < 0.0 {
                return Err(StaffError::InvalidShiftWeight {
                    shift: i,
                    weight: slot.weight,
                });
            }
            slot.shift_number = i;
            label_index.entry(slot.label.clone()).or_insert(i);
            numbered.push(slot);
        }

        Ok(Self {
            slots: numbered,
            label_index,
        })
    }

    /// Creates a table from bare weights with labels "Shift 0", "Shift 1", ...
    pub fn from_weights(weights: &[f64]) -> StaffResult<Self> {
        Self::new(
            weights
                .iter()
                .enumerate()
                .map(|(i, &w)| ShiftSlot::new("", "", format!("Shift {i}"), w))
                .collect(),
        )
    }

    /// Number of shifts.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table has no shifts.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Shift slot by number.
    pub fn get(&self, shift: ShiftNumber) -> StaffResult<&ShiftSlot> {
        self.slots.get(shift).ok_or(StaffError::ShiftOutOfRange {
            shift,
            shift_count: self.slots.len(),
        })
    }

    /// Weight of a shift.
    pub fn weight(&self, shift: ShiftNumber) -> StaffResult<f64> {
        self.get(shift).map(|s| s.weight)
    }

    /// All slots in shift-number order.
    pub fn iter(&self) -> impl Iterator<Item = &ShiftSlot> {
        self.slots.iter()
    }

    /// Shift number for a label.
    pub fn shift_number(&self, label: &str) -> StaffResult<ShiftNumber> {
        self.label_index
            .get(label)
            .copied()
            .or_else(|| self.slots.iter().position(|s| s.label == label))
            .ok_or_else(|| StaffError::UnknownShiftLabel(label.to_string()))
    }

    /// Shift numbers for a comma-separated list of labels, in list order.
    pub fn shift_numbers(&self, labels: &str) -> StaffResult<Vec<ShiftNumber>> {
        split_multivalue(labels)
            .into_iter()
            .map(|label| self.shift_number(label))
            .collect()
    }
}

/// Splits a comma-separated cell, trimming each piece and dropping empties.
pub fn split_multivalue(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Joins shift numbers with `,` (the output column format).
pub fn join_shift_numbers(shifts: &[ShiftNumber]) -> String {
    shifts
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
