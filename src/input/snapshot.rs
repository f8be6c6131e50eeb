//! Snapshot document: every input table in one JSON file.
//!
//! ```json
//! {
//!   "proximate_zone_distance": 1,
//!   "zone_config": [[0, 1], [1, 0]],
//!   "shift_config": [["6:45 AM", "10 AM", "6:45 AM - 10 AM", 1.0]],
//!   "municipalities": [["Media", 10, 0]],
//!   "polls": [["Media", "Media-1", 4, 10]],
//!   "poll_workers": [["a@example.org", "Media", "Poll Greeter",
//!                     "Anywhere in the county", null, "6:45 AM - 10 AM"]],
//!   "options": { "tie_breaker": "by_id" },
//!   "layout": { "poll_id": 1 }
//! }
//! ```
//!
//! Shift, municipality and zone tables are positional with fixed columns.
//! Poll and poll-worker columns come from [`ColumnLayout`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Table;
use crate::config::{Configuration, ShiftSlot, ShiftTable, ZoneMatrix};
use crate::engine::{AssignmentOptions, AssignmentRequest};
use crate::error::{StaffError, StaffResult};
use crate::models::{Municipality, Role, Site, TravelFlexibility, Worker};
use crate::registry::{Municipalities, SiteOrdering, SiteRegistry, WorkerRegistry};
use crate::validation::{validate_input, ValidationError, ValidationErrorKind};

/// Column positions in the poll and poll-worker tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub poll_municipality: usize,
    pub poll_id: usize,
    pub poll_busiest_slots: usize,
    pub poll_busiest_priority: usize,
    pub worker_email: usize,
    pub worker_municipality: usize,
    pub worker_roles: usize,
    pub worker_travel_flexibility: usize,
    pub worker_home_site: usize,
    pub worker_shifts: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            poll_municipality: 0,
            poll_id: 1,
            poll_busiest_slots: 2,
            poll_busiest_priority: 3,
            worker_email: 0,
            worker_municipality: 1,
            worker_roles: 2,
            worker_travel_flexibility: 3,
            worker_home_site: 4,
            worker_shifts: 5,
        }
    }
}

/// All input tables for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub proximate_zone_distance: i64,
    pub zone_config: Vec<Vec<i64>>,
    pub shift_config: Table,
    pub municipalities: Table,
    pub polls: Table,
    pub poll_workers: Table,
    /// Engine options; absent means [`AssignmentOptions::poll_roles`].
    #[serde(default)]
    pub options: Option<AssignmentOptions>,
    #[serde(default)]
    pub layout: ColumnLayout,
}

/// A validated request plus the options to run it with.
#[derive(Debug, Clone)]
pub struct StaffingInput {
    pub request: AssignmentRequest,
    pub options: AssignmentOptions,
}

impl Snapshot {
    /// Reads a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> StaffResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a snapshot document.
    pub fn from_json_str(text: &str) -> StaffResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolves every table into registries.
    ///
    /// Malformed cells, unknown shift labels and unknown travel modes fail
    /// immediately. Reference problems (unknown municipality, duplicates)
    /// are collected and returned together as [`StaffError::Validation`].
    /// Home-site cells are kept as written and never rejected.
    pub fn build(&self) -> StaffResult<StaffingInput> {
        let config = self.configuration()?;
        let municipality_rows = self.municipality_rows()?;
        let municipalities = Municipalities::new(municipality_rows.clone());

        let mut errors = Vec::new();
        let sites = self.site_rows(&config, &municipalities, &mut errors)?;
        let workers = self.worker_rows(&config, &municipalities, &mut errors)?;

        if let Err(found) = validate_input(&config, &municipality_rows, &sites, &workers) {
            errors.extend(found);
        }
        if !errors.is_empty() {
            return Err(StaffError::Validation(errors));
        }

        let options = self
            .options
            .clone()
            .unwrap_or_else(AssignmentOptions::poll_roles);
        debug!(
            sites = sites.len(),
            workers = workers.len(),
            municipalities = municipalities.len(),
            "snapshot resolved"
        );

        let sites = SiteRegistry::with_ordering(sites, SiteOrdering::new(options.tie_breaker))?;
        let request = AssignmentRequest::new(config, sites, WorkerRegistry::new(workers));
        Ok(StaffingInput { request, options })
    }

    /// Zone matrix and shift table.
    pub fn configuration(&self) -> StaffResult<Configuration> {
        let zones = ZoneMatrix::from_signed(self.zone_config.clone(), self.proximate_zone_distance)?;

        let t = &self.shift_config;
        let mut slots = Vec::with_capacity(t.len());
        for row in t.data_rows() {
            slots.push(ShiftSlot::new(
                t.cell_opt_str(row, 0).unwrap_or_default(),
                t.cell_opt_str(row, 1).unwrap_or_default(),
                t.cell_str("shift_config", row, 2)?,
                t.cell_f64("shift_config", row, 3)?,
            ));
        }

        Ok(Configuration::new(zones, ShiftTable::new(slots)?))
    }

    fn municipality_rows(&self) -> StaffResult<Vec<Municipality>> {
        const TABLE: &str = "municipalities";
        let t = &self.municipalities;

        let mut rows = Vec::with_capacity(t.len());
        for row in t.data_rows() {
            let name = t.cell_str(TABLE, row, 0)?;
            let priority = to_i32(TABLE, row, 1, t.cell_int(TABLE, row, 1)?)?;
            let zone = usize::try_from(t.cell_int(TABLE, row, 2)?)
                .map_err(|_| cell_error(TABLE, row, 2, "zone must be non-negative"))?;
            rows.push(Municipality::new(name, priority, zone));
        }
        Ok(rows)
    }

    fn site_rows(
        &self,
        config: &Configuration,
        municipalities: &Municipalities,
        errors: &mut Vec<ValidationError>,
    ) -> StaffResult<Vec<Site>> {
        const TABLE: &str = "polls";
        let t = &self.polls;
        let l = &self.layout;

        let mut sites = Vec::with_capacity(t.len());
        for row in t.data_rows() {
            let id = t.cell_str(TABLE, row, l.poll_id)?;
            let muni_name = t.cell_str(TABLE, row, l.poll_municipality)?;
            let slots = u32::try_from(t.cell_int(TABLE, row, l.poll_busiest_slots)?).map_err(|_| {
                cell_error(TABLE, row, l.poll_busiest_slots, "slot count must be non-negative")
            })?;
            let priority = to_i32(
                TABLE,
                row,
                l.poll_busiest_priority,
                t.cell_int(TABLE, row, l.poll_busiest_priority)?,
            )?;

            let muni = match municipalities.resolve(&muni_name) {
                Ok(muni) => muni,
                Err(e) => {
                    warn!(site = %id, municipality = %muni_name, "site in unknown municipality");
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownMunicipality,
                        format!("Site '{}': {}", id, e),
                    ));
                    continue;
                }
            };
            sites.push(Site::new(id, muni.clone(), slots, priority, config)?);
        }
        Ok(sites)
    }

    fn worker_rows(
        &self,
        config: &Configuration,
        municipalities: &Municipalities,
        errors: &mut Vec<ValidationError>,
    ) -> StaffResult<Vec<Worker>> {
        const TABLE: &str = "poll_workers";
        let t = &self.poll_workers;
        let l = &self.layout;

        let mut workers = Vec::with_capacity(t.len());
        for row in t.data_rows() {
            let email = t.cell_str(TABLE, row, l.worker_email)?;
            let muni_name = t.cell_str(TABLE, row, l.worker_municipality)?;
            let roles = Role::parse_list(&t.cell_opt_str(row, l.worker_roles).unwrap_or_default());
            let travel =
                TravelFlexibility::from_label(&t.cell_str(TABLE, row, l.worker_travel_flexibility)?)?;
            let shifts =
                config.shift_numbers(&t.cell_opt_str(row, l.worker_shifts).unwrap_or_default())?;

            let muni = match municipalities.resolve(&muni_name) {
                Ok(muni) => muni,
                Err(e) => {
                    warn!(worker = %email, municipality = %muni_name, "worker in unknown municipality");
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownMunicipality,
                        format!("Worker '{}': {}", email, e),
                    ));
                    continue;
                }
            };

            let mut worker = Worker::new(email, muni.clone(), travel)
                .with_roles(roles)
                .with_shifts(shifts);
            if let Some(home) = t.cell_opt_str(row, l.worker_home_site) {
                worker = worker.with_home_site(home);
            }
            workers.push(worker);
        }
        Ok(workers)
    }
}

fn to_i32(table: &'static str, row: usize, column: usize, value: i64) -> StaffResult<i32> {
    i32::try_from(value).map_err(|_| cell_error(table, row, column, "priority out of range"))
}

fn cell_error(table: &'static str, row: usize, column: usize, message: &str) -> StaffError {
    StaffError::InvalidCell {
        table,
        row,
        column,
        message: message.to_string(),
    }
}
