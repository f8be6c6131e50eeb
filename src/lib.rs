//! Volunteer staffing for multi-shift sites.
//!
//! Places volunteer workers at sites (polling locations) for one or more
//! shifts, walking sites in priority order and degrading a worker's request
//! one shift at a time until it fits somewhere.
//!
//! # Modules
//!
//! - **`config`**: Zone proximity matrix and shift weight table; derives a
//!   site's per-shift slots and priority from its busiest shift
//! - **`models`**: Domain types: `Municipality`, `Site`, `SiteShift`,
//!   `Worker`, `Role`, `TravelFlexibility`
//! - **`registry`**: Priority-ordered `SiteRegistry`, `WorkerRegistry`,
//!   `Municipalities`
//! - **`engine`**: `AssignmentEngine` (greedy, first come first served),
//!   outcomes and run summary
//! - **`validation`**: Input integrity checks (duplicate keys, dangling
//!   references, out-of-range zones and shifts)
//! - **`input`**: JSON snapshot reader and output rows
//!
//! # Quick start
//!
//! ```no_run
//! use u_staff::engine::AssignmentEngine;
//! use u_staff::input::Snapshot;
//!
//! let mut input = Snapshot::from_path("snapshot.json")?.build()?;
//! let run = AssignmentEngine::with_options(input.options).run_request(&mut input.request)?;
//! for row in run.rows() {
//!     println!("{} -> {:?} [{}]", row.email, row.site, row.shifts);
//! }
//! # Ok::<(), u_staff::error::StaffError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod models;
pub mod registry;
pub mod validation;
