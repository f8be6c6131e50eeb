//! Snapshot input and row output.
//!
//! The engine works on typed registries; this module turns a JSON snapshot
//! of positional tables into them and turns a finished run back into rows.
//!
//! | Table | Columns |
//! |-------|---------|
//! | `shift_config` | start, end, label, weight |
//! | `municipalities` | name, priority, zone |
//! | `polls` | municipality, identifier, busiest slots, busiest priority |
//! | `poll_workers` | email, municipality, roles, travel flexibility, home site, shifts |
//!
//! Poll and poll-worker columns can be moved with [`ColumnLayout`].

mod output;
mod snapshot;
mod table;

pub use output::{AssignmentRow, RowStatus};
pub use snapshot::{ColumnLayout, Snapshot, StaffingInput};
pub use table::Table;
