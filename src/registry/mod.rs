//! Registries built once per run from the input snapshot.
//!
//! - [`Municipalities`]: name-keyed lookup used while resolving rows.
//! - [`SiteRegistry`]: sites in fixed priority order; the matching entry
//!   point for the engine.
//! - [`WorkerRegistry`]: workers in input order.

mod municipalities;
mod ordering;
mod sites;
mod workers;

pub use municipalities::Municipalities;
pub use ordering::{SiteOrdering, TieBreaker};
pub use sites::SiteRegistry;
pub use workers::WorkerRegistry;
