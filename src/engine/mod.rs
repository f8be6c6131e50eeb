//! Assignment engine.
//!
//! Places workers at sites one at a time, in input order. Each worker gets
//! the highest-priority site that can hold their whole request; if none
//! can, their lowest-weight shift is dropped and the search repeats.
//!
//! # Outcomes
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Assigned` | Reserved at one site, possibly with fewer shifts |
//! | `Unassigned` | No site could take even one remaining shift |
//! | `Skipped` | Excluded by the role filter |
//!
//! Capacity is consumed as the run proceeds, so earlier workers are served
//! first. Nothing is ever released or reassigned.

mod greedy;
mod outcome;
mod summary;

pub use greedy::{AssignmentEngine, AssignmentOptions, AssignmentRequest};
pub use outcome::{AssignmentRun, WorkerOutcome, WorkerRecord};
pub use summary::RunSummary;
