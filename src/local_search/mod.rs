//! Local search for improving CVRP solutions under a given objective.
//!
//! - `two-opt`: intra-route segment reversal
//! - `exchange`: inter-route 2-opt* tail exchange
//! - `relocate`: inter-route customer relocation
//!
//! [`LocalSearch`] applies the enabled [`Operator`]s in that order until
//! none improves.
//!
//! Operators score moves with [`Objective::arc`](crate::evaluation::Objective::arc)
//! weights, so the same code serves the plain and the penalty-augmented
//! objective.

mod engine;
mod exchange;
mod relocate;
mod two_opt;

pub use engine::{local_search, LocalSearch, Operator, UnknownOperatorError};

/// Minimum weight decrease for a move to count as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;
