//! Solution evaluation.
//!
//! - [`Objective`]: plain distance, single-route distance, or GLS-augmented cost
//! - [`RouteEvaluator`]: timing, load, and constraint diagnostics

mod evaluator;
mod objective;

pub use evaluator::{RouteEvaluator, RouteSchedule};
pub use objective::{Context, Objective, PenaltyContext};
