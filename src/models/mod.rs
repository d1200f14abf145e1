//! Domain model types for capacitated vehicle routing.
//!
//! Customers with demands and optional time windows, routes as depot-anchored
//! customer sequences, solutions as sets of routes, and the immutable
//! [`CostModel`] every search component reads from.

mod cost_model;
mod customer;
mod route;
mod solution;

pub use cost_model::{CostModel, CostModelError};
pub use customer::{Customer, TimeWindow};
pub use route::{Route, Visit};
pub use solution::{Solution, Violation, ViolationType};
