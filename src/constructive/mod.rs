//! Initial solution construction.
//!
//! - [`nearest_feasible`]: greedy nearest-feasible-neighbor, one route per vehicle, O(n²)

mod err;
mod nearest_neighbor;

pub use err::ConstructionError;
pub use nearest_neighbor::{nearest_feasible, ConstructionMode};
