//! Nearest-feasible-neighbor construction.
//!
//! Each vehicle leaves the depot with full capacity and repeatedly drives to
//! the cheapest unvisited customer that still fits. When nothing fits, the
//! route closes at the depot and the next vehicle starts.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use tracing::debug;

use crate::models::{CostModel, Route, Solution};

use super::err::ConstructionError;

/// How to treat customers left over after the fleet is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructionMode {
    /// Fail with [`ConstructionError`].
    #[default]
    Strict,
    /// Return the partial solution with leftovers in
    /// [`Solution::unassigned`], for diagnostics.
    IgnoreConstraints,
}

/// Builds a feasible starting solution.
///
/// Ties on travel cost go to the lower customer id, so the result is fully
/// deterministic. An instance without customers yields the empty solution.
///
/// # Examples
///
/// ```
/// use gls_routing::constructive::{nearest_feasible, ConstructionMode};
/// use gls_routing::models::{CostModel, Customer};
///
/// let model = CostModel::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 1.0, 0.0, 10, 0.0),
///         Customer::new(2, 2.0, 0.0, 10, 0.0),
///         Customer::new(3, 3.0, 0.0, 10, 0.0),
///     ],
///     2,
///     20,
/// )
/// .unwrap();
///
/// let solution = nearest_feasible(&model, ConstructionMode::Strict).unwrap();
/// assert_eq!(solution.num_routes(), 2);
/// assert!(solution.all_served(3));
/// ```
pub fn nearest_feasible(
    model: &CostModel,
    mode: ConstructionMode,
) -> Result<Solution, ConstructionError> {
    let n = model.num_customers();
    let capacity = model.capacity();
    let depot = model.depot();

    if mode == ConstructionMode::Strict {
        if let Some(c) = model.customers()[1..].iter().find(|c| c.demand() > capacity) {
            return Err(ConstructionError::DemandExceedsCapacity {
                customer: c.id(),
                demand: c.demand(),
                capacity,
            });
        }
    }

    let mut visited = vec![false; n + 1];
    visited[depot] = true;
    let mut remaining = n;
    let mut routes = Vec::new();

    for _ in 0..model.vehicle_count() {
        if remaining == 0 {
            break;
        }

        let mut current = depot;
        let mut load: u64 = 0;
        let mut sequence = Vec::new();

        loop {
            let mut best: Option<(usize, f64)> = None;
            for (i, _) in visited.iter().enumerate().filter(|&(_, &v)| !v) {
                if !model.fits(load + u64::from(model.demand(i))) {
                    continue;
                }
                let d = model.cost(current, i);
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((i, d));
                }
            }

            match best {
                Some((next, _)) => {
                    visited[next] = true;
                    remaining -= 1;
                    load += u64::from(model.demand(next));
                    sequence.push(next);
                    current = next;
                }
                None => break,
            }
        }

        if sequence.is_empty() {
            // nothing left fits an empty vehicle; later vehicles fare no better
            break;
        }
        debug!(route = routes.len(), load, customers = sequence.len(), "closed route");
        routes.push(Route::new(depot, sequence));
    }

    let unassigned: Vec<usize> = (1..=n).filter(|&i| !visited[i]).collect();
    if unassigned.is_empty() {
        return Ok(Solution::new(routes));
    }

    match mode {
        ConstructionMode::Strict => Err(ConstructionError::VehiclesExhausted {
            unassigned,
            vehicles: model.vehicle_count(),
        }),
        ConstructionMode::IgnoreConstraints => Ok(Solution::new(routes).with_unassigned(unassigned)),
    }
}
